//! CSV 檔案讀取器

use crate::data_ingestion::error::{IngestionError, IngestionResult};
use crate::domain_types::{Table, TableLayout, INDEX_COLUMNS};
use polars::prelude::*;
use std::io::Cursor;

/// CSV 讀取器配置
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// 是否有標題行
    pub has_header: bool,
    /// 分隔符
    pub separator: u8,
    /// 型別推斷的列數，0 表示所有欄位都以字串讀入
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            separator: b',',
            infer_schema_length: Some(0),
        }
    }
}

/// CSV 檔案讀取器
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvReaderConfig,
}

impl CsvReader {
    pub fn new(config: CsvReaderConfig) -> Self {
        Self { config }
    }

    /// 依表格版面建立讀取器：索引檔沒有標題行
    pub fn for_layout(layout: TableLayout) -> Self {
        Self::default().with_header(layout == TableLayout::Entity)
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.config.separator = separator;
        self
    }

    /// 從字節數組讀取 CSV
    pub fn read_bytes(&self, data: &[u8]) -> PolarsResult<DataFrame> {
        let cursor = Cursor::new(data);
        CsvReadOptions::default()
            .with_has_header(self.config.has_header)
            .with_parse_options(CsvParseOptions::default().with_separator(self.config.separator))
            .with_infer_schema_length(self.config.infer_schema_length)
            .into_reader_with_file_handle(cursor)
            .finish()
    }

    /// 讀取並轉換為 [`Table`]；沒有標題行時欄位依位置命名為索引欄
    pub fn read_table(&self, data: &[u8], file: &str) -> IngestionResult<Table> {
        let df = self
            .read_bytes(data)
            .map_err(|source| IngestionError::csv(file, source))?;

        if self.config.has_header {
            return frame_to_table(&df, file, None);
        }

        if df.width() != INDEX_COLUMNS.len() {
            return Err(IngestionError::invalid_index(
                file,
                0,
                format!("預期 {} 欄, 實際 {} 欄", INDEX_COLUMNS.len(), df.width()),
            ));
        }
        frame_to_table(&df, file, Some(&INDEX_COLUMNS))
    }
}

/// 將 DataFrame 每一欄轉成字串欄，null 保留為缺值
fn frame_to_table(df: &DataFrame, file: &str, names: Option<&[&str]>) -> IngestionResult<Table> {
    let mut table = Table::new();

    for (position, column) in df.get_columns().iter().enumerate() {
        let series = column
            .as_materialized_series()
            .cast(&DataType::String)
            .map_err(|source| IngestionError::csv(file, source))?;
        let values: Vec<Option<String>> = series
            .str()
            .map_err(|source| IngestionError::csv(file, source))?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();

        let name = match names {
            Some(names) => names[position].to_string(),
            None => column.name().to_string(),
        };
        table
            .push_column(name, values)
            .map_err(|source| IngestionError::table(file, source))?;
    }

    Ok(table)
}
