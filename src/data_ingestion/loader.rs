//! 表格載入器：主幹解析 → 格式分派 → 統一表格

use super::error::{IngestionError, IngestionResult};
use super::processor::{parse_json, parse_text, CsvReader};
use super::resolver::{DirectoryResolver, FileResolver};
use crate::domain_types::{FileFormat, IndexRow, IndexTable, Table, TableLayout, INDEX_COLUMNS};
use std::path::Path;
use tracing::debug;

/// 從檔案來源載入表格
#[derive(Debug, Clone)]
pub struct TableLoader<R> {
    resolver: R,
}

impl TableLoader<DirectoryResolver> {
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(DirectoryResolver::new(dir.as_ref()))
    }
}

impl<R: FileResolver> TableLoader<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// 載入 `stem` 對應的檔案
    ///
    /// 格式由副檔名決定；`layout` 只影響 CSV 是否有標題行。
    pub fn load(&self, stem: &str, layout: TableLayout) -> IngestionResult<Table> {
        self.load_named(stem, layout).map(|(_, table)| table)
    }

    fn load_named(&self, stem: &str, layout: TableLayout) -> IngestionResult<(String, Table)> {
        let file = self.resolver.resolve(stem)?;
        let format = FileFormat::from_file_name(&file)
            .ok_or_else(|| IngestionError::UnsupportedFormat(file.clone()))?;
        let data = self.resolver.read(&file)?;

        let table = match format {
            FileFormat::Csv => CsvReader::for_layout(layout).read_table(&data, &file)?,
            FileFormat::Json => parse_json(&data, &file)?,
            FileFormat::Text => parse_text(&data, &file)?,
        };

        debug!(
            "載入 {}: {} 列 x {} 欄 ({:?})",
            file,
            table.height(),
            table.width(),
            format
        );
        Ok((file, table))
    }

    pub fn load_entity(&self, stem: &str) -> IngestionResult<Table> {
        self.load(stem, TableLayout::Entity)
    }

    /// 載入索引檔並轉換為整數的 (left_id, right_id, label)
    pub fn load_index(&self, stem: &str) -> IngestionResult<IndexTable> {
        let (file, table) = self.load_named(stem, TableLayout::Index)?;
        index_from_table(&table, &file)
    }
}

/// 直接從目錄載入單一表格
pub fn load_table(dir: impl AsRef<Path>, stem: &str, layout: TableLayout) -> IngestionResult<Table> {
    TableLoader::from_dir(dir).load(stem, layout)
}

fn index_from_table(table: &Table, file: &str) -> IngestionResult<IndexTable> {
    let [left_name, right_name, label_name] = INDEX_COLUMNS;
    let column = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| IngestionError::invalid_index(file, 0, format!("缺少欄位 {name}")))
    };
    let left = column(left_name)?;
    let right = column(right_name)?;
    let labels = column(label_name)?;

    (0..table.height())
        .map(|row| {
            let left_id = parse_position(left[row].as_deref(), left_name, row, file)?;
            let right_id = parse_position(right[row].as_deref(), right_name, row, file)?;
            let label = parse_integer(labels[row].as_deref(), label_name, row, file)?;
            Ok(IndexRow::new(left_id, right_id, label))
        })
        .collect()
}

fn parse_integer(value: Option<&str>, column: &str, row: usize, file: &str) -> IngestionResult<i64> {
    let text = value.ok_or_else(|| IngestionError::invalid_index(file, row, format!("{column} 缺值")))?;
    text.trim().parse::<i64>().map_err(|_| {
        IngestionError::invalid_index(file, row, format!("{column} 不是整數: {text:?}"))
    })
}

fn parse_position(value: Option<&str>, column: &str, row: usize, file: &str) -> IngestionResult<usize> {
    let number = parse_integer(value, column, row, file)?;
    usize::try_from(number)
        .map_err(|_| IngestionError::invalid_index(file, row, format!("{column} 不可為負數: {number}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_ingestion::resolver::MemoryResolver;
    use crate::data_ingestion::processor::TEXT_COLUMN;
    use assert_matches::assert_matches;

    fn loader(files: &[(&str, &str)]) -> TableLoader<MemoryResolver> {
        let resolver = files
            .iter()
            .fold(MemoryResolver::new("dataset"), |r, (name, body)| r.with_file(*name, *body));
        TableLoader::new(resolver)
    }

    #[test]
    fn test_load_index_csv() {
        let loader = loader(&[("train.csv", "0,1,1\n 2 ,0,0\n")]);

        let index = loader.load_index("train").unwrap();

        assert_eq!(
            index.rows(),
            &[IndexRow::new(0, 1, 1), IndexRow::new(2, 0, 0)]
        );
    }

    #[test]
    fn test_train_json_parses_as_records() {
        let loader = loader(&[(
            "train.json",
            r#"[{"left_id": 0, "right_id": 2, "label": 1}]"#,
        )]);

        let table = loader.load("train", TableLayout::Index).unwrap();
        assert_eq!(table.width(), 3);

        let index = loader.load_index("train").unwrap();
        assert_eq!(index.rows(), &[IndexRow::new(0, 2, 1)]);
    }

    #[test]
    fn test_text_entity_table() {
        let loader = loader(&[("left.txt", "one\ntwo\nthree\n")]);

        let table = loader.load_entity("left").unwrap();

        assert_eq!(table.height(), 3);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec![TEXT_COLUMN]);
        assert_eq!(table.cell(TEXT_COLUMN, 2), Some("three\n"));
    }

    #[test]
    fn test_unsupported_extension() {
        let loader = loader(&[("left.parquet", "")]);
        assert_matches!(
            loader.load_entity("left"),
            Err(IngestionError::UnsupportedFormat(file)) => assert_eq!(file, "left.parquet")
        );
    }

    #[test]
    fn test_index_rejects_negative_id() {
        let loader = loader(&[("valid.csv", "0,1,1\n-1,0,0\n")]);
        assert_matches!(
            loader.load_index("valid"),
            Err(IngestionError::InvalidIndex { file, row, .. }) => {
                assert_eq!(file, "valid.csv");
                assert_eq!(row, 1);
            }
        );
    }

    #[test]
    fn test_index_rejects_non_integer() {
        let loader = loader(&[("test.csv", "0,x,1\n")]);
        assert_matches!(
            loader.load_index("test"),
            Err(IngestionError::InvalidIndex { row: 0, .. })
        );
    }

    #[test]
    fn test_index_from_text_rejected() {
        let loader = loader(&[("test.txt", "0,1,1\n")]);
        assert_matches!(
            loader.load_index("test"),
            Err(IngestionError::InvalidIndex { .. })
        );
    }

    #[test]
    fn test_load_table_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("right.csv"), "id,price\n7,3.5\n").unwrap();

        let table = load_table(dir.path(), "right", TableLayout::Entity).unwrap();

        assert_eq!(table.cell("price", 0), Some("3.5"));
    }
}
