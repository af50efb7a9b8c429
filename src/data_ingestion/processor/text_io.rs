use crate::data_ingestion::error::{IngestionError, IngestionResult};
use crate::domain_types::Table;

/// 文字檔唯一的欄位名稱
pub const TEXT_COLUMN: &str = "text";

/// 逐行讀取文字檔，每行（含結尾換行字元）為一列
pub fn parse_text(data: &[u8], file: &str) -> IngestionResult<Table> {
    let text = String::from_utf8(data.to_vec()).map_err(|source| IngestionError::Encoding {
        file: file.to_string(),
        source,
    })?;
    let text = text.replace("\r\n", "\n");

    let lines: Vec<Option<String>> = text
        .split_inclusive('\n')
        .map(|line| Some(line.to_string()))
        .collect();

    Table::from_columns([(TEXT_COLUMN, lines)])
        .map_err(|source| IngestionError::table(file, source))
}
