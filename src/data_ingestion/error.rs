//! 檔案定位與解析錯誤定義

use crate::domain_types::TableError;
use polars::error::PolarsError;
use thiserror::Error;

/// 載入錯誤類型
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("找不到檔案: {location} 中沒有以 '{stem}' 開頭的檔案")]
    NotFound { stem: String, location: String },

    #[error("檔案名稱不明確: {location} 中以 '{stem}' 開頭的檔案有 {candidates:?}")]
    AmbiguousMatch {
        stem: String,
        location: String,
        candidates: Vec<String>,
    },

    #[error("不支援的檔案格式: {0}")]
    UnsupportedFormat(String),

    #[error("檔案讀取錯誤 ({location}): {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 解析錯誤 ({file}): {source}")]
    Csv {
        file: String,
        #[source]
        source: PolarsError,
    },

    #[error("JSON 解析錯誤 ({file}): {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("不支援的 JSON 結構 ({file}): {reason}")]
    JsonLayout { file: String, reason: String },

    #[error("文字編碼錯誤 ({file}): {source}")]
    Encoding {
        file: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("無效的索引檔 {file} 第 {row} 列: {reason}")]
    InvalidIndex {
        file: String,
        row: usize,
        reason: String,
    },

    #[error("表格結構錯誤 ({file}): {source}")]
    Table {
        file: String,
        #[source]
        source: TableError,
    },
}

impl IngestionError {
    pub(crate) fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        IngestionError::Io {
            location: location.into(),
            source,
        }
    }

    pub(crate) fn csv(file: &str, source: PolarsError) -> Self {
        IngestionError::Csv {
            file: file.to_string(),
            source,
        }
    }

    pub(crate) fn table(file: &str, source: TableError) -> Self {
        IngestionError::Table {
            file: file.to_string(),
            source,
        }
    }

    pub(crate) fn json_layout(file: &str, reason: impl Into<String>) -> Self {
        IngestionError::JsonLayout {
            file: file.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_index(file: &str, row: usize, reason: impl Into<String>) -> Self {
        IngestionError::InvalidIndex {
            file: file.to_string(),
            row,
            reason: reason.into(),
        }
    }
}

/// 載入結果類型
pub type IngestionResult<T> = Result<T, IngestionError>;
