use super::Side;
use crate::domain_types::TableError;
use thiserror::Error;

/// 配對組合錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("欄位衝突: {side} 表已有欄位 {column}")]
    ColumnConflict { side: Side, column: String },

    #[error("索引超出範圍: 第 {row} 列的 {side}_id = {id}, {side} 表只有 {len} 列")]
    IndexOutOfRange {
        side: Side,
        row: usize,
        id: usize,
        len: usize,
    },

    #[error("無效的標籤: 第 {row} 列的 label = {value} (只接受 0 或 1)")]
    InvalidLabel { row: usize, value: i64 },

    #[error("表格錯誤: {0}")]
    Table(#[from] TableError),
}

pub type JoinResult<T> = Result<T, JoinError>;
