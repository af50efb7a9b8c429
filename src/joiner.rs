//! 配對組合：依索引把左右兩張實體表的列兩兩組合成提示字串
//!
//! 流程：
//! 1. 依欄名把欄位分成共同、僅左、僅右三組
//! 2. 補齊兩表缺少的欄位（填入缺值佔位字串）
//! 3. 依索引挑出並重排兩表的列
//! 4. 每格標上 `LEFT`/`RIGHT` 與欄名，依固定欄序串成提示字串
//! 5. 數值標籤轉成 `y`/`n`
//!
//! 呼叫端傳入的表格不會被修改，同一組左右表可重複用於多個索引表。

pub mod error;
pub mod prompt;
pub mod schema;

pub use error::{JoinError, JoinResult};
pub use prompt::{assemble_prompt, label_column};
pub use schema::{ColumnOrder, ColumnPlan};

use crate::domain_types::{IndexTable, Label, Table};
use tracing::{debug, info};

/// 輸出表格的欄位名稱
pub const PROMPT_COLUMN: &str = "prompt";
pub const LABEL_COLUMN: &str = "label";

/// 預設缺值佔位字串
pub const MISSING_PLACEHOLDER: &str = "NA";

/// 配對的哪一側
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// 提示字串中的前綴
    pub fn tag(&self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// 配對選項
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    pub missing_placeholder: String,
    pub column_order: ColumnOrder,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            missing_placeholder: MISSING_PLACEHOLDER.to_string(),
            column_order: ColumnOrder::default(),
        }
    }
}

/// 一筆組合結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRow {
    pub prompt: String,
    pub label: Label,
}

#[derive(Debug, Clone, Default)]
pub struct PairJoiner {
    options: JoinOptions,
}

impl PairJoiner {
    pub fn new(options: JoinOptions) -> Self {
        Self { options }
    }

    /// 組合並回傳只有 `prompt`、`label` 兩欄的表格
    pub fn join(&self, index: &IndexTable, left: &Table, right: &Table) -> JoinResult<Table> {
        let rows = self.join_rows(index, left, right)?;
        let (prompts, labels): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .map(|row| (Some(row.prompt), Some(row.label.as_str().to_string())))
            .unzip();

        Ok(Table::from_columns([
            (PROMPT_COLUMN, prompts),
            (LABEL_COLUMN, labels),
        ])?)
    }

    /// 組合並回傳每個索引列的提示字串與標籤
    pub fn join_rows(
        &self,
        index: &IndexTable,
        left: &Table,
        right: &Table,
    ) -> JoinResult<Vec<JoinedRow>> {
        let placeholder = self.options.missing_placeholder.as_str();
        let plan = ColumnPlan::from_tables(left, right, self.options.column_order);

        info!("共同欄位: {:?}", plan.common());
        info!("僅左表欄位: {:?}", plan.left_only());
        info!("僅右表欄位: {:?}", plan.right_only());

        let left = reconcile(left, plan.right_only(), Side::Left, placeholder)?;
        let right = reconcile(right, plan.left_only(), Side::Right, placeholder)?;

        let left_positions = positions(index.left_ids(), left.height(), Side::Left)?;
        let right_positions = positions(index.right_ids(), right.height(), Side::Right)?;
        let ordered_left = left.take_rows(&left_positions)?;
        let ordered_right = right.take_rows(&right_positions)?;

        let columns: Vec<&str> = plan.ordered().collect();
        let left_cells: Vec<Vec<String>> = columns
            .iter()
            .map(|c| label_column(&ordered_left, c, Side::Left, placeholder))
            .collect();
        let right_cells: Vec<Vec<String>> = columns
            .iter()
            .map(|c| label_column(&ordered_right, c, Side::Right, placeholder))
            .collect();

        let rows = index
            .rows()
            .iter()
            .enumerate()
            .map(|(row, entry)| {
                let label = Label::try_from(entry.label).map_err(|e| JoinError::InvalidLabel {
                    row,
                    value: e.0,
                })?;
                let prompt = assemble_prompt(
                    left_cells
                        .iter()
                        .zip(&right_cells)
                        .map(|(l, r)| (l[row].as_str(), r[row].as_str())),
                );
                Ok(JoinedRow { prompt, label })
            })
            .collect::<JoinResult<Vec<_>>>()?;

        debug!("組合完成: {} 列", rows.len());
        Ok(rows)
    }
}

/// 複製表格並補上缺少的欄位
fn reconcile(table: &Table, missing: &[String], side: Side, placeholder: &str) -> JoinResult<Table> {
    let mut table = table.clone();
    for column in missing {
        if table.contains(column) {
            return Err(JoinError::ColumnConflict {
                side,
                column: column.clone(),
            });
        }
        table.add_constant_column(column, placeholder)?;
    }
    Ok(table)
}

/// 檢查索引中的列位置都在表格範圍內
fn positions(
    ids: impl Iterator<Item = usize>,
    len: usize,
    side: Side,
) -> JoinResult<Vec<usize>> {
    ids.enumerate()
        .map(|(row, id)| {
            if id < len {
                Ok(id)
            } else {
                Err(JoinError::IndexOutOfRange { side, row, id, len })
            }
        })
        .collect()
}
