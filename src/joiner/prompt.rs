//! 提示字串格式

use super::Side;
use crate::domain_types::Table;

/// 將一欄的每格標記為 `"{SIDE} {column}: {value}\n"`，缺值以佔位字串代替
///
/// 欄位不存在時每格都視為缺值。
pub fn label_column(table: &Table, column: &str, side: Side, placeholder: &str) -> Vec<String> {
    let tag = side.tag();
    match table.column(column) {
        Some(values) => values
            .iter()
            .map(|value| format!("{tag} {column}: {}\n", value.as_deref().unwrap_or(placeholder)))
            .collect(),
        None => vec![format!("{tag} {column}: {placeholder}\n"); table.height()],
    }
}

/// 每欄先接左再接右，各欄之間以換行分隔
pub fn assemble_prompt<'a>(fragments: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    fragments
        .map(|(left, right)| format!("{left}{right}"))
        .collect::<Vec<_>>()
        .join("\n")
}
