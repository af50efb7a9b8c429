//! 左右兩表的欄位分組與輸出欄序

use crate::domain_types::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 各欄位組內的排列方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOrder {
    /// 依欄名字典序
    #[default]
    Lexical,
    /// 依欄位在來源表中首次出現的順序（共同欄位依左表）
    Source,
}

/// 欄位分組：共同、僅左、僅右
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    common: Vec<String>,
    left_only: Vec<String>,
    right_only: Vec<String>,
}

impl ColumnPlan {
    pub fn from_tables(left: &Table, right: &Table, order: ColumnOrder) -> Self {
        let left_names: HashSet<&str> = left.column_names().collect();
        let right_names: HashSet<&str> = right.column_names().collect();

        let select = |table: &Table, keep: &dyn Fn(&str) -> bool| -> Vec<String> {
            let mut names: Vec<String> = table
                .column_names()
                .filter(|name| keep(*name))
                .map(str::to_string)
                .collect();
            if order == ColumnOrder::Lexical {
                names.sort();
            }
            names
        };

        Self {
            common: select(left, &|name: &str| right_names.contains(name)),
            left_only: select(left, &|name: &str| !right_names.contains(name)),
            right_only: select(right, &|name: &str| !left_names.contains(name)),
        }
    }

    pub fn common(&self) -> &[String] {
        &self.common
    }

    pub fn left_only(&self) -> &[String] {
        &self.left_only
    }

    pub fn right_only(&self) -> &[String] {
        &self.right_only
    }

    /// 輸出欄序：共同、僅左、僅右
    pub fn ordered(&self) -> impl Iterator<Item = &str> {
        self.common
            .iter()
            .chain(&self.left_only)
            .chain(&self.right_only)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str]) -> Table {
        Table::from_columns(columns.iter().map(|c| (*c, vec![None]))).unwrap()
    }

    #[test]
    fn test_lexical_plan() {
        let left = table(&["title", "id", "brand"]);
        let right = table(&["price", "title", "id"]);

        let plan = ColumnPlan::from_tables(&left, &right, ColumnOrder::Lexical);

        assert_eq!(plan.common(), &["id", "title"]);
        assert_eq!(plan.left_only(), &["brand"]);
        assert_eq!(plan.right_only(), &["price"]);
        assert_eq!(
            plan.ordered().collect::<Vec<_>>(),
            vec!["id", "title", "brand", "price"]
        );
    }

    #[test]
    fn test_source_plan_keeps_table_order() {
        let left = table(&["title", "id", "brand"]);
        let right = table(&["price", "title", "id"]);

        let plan = ColumnPlan::from_tables(&left, &right, ColumnOrder::Source);

        assert_eq!(plan.common(), &["title", "id"]);
        assert_eq!(
            plan.ordered().collect::<Vec<_>>(),
            vec!["title", "id", "brand", "price"]
        );
    }

    #[test]
    fn test_disjoint_tables() {
        let plan = ColumnPlan::from_tables(&table(&["a"]), &table(&["b"]), ColumnOrder::Lexical);
        assert!(plan.common().is_empty());
        assert_eq!(plan.ordered().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
