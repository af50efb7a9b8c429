//! 欄位導向的字串表格
//!
//! 每一欄是一串可能缺值的字串，所有欄位列數一致。載入器產生這種表格，
//! 配對器在其上做欄位補齊與列重排。

use thiserror::Error;

/// 表格操作錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("欄位重複: {0}")]
    DuplicateColumn(String),

    #[error("欄位長度不一致: 欄位 {column} 有 {found} 列, 預期 {expected} 列")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("列位置超出範圍: {position} (表格共 {height} 列)")]
    RowOutOfRange { position: usize, height: usize },
}

pub type TableResult<T> = Result<T, TableError>;

/// 單一具名欄位
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableColumn {
    name: String,
    values: Vec<Option<String>>,
}

/// 有序的具名欄位集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<TableColumn>,
    height: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依序由 (欄名, 值) 建立表格
    pub fn from_columns<I, S>(columns: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<Option<String>>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// 追加一欄；第一欄決定表格列數
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> TableResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.height = values.len();
        } else if values.len() != self.height {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.height,
                found: values.len(),
            });
        }
        self.columns.push(TableColumn { name, values });
        Ok(())
    }

    /// 追加一個每列都填入相同值的欄位，欄名已存在時回傳錯誤而不覆寫
    pub fn add_constant_column(&mut self, name: &str, value: &str) -> TableResult<()> {
        let values = vec![Some(value.to_string()); self.height];
        self.push_column(name, values)
    }

    /// 依給定位置挑出列（可重複、保留順序）組成新表格
    pub fn take_rows(&self, positions: &[usize]) -> TableResult<Table> {
        if let Some(&position) = positions.iter().find(|&&p| p >= self.height) {
            return Err(TableError::RowOutOfRange {
                position,
                height: self.height,
            });
        }

        let columns = self
            .columns
            .iter()
            .map(|column| TableColumn {
                name: column.name.clone(),
                values: positions.iter().map(|&p| column.values[p].clone()).collect(),
            })
            .collect();

        Ok(Table {
            columns,
            height: positions.len(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<String>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// 單格值；欄不存在、列超出範圍或缺值時皆為 None
    pub fn cell(&self, name: &str, row: usize) -> Option<&str> {
        self.column(name)?.get(row)?.as_deref()
    }
}
