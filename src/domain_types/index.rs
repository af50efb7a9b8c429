//! 標註索引表：每列指向左右兩張實體表中的一列，附帶 0/1 標籤

/// 索引檔的三個欄位名稱，依檔案中的位置排列
pub const INDEX_COLUMNS: [&str; 3] = ["left_id", "right_id", "label"];

/// 一筆標註配對
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRow {
    /// 左表的列位置（從 0 起算）
    pub left_id: usize,
    /// 右表的列位置（從 0 起算）
    pub right_id: usize,
    /// 原始數值標籤，配對時才轉換
    pub label: i64,
}

impl IndexRow {
    pub fn new(left_id: usize, right_id: usize, label: i64) -> Self {
        Self {
            left_id,
            right_id,
            label,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexTable {
    rows: Vec<IndexRow>,
}

impl IndexTable {
    pub fn new(rows: Vec<IndexRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[IndexRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn left_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|r| r.left_id)
    }

    pub fn right_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|r| r.right_id)
    }
}

impl FromIterator<IndexRow> for IndexTable {
    fn from_iter<T: IntoIterator<Item = IndexRow>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
