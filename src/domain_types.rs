pub mod table;
pub mod index;
pub mod label;

pub use table::{Table, TableError, TableResult};
pub use index::{IndexRow, IndexTable, INDEX_COLUMNS};
pub use label::{Label, LabelError};

/// 表格檔案格式，由副檔名決定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Json,
    Text,
}

impl FileFormat {
    /// 從檔名的副檔名判斷格式，未知副檔名回傳 None
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            "txt" => Some(FileFormat::Text),
            _ => None,
        }
    }
}

/// 表格的版面配置，由呼叫端明確指定
///
/// `Index` 代表沒有標題列的三欄索引檔（`left_id`, `right_id`, `label`），
/// `Entity` 則是一般帶標題列的實體表格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableLayout {
    Entity,
    Index,
}

/// 資料集中的三個標註切分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Split {
    Train,
    Test,
    Valid,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Test, Split::Valid];

    /// 檔名主幹，也是輸出檔名
    pub fn stem(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
            Split::Valid => "valid",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stem())
    }
}

/// 兩張實體表的檔名主幹
pub const LEFT_STEM: &str = "left";
pub const RIGHT_STEM: &str = "right";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(FileFormat::from_file_name("left.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_file_name("train.JSON"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_file_name("right.txt"), Some(FileFormat::Text));
        assert_eq!(FileFormat::from_file_name("left.parquet"), None);
        assert_eq!(FileFormat::from_file_name("left"), None);
    }

    #[test]
    fn test_split_stems() {
        let stems: Vec<_> = Split::ALL.iter().map(Split::stem).collect();
        assert_eq!(stems, vec!["train", "test", "valid"]);
        assert_eq!(Split::Valid.to_string(), "valid");
    }
}
