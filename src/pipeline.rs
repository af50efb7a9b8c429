//! 資料集批次重整
//!
//! 每個資料集目錄各自載入 `left`、`right` 與三個索引檔，組合後寫到
//! `<root>/<output>/<dataset>/{train,test,valid}.csv`。單一資料集失敗不影響其他資料集。

use crate::data_ingestion::{FileResolver, IngestionError, TableLoader};
use crate::domain_types::{Split, LEFT_STEM, RIGHT_STEM};
use crate::joiner::{JoinError, JoinOptions, JoinedRow, PairJoiner};
use crate::storage::{write_joined_csv, StorageError};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// 預設輸出目錄名稱
pub const DEFAULT_OUTPUT_DIR: &str = "reformatted";

/// 重整錯誤類型
#[derive(Error, Debug)]
pub enum ReformatError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    #[error("{split} 組合失敗: {source}")]
    Join {
        split: Split,
        #[source]
        source: JoinError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("目錄讀取錯誤 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ReformatResult<T> = Result<T, ReformatError>;

/// 一個資料集三個切分的組合結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReformattedDataset {
    splits: BTreeMap<Split, Vec<JoinedRow>>,
}

impl ReformattedDataset {
    pub fn split(&self, split: Split) -> Option<&[JoinedRow]> {
        self.splits.get(&split).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Split, &[JoinedRow])> {
        self.splits.iter().map(|(split, rows)| (*split, rows.as_slice()))
    }
}

/// 載入一個資料集的所有表格並組合三個切分
///
/// 所有切分都組合成功才回傳，任何一步失敗都不會產生部分結果。
pub fn reformat_dataset<R: FileResolver>(
    loader: &TableLoader<R>,
    joiner: &PairJoiner,
) -> ReformatResult<ReformattedDataset> {
    let right = loader.load_entity(RIGHT_STEM)?;
    let left = loader.load_entity(LEFT_STEM)?;

    let mut splits = BTreeMap::new();
    for split in Split::ALL {
        let index = loader.load_index(split.stem())?;
        let rows = joiner
            .join_rows(&index, &left, &right)
            .map_err(|source| ReformatError::Join { split, source })?;
        info!("Rows in {}: {}", split, rows.len());
        splits.insert(split, rows);
    }

    Ok(ReformattedDataset { splits })
}

/// 將組合結果寫到 `out_dir/<split>.csv`
pub fn write_dataset(dataset: &ReformattedDataset, out_dir: &Path) -> ReformatResult<()> {
    for (split, rows) in dataset.iter() {
        let path = out_dir.join(format!("{}.csv", split.stem()));
        write_joined_csv(&path, rows)?;
    }
    Ok(())
}

/// 列出 `root` 下所有非隱藏的子目錄（排除輸出目錄），依名稱排序
pub fn discover_datasets(root: &Path, output_dir: &str) -> ReformatResult<Vec<String>> {
    let io_error = |source: std::io::Error| ReformatError::Io {
        path: root.to_path_buf(),
        source,
    };

    let mut datasets = Vec::new();
    for entry in fs::read_dir(root).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if !entry.path().is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') || name == output_dir {
            continue;
        }
        datasets.push(name);
    }

    datasets.sort();
    Ok(datasets)
}

/// 批次處理設定
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub output_dir: String,
    pub join: JoinOptions,
    pub parallel: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            join: JoinOptions::default(),
            parallel: false,
        }
    }
}

#[derive(Debug)]
pub struct DatasetFailure {
    pub dataset: String,
    pub error: ReformatError,
}

/// 批次結果，成功與失敗都依資料集名稱排序
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<DatasetFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 處理單一資料集目錄並寫出結果
pub fn process_dataset(
    root: &Path,
    name: &str,
    settings: &BatchSettings,
    joiner: &PairJoiner,
) -> ReformatResult<()> {
    info!("Reformatting {}", name);
    let loader = TableLoader::from_dir(root.join(name));
    let dataset = reformat_dataset(&loader, joiner)?;
    write_dataset(&dataset, &root.join(&settings.output_dir).join(name))
}

/// 處理 `root` 下的所有資料集
///
/// 只有列出資料集目錄失敗時回傳錯誤；個別資料集的錯誤記錄在報告中。
pub fn run_batch(root: &Path, settings: &BatchSettings) -> ReformatResult<BatchReport> {
    let datasets = discover_datasets(root, &settings.output_dir)?;
    info!("找到 {} 個資料集: {:?}", datasets.len(), datasets);

    let joiner = PairJoiner::new(settings.join.clone());
    let process = |name: String| {
        let outcome = process_dataset(root, &name, settings, &joiner);
        (name, outcome)
    };

    let outcomes: Vec<(String, ReformatResult<()>)> = if settings.parallel {
        datasets.into_par_iter().map(process).collect()
    } else {
        datasets.into_iter().map(process).collect()
    };

    let mut report = BatchReport::default();
    for (dataset, outcome) in outcomes {
        match outcome {
            Ok(()) => report.succeeded.push(dataset),
            Err(error) => {
                error!("資料集 {} 處理失敗: {}", dataset, error);
                report.failed.push(DatasetFailure { dataset, error });
            }
        }
    }

    info!(
        "批次完成: 成功 {} 個, 失敗 {} 個",
        report.succeeded.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_ingestion::MemoryResolver;
    use crate::domain_types::Label;
    use assert_matches::assert_matches;

    fn resolver() -> MemoryResolver {
        MemoryResolver::new("shoes")
            .with_file("left.csv", "id,name\n1,runner\n2,boot\n")
            .with_file("right.json", r#"[{"id": 1, "price": 50}, {"id": 2, "price": null}]"#)
            .with_file("train.csv", "0,0,1\n1,0,0\n")
            .with_file("test.csv", "1,1,1\n")
            .with_file("valid.csv", "0,1,0\n")
    }

    #[test]
    fn test_reformat_dataset_from_memory() {
        let loader = TableLoader::new(resolver());

        let dataset = reformat_dataset(&loader, &PairJoiner::default()).unwrap();

        let train = dataset.split(Split::Train).unwrap();
        assert_eq!(train.len(), 2);
        assert_eq!(train[0].label, Label::Match);
        assert_eq!(
            train[0].prompt,
            "LEFT id: 1\nRIGHT id: 1\n\nLEFT name: runner\nRIGHT name: NA\n\nLEFT price: NA\nRIGHT price: 50\n"
        );
        assert_eq!(dataset.split(Split::Test).unwrap().len(), 1);
        assert!(dataset
            .split(Split::Test)
            .unwrap()[0]
            .prompt
            .contains("RIGHT price: NA\n"));
        assert_eq!(dataset.split(Split::Valid).unwrap()[0].label, Label::NonMatch);
    }

    #[test]
    fn test_join_error_names_split() {
        let loader = TableLoader::new(resolver().with_file("valid.csv", "0,5,0\n"));

        let err = reformat_dataset(&loader, &PairJoiner::default()).unwrap_err();

        assert_matches!(err, ReformatError::Join { split: Split::Valid, .. });
        assert!(err.to_string().contains("valid"));
    }

    #[test]
    fn test_missing_index_file() {
        let loader = TableLoader::new(
            MemoryResolver::new("partial")
                .with_file("left.csv", "id\n1\n")
                .with_file("right.csv", "id\n1\n"),
        );

        let err = reformat_dataset(&loader, &PairJoiner::default()).unwrap_err();

        assert_matches!(
            err,
            ReformatError::Ingestion(IngestionError::NotFound { stem, .. }) => assert_eq!(stem, "train")
        );
    }

    #[test]
    fn test_discover_datasets_skips_hidden_and_output() {
        let root = tempfile::tempdir().unwrap();
        for dir in ["beer", "amazon_google", ".git", DEFAULT_OUTPUT_DIR] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        fs::write(root.path().join("notes.txt"), "x").unwrap();

        let datasets = discover_datasets(root.path(), DEFAULT_OUTPUT_DIR).unwrap();

        assert_eq!(datasets, vec!["amazon_google", "beer"]);
    }
}
