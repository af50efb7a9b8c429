//! 檔名主幹 → 實際檔案的解析
//!
//! 解析規則：候選檔案為所有以主幹開頭、且不是隱藏檔的檔名，必須剛好一個。

use super::error::{IngestionError, IngestionResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// 檔案來源能力：給定主幹找出唯一檔名，並讀取其內容
pub trait FileResolver {
    /// 回傳唯一符合 `stem` 前綴的檔名
    fn resolve(&self, stem: &str) -> IngestionResult<String>;

    /// 讀取 `resolve` 回傳的檔案內容
    fn read(&self, file_name: &str) -> IngestionResult<Vec<u8>>;

    /// 來源描述，用於錯誤訊息與日誌
    fn location(&self) -> String;
}

/// 從候選檔名中挑出唯一以 `stem` 開頭的檔名
pub fn select_unique<'a, I>(stem: &str, names: I, location: &str) -> IngestionResult<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: Vec<String> = names
        .into_iter()
        .filter(|name| !name.starts_with('.') && name.starts_with(stem))
        .map(str::to_string)
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(IngestionError::NotFound {
            stem: stem.to_string(),
            location: location.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(IngestionError::AmbiguousMatch {
            stem: stem.to_string(),
            location: location.to_string(),
            candidates,
        }),
    }
}

/// 磁碟目錄上的檔案來源
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileResolver for DirectoryResolver {
    fn resolve(&self, stem: &str) -> IngestionResult<String> {
        let location = self.location();
        let entries =
            fs::read_dir(&self.root).map_err(|e| IngestionError::io(location.clone(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| IngestionError::io(location.clone(), e))?;
            // 跟隨符號連結，與資料集目錄的判斷一致
            if entry.path().is_file() {
                // 非 UTF-8 檔名不可能符合主幹，直接略過
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }

        let file = select_unique(stem, names.iter().map(String::as_str), &location)?;
        debug!("解析檔案: {} -> {}", stem, self.root.join(&file).display());
        Ok(file)
    }

    fn read(&self, file_name: &str) -> IngestionResult<Vec<u8>> {
        let path = self.root.join(file_name);
        fs::read(&path).map_err(|e| IngestionError::io(path.display().to_string(), e))
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// 記憶體中的檔案來源，用於測試
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    name: String,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn with_file(mut self, file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(file_name.into(), contents.into());
        self
    }
}

impl FileResolver for MemoryResolver {
    fn resolve(&self, stem: &str) -> IngestionResult<String> {
        select_unique(stem, self.files.keys().map(String::as_str), &self.name)
    }

    fn read(&self, file_name: &str) -> IngestionResult<Vec<u8>> {
        self.files.get(file_name).cloned().ok_or_else(|| {
            IngestionError::io(
                format!("{}/{}", self.name, file_name),
                std::io::Error::new(std::io::ErrorKind::NotFound, "檔案不存在"),
            )
        })
    }

    fn location(&self) -> String {
        self.name.clone()
    }
}
