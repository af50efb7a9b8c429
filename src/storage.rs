//! 組合結果的 CSV 輸出
//!
//! 先寫入同目錄下的暫存檔，成功後才改名為目標檔，失敗時不留下寫到一半的檔案。

use crate::joiner::{JoinedRow, LABEL_COLUMN, PROMPT_COLUMN};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, PersistError};
use thiserror::Error;
use tracing::debug;

/// 輸出錯誤類型
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("檔案寫入錯誤 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 寫入錯誤 ({}): {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("無法將暫存檔改名為 {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// 寫出 `prompt,label` 兩欄的 CSV（含標題行、不含索引欄）
pub fn write_joined_csv(path: &Path, rows: &[JoinedRow]) -> StorageResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_error = |source: csv::Error| StorageError::Csv {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    let mut temp = NamedTempFile::new_in(dir).map_err(io_error)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(temp.as_file_mut());
        writer
            .write_record([PROMPT_COLUMN, LABEL_COLUMN])
            .map_err(csv_error)?;
        for row in rows {
            writer
                .write_record([row.prompt.as_str(), row.label.as_str()])
                .map_err(csv_error)?;
        }
        writer.flush().map_err(io_error)?;
    }

    temp.persist(path).map_err(|source| StorageError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("寫入 {}: {} 列", path.display(), rows.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::Label;

    fn rows() -> Vec<JoinedRow> {
        vec![
            JoinedRow {
                prompt: "LEFT id: 1\nRIGHT id: 1\n\nLEFT name: \"a, b\"\nRIGHT name: NA\n".to_string(),
                label: Label::Match,
            },
            JoinedRow {
                prompt: "LEFT id: 2\nRIGHT id: 3\n".to_string(),
                label: Label::NonMatch,
            },
        ]
    }

    #[test]
    fn test_written_csv_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("train.csv");

        write_joined_csv(&path, &rows()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["prompt", "label"]);

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], rows()[0].prompt.as_str());
        assert_eq!(&records[0][1], "y");
        assert_eq!(&records[1][1], "n");
    }

    #[test]
    fn test_no_temporary_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid.csv");

        write_joined_csv(&path, &rows()).unwrap();
        write_joined_csv(&path, &rows()[..1]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("valid.csv")]);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("prompt,label\n\"LEFT id: 1\n"));
        assert!(!contents.contains("LEFT id: 2"));
    }

    #[test]
    fn test_empty_rows_write_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");

        write_joined_csv(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "prompt,label\n");
    }
}
