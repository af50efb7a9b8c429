use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::joiner::{ColumnOrder, JoinOptions, MISSING_PLACEHOLDER};
use crate::pipeline::{BatchSettings, DEFAULT_OUTPUT_DIR};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 應用程序配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReformatConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub prompt: PromptConfig,
    pub batch: BatchConfig,
    pub log: LogConfig,
}

impl Validator for ReformatConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.output.validate()?;
        self.prompt.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

impl ReformatConfig {
    pub fn join_options(&self) -> JoinOptions {
        JoinOptions {
            missing_placeholder: self.prompt.missing_placeholder.clone(),
            column_order: self.prompt.column_order,
        }
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            output_dir: self.output.directory.clone(),
            join: self.join_options(),
            parallel: self.batch.parallel,
        }
    }
}

/// 輸入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// 資料集根目錄，每個子目錄是一個資料集
    pub root: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// 輸出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 根目錄下的輸出目錄名稱
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl Validator for OutputConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.directory, "output.directory")?;
        ValidationUtils::single_component(&self.directory, "output.directory")?;

        Ok(())
    }
}

/// 提示字串配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub missing_placeholder: String,
    pub column_order: ColumnOrder,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            missing_placeholder: MISSING_PLACEHOLDER.to_string(),
            column_order: ColumnOrder::default(),
        }
    }
}

impl Validator for PromptConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.missing_placeholder, "prompt.missing_placeholder")
    }
}

/// 批次配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// 是否平行處理多個資料集
    pub parallel: bool,
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "full".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase().as_str(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(
            &self.format.to_lowercase().as_str(),
            &["full", "compact"],
            "log.format",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReformatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.input.root, PathBuf::from("."));
        assert_eq!(config.output.directory, "reformatted");
    }

    #[test]
    fn test_batch_settings_follow_config() {
        let mut config = ReformatConfig::default();
        config.prompt.missing_placeholder = "?".to_string();
        config.batch.parallel = true;

        let settings = config.batch_settings();

        assert_eq!(settings.output_dir, "reformatted");
        assert_eq!(settings.join.missing_placeholder, "?");
        assert!(settings.parallel);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ReformatConfig::default();
        config.log.level = "verbose".to_string();
        assert_matches!(config.validate(), Err(ValidationError::InvalidValue(_)));
    }

    #[test]
    fn test_output_directory_must_be_single_component() {
        let mut config = ReformatConfig::default();
        config.output.directory = "out/nested".to_string();
        assert!(config.validate().is_err());

        config.output.directory = "  ".to_string();
        assert_matches!(config.validate(), Err(ValidationError::MissingField(_)));
    }
}
