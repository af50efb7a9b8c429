use crate::config::types::ReformatConfig;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::debug;

/// 未指定配置檔時，於工作目錄中尋找的檔名
pub const DEFAULT_CONFIG_FILE: &str = "reformat.toml";

/// 環境變數前綴，例如 `REFORMAT_LOG__LEVEL=debug`
pub const ENV_PREFIX: &str = "REFORMAT";

/// 配置加載器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 組合配置來源
    ///
    /// 指定路徑時該檔案必須存在；否則 `reformat.toml` 為可選。
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config_builder = Config::builder();

        config_builder = match path {
            Some(path) => config_builder.add_source(File::from(path).required(true)),
            None => config_builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        // 從環境變數加載配置（優先級高於文件配置）
        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config_builder.build()
    }
}

impl ReformatConfig {
    /// 加載並反序列化配置，缺少的欄位使用預設值
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("加載配置: {:?}", path);
        ConfigLoader::load(path)?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joiner::ColumnOrder;
    use std::fs;

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[output]
directory = "prompts"

[prompt]
column_order = "source"

[batch]
parallel = true
"#,
        )
        .unwrap();

        let config = ReformatConfig::load(Some(&path)).unwrap();

        assert_eq!(config.output.directory, "prompts");
        assert_eq!(config.prompt.column_order, ColumnOrder::Source);
        assert!(config.batch.parallel);
        // 未指定的欄位維持預設值
        assert_eq!(config.prompt.missing_placeholder, "NA");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReformatConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }
}
