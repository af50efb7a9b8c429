/// 配置管理模組
///
/// 依序疊加內建預設值、`reformat.toml`（或 `--config` 指定的檔案）與
/// `REFORMAT_` 前綴的環境變數，後者覆寫前者。
pub mod loader;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};
pub use types::*;
pub use validation::{validate_config, ValidationError, ValidationUtils, Validator};
