//! 資料集檔案的定位與載入
//!
//! 依檔名主幹找到實際檔案（不限副檔名），再依格式解析為統一的
//! [`Table`](crate::domain_types::Table)。

pub mod error;
pub mod loader;
pub mod processor;
pub mod resolver;

pub use error::{IngestionError, IngestionResult};
pub use loader::{load_table, TableLoader};
pub use resolver::{DirectoryResolver, FileResolver, MemoryResolver};
