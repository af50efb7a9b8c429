// 模組定義
pub mod config;
pub mod data_ingestion;
pub mod domain_types;
pub mod joiner;
pub mod pipeline;
pub mod storage;
