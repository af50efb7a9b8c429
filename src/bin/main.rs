//! 將實體配對資料集重整為 `prompt,label` CSV
//!
//! 在資料集根目錄執行，不需任何參數：每個非隱藏子目錄視為一個資料集，
//! 結果寫到 `reformatted/<dataset>/{train,test,valid}.csv`。

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use prompt_reformat::config::{validate_config, LogConfig, ReformatConfig};
use prompt_reformat::pipeline::{run_batch, BatchReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "reformat", about = "Reformat entity-matching datasets into prompt/label CSV files")]
struct Args {
    /// 資料集根目錄（預設為目前目錄）
    #[arg(long)]
    root: Option<PathBuf>,

    /// 根目錄下的輸出目錄名稱
    #[arg(long)]
    output_dir: Option<String>,

    /// 配置檔路徑（未指定時讀取可選的 reformat.toml）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 平行處理多個資料集
    #[arg(long)]
    parallel: bool,

    /// 日誌級別: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::from(2);
        }
    };

    if let Err(err) = init_logging(&config.log) {
        eprintln!("{:#}", err);
        return ExitCode::from(2);
    }

    match run(&config) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        // 個別失敗已由 run_batch 記錄
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}

fn load_config(args: &Args) -> Result<ReformatConfig> {
    let mut config = ReformatConfig::load(args.config.as_deref()).context("無法加載配置")?;

    // 命令列參數優先於配置檔與環境變數
    if let Some(root) = &args.root {
        config.input.root = root.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output.directory = output_dir.clone();
    }
    if args.parallel {
        config.batch.parallel = true;
    }
    if let Some(level) = &args.log_level {
        config.log.level = level.clone();
    }

    validate_config(&config).context("配置驗證失敗")?;
    Ok(config)
}

fn run(config: &ReformatConfig) -> Result<BatchReport> {
    let root = &config.input.root;
    info!("資料集根目錄: {}", root.display());

    run_batch(root, &config.batch_settings())
        .with_context(|| format!("無法處理資料集根目錄 {}", root.display()))
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<()> {
    // RUST_LOG 優先於配置中的級別
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_config.level.to_lowercase()));
    let builder = FmtSubscriber::builder().with_env_filter(filter);

    let result = match log_config.format.to_lowercase().as_str() {
        "compact" => tracing::subscriber::set_global_default(builder.compact().finish()),
        _ => tracing::subscriber::set_global_default(builder.finish()),
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))
}
