use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docx_merge_pdf::utils::logging;
use docx_merge_pdf::{App, Config, RunMode, RunReport};
use tracing::error;

/// 致命错误（配置、模板、数据源、生成阶段）的退出码
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "docx-merge-pdf", version, about = "按 CSV 批量生成 docx 并转换为 PDF")]
struct Cli {
    /// TOML 配置文件
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 生成文档并转换为 PDF（默认）
    Run,
    /// 只生成文档
    Generate,
    /// 只转换目录中已有的文件
    Convert {
        /// 输入目录，默认为配置中的 docs_dir
        #[arg(long)]
        input_dir: Option<PathBuf>,
    },
}

fn run_mode(command: Option<Command>) -> RunMode {
    match command {
        None | Some(Command::Run) => RunMode::Run,
        Some(Command::Generate) => RunMode::Generate,
        Some(Command::Convert { input_dir }) => RunMode::Convert { input_dir },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref());

    // 初始化日志
    let verbose = cli.verbose || config.as_ref().is_ok_and(|c| c.verbose_logging);
    logging::init(verbose);

    match run(config, run_mode(cli.command)).await {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(
    config: Result<Config, docx_merge_pdf::error::ConfigError>,
    mode: RunMode,
) -> Result<RunReport> {
    let config = config.context("无法加载配置")?;

    // 初始化并运行应用
    let report = App::initialize(config)
        .run(mode)
        .await
        .context("运行终止")?;

    Ok(report)
}
