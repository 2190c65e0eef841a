//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::RunReport;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，详细模式为 `debug`。
/// 重复调用是安全的（测试中常见）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档批量生成与转换");
    info!("📄 模板: {}", config.template_path.display());
    info!("📊 数据表: {}", config.table_path.display());
    info!("🖨️ 渲染器: {}", config.renderer.program.display());
    info!("{}", "=".repeat(60));
}

/// 记录数据加载信息
pub fn log_records_loaded(total: usize) {
    info!("✓ 找到 {} 条待处理的记录", total);
}

/// 记录阶段开始信息
pub fn log_phase_start(phase: &str, output_dir: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始{}", phase);
    info!("📂 输出目录: {}", output_dir.display());
    info!("{}", "=".repeat(60));
}

/// 记录单个文件转换开始
pub fn log_conversion_start(position: usize, total: usize, input: &Path) {
    info!("\n{}", "─".repeat(30));
    info!("[转换 {}/{}] 正在转换: {}", position, total, input.display());
}

/// 打印最终统计信息
pub fn print_final_stats(total: usize, report: &RunReport, report_path: &Path) {
    let failed = report.failures().len();

    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", total.saturating_sub(failed), total);
    info!("❌ 失败: {}", failed);

    if report.all_succeeded() {
        info!("{}", report.summary_lines().join("\n"));
    } else {
        for line in report.summary_lines() {
            error!("{}", line);
        }
    }

    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
