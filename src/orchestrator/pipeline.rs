//! 运行管线 - 编排层
//!
//! 数据流：CSV → DocumentGenerator → 文档路径列表 → BatchConverter → RunReport
//!
//! 生成与转换是两个先后执行的阶段，输出目录在任一时刻只有一个写入者。

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, FileError};
use crate::infrastructure::SofficeRenderer;
use crate::models::{collect_input_files, CsvRowSource, Record, RowSource, RunReport};
use crate::orchestrator::{BatchConverter, DocumentGenerator};
use crate::services::FailureWriter;
use crate::utils::logging::{
    log_phase_start, log_records_loaded, log_startup, print_final_stats,
};

/// 运行模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// 生成文档后转换为 PDF
    Run,
    /// 只生成文档
    Generate,
    /// 只转换已有目录中的文件（默认为生成目录）
    Convert { input_dir: Option<PathBuf> },
}

/// 应用主结构
pub struct App {
    config: Config,
    failure_writer: FailureWriter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);

        let failure_writer = FailureWriter::new(&config.report_file);
        if let Err(e) = failure_writer.init() {
            warn!("⚠️ 无法初始化报告文件 {}: {}", config.report_file.display(), e);
        }

        Self {
            config,
            failure_writer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑
    ///
    /// 致命错误（配置、模板、数据源、生成、目录准备）直接返回 `Err`；
    /// 转换失败体现在返回的 `RunReport` 中。
    pub async fn run(&self, mode: RunMode) -> AppResult<RunReport> {
        let (total, report) = match mode {
            RunMode::Run => {
                ensure_dir(&self.config.docs_dir)?;
                ensure_dir(&self.config.pdf_dir)?;
                let generated = self.generate_documents()?;
                let total = generated.len();
                (total, self.convert_documents(&generated).await)
            }
            RunMode::Generate => {
                ensure_dir(&self.config.docs_dir)?;
                let generated = self.generate_documents()?;
                (generated.len(), RunReport::generation_only())
            }
            RunMode::Convert { input_dir } => {
                let input_dir = input_dir.unwrap_or_else(|| self.config.docs_dir.clone());
                ensure_dir(&self.config.pdf_dir)?;
                info!("\n📁 正在扫描待转换的文件: {}", input_dir.display());
                let inputs = collect_input_files(&input_dir).await?;
                let total = inputs.len();
                (total, self.convert_documents(&inputs).await)
            }
        };

        let summary = report.summary_lines();
        print_final_stats(total, &report, &self.config.report_file);
        if let Err(e) = self.failure_writer.write_summary(&summary) {
            warn!("⚠️ 无法写入报告文件 {}: {}", self.config.report_file.display(), e);
        }

        Ok(report)
    }

    /// 读取记录
    fn load_records(&self) -> AppResult<Vec<Record>> {
        info!("\n📁 正在读取数据表: {}", self.config.table_path.display());
        let source = CsvRowSource::new(&self.config.table_path)
            .with_delimiter(self.config.csv_delimiter as u8);
        Ok(source.read_records()?)
    }

    /// 生成阶段：任何错误都终止运行
    fn generate_documents(&self) -> AppResult<Vec<PathBuf>> {
        let generator = DocumentGenerator::from_config(&self.config)?;
        let records = self.load_records()?;

        if records.is_empty() {
            warn!("⚠️ 数据表中没有记录，不生成任何文档");
            return Ok(Vec::new());
        }

        log_records_loaded(records.len());
        log_phase_start("生成文档", &self.config.docs_dir);
        Ok(generator.generate(&records, &self.config.docs_dir)?)
    }

    /// 转换阶段：失败只记录
    async fn convert_documents(&self, inputs: &[PathBuf]) -> RunReport {
        if inputs.is_empty() {
            warn!("⚠️ 没有需要转换的文件");
            return RunReport::default();
        }

        log_phase_start("转换为 PDF", &self.config.pdf_dir);
        let converter = BatchConverter::new(SofficeRenderer::from_config(&self.config.renderer))
            .with_failure_writer(self.failure_writer.clone());
        let failed = converter.convert_all(inputs, &self.config.pdf_dir).await;
        RunReport::summarize(failed)
    }
}

/// 目录不存在时递归创建
fn ensure_dir(path: &Path) -> Result<(), FileError> {
    std::fs::create_dir_all(path).map_err(|source| FileError::CreateDirFailed {
        path: path.to_path_buf(),
        source,
    })
}
