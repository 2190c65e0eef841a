//! 批量转换器 - 编排层
//!
//! 逐个调用渲染器，上一个转换完全结束后才开始下一个，绝不并发。
//! 单个文件失败只记录下来，不影响后续文件。

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::infrastructure::Renderer;
use crate::services::FailureWriter;
use crate::utils::logging::{log_conversion_start, truncate_text};

/// 批量转换器
pub struct BatchConverter<R: Renderer> {
    renderer: R,
    failure_writer: Option<FailureWriter>,
}

impl<R: Renderer> BatchConverter<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            failure_writer: None,
        }
    }

    /// 失败项同时追加写入报告文件
    pub fn with_failure_writer(mut self, writer: FailureWriter) -> Self {
        self.failure_writer = Some(writer);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// 按顺序转换所有输入，返回失败的输入路径（保持输入顺序）
    pub async fn convert_all(&self, inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
        let total = inputs.len();
        let mut failed = Vec::new();

        for (index, input) in inputs.iter().enumerate() {
            let position = index + 1;
            log_conversion_start(position, total, input);

            match self.renderer.convert(input, output_dir).await {
                Ok(output) => {
                    info!("[转换 {}/{}] ✓ 已转换: {}", position, total, input.display());
                    if !output.diagnostics.is_empty() {
                        warn!(
                            "[转换 {}/{}] ⚠️ 渲染器诊断信息: {}",
                            position,
                            total,
                            truncate_text(&output.diagnostics, 500)
                        );
                    }
                    let expected = self.renderer.output_path(input, output_dir);
                    if !expected.exists() {
                        warn!(
                            "[转换 {}/{}] ⚠️ 未找到预期的输出文件: {}",
                            position,
                            total,
                            expected.display()
                        );
                    }
                }
                Err(e) => {
                    error!(
                        "[转换 {}/{}] ❌ 转换失败 {}: {}",
                        position,
                        total,
                        input.display(),
                        e
                    );
                    if let Some(writer) = &self.failure_writer {
                        if let Err(write_err) = writer.write_failure(input, &e.to_string()) {
                            warn!("无法写入报告文件 {}: {}", writer.path().display(), write_err);
                        }
                    }
                    failed.push(input.clone());
                }
            }
        }

        failed
    }
}
