//! 外部渲染器 - 基础设施层
//!
//! 持有渲染器（LibreOffice soffice）的调用方式，只暴露"转换一个文件"的能力。
//! soffice 是单实例程序，同一用户配置下不能并发调用，
//! 所以调用方必须保证同一时刻最多只有一个 `convert` 在执行。

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::RendererConfig;
use crate::error::RenderError;

/// 一次成功转换的附带信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// 渲染器在 stderr 输出的诊断信息，可能为空
    pub diagnostics: String,
}

/// 渲染器
#[async_trait]
pub trait Renderer: Send + Sync {
    /// 把 `input` 转换到 `output_dir` 中，等待进程结束后返回
    async fn convert(&self, input: &Path, output_dir: &Path) -> Result<RenderOutput, RenderError>;

    /// 转换结果的预期路径
    fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf;
}

/// LibreOffice 命令行渲染器
///
/// 调用形式：`soffice --headless --convert-to pdf <input> --outdir <dir>`
#[derive(Debug, Clone)]
pub struct SofficeRenderer {
    program: PathBuf,
    target_format: String,
    timeout: Option<Duration>,
    extra_args: Vec<String>,
}

impl SofficeRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            target_format: "pdf".to_string(),
            timeout: None,
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            program: config.program.clone(),
            target_format: config.target_format.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            extra_args: config.extra_args.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_target_format(mut self, target_format: impl Into<String>) -> Self {
        self.target_format = target_format.into();
        self
    }

    /// 目标扩展名：`pdf:writer_pdf_Export` → `pdf`
    pub fn target_extension(&self) -> &str {
        self.target_format
            .split(':')
            .next()
            .unwrap_or(&self.target_format)
    }

    /// 构建命令行参数
    pub fn command_args(&self, input: &Path, output_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--headless".into(),
            "--convert-to".into(),
            self.target_format.clone().into(),
        ];
        args.extend(self.extra_args.iter().map(OsString::from));
        args.push(input.as_os_str().to_os_string());
        args.push("--outdir".into());
        args.push(output_dir.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl Renderer for SofficeRenderer {
    async fn convert(&self, input: &Path, output_dir: &Path) -> Result<RenderOutput, RenderError> {
        let mut command = Command::new(&self.program);
        command
            .args(self.command_args(input, output_dir))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("执行: {} {:?}", self.program.display(), self.command_args(input, output_dir));

        // 超时后 future 被丢弃，kill_on_drop 会结束子进程
        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, command.output())
                .await
                .map_err(|_| RenderError::Timeout {
                    secs: timeout.as_secs(),
                })?,
            None => command.output().await,
        }
        .map_err(|source| RenderError::SpawnFailed {
            program: self.program.display().to_string(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(RenderError::ExitFailure {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(RenderOutput {
            diagnostics: stderr,
        })
    }

    fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default();
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(self.target_extension());
        output_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args() {
        let renderer = SofficeRenderer::new("soffice");
        let args = renderer.command_args(Path::new("out/K1.docx"), Path::new("pdfs"));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(
            args,
            vec!["--headless", "--convert-to", "pdf", "out/K1.docx", "--outdir", "pdfs"]
        );
    }

    #[test]
    fn test_extra_args_come_before_input() {
        let config = RendererConfig {
            program: PathBuf::from("soffice"),
            target_format: "pdf:writer_pdf_Export".to_string(),
            timeout_secs: Some(5),
            extra_args: vec!["--norestore".to_string()],
        };
        let renderer = SofficeRenderer::from_config(&config);
        let args = renderer.command_args(Path::new("a.docx"), Path::new("pdfs"));
        assert_eq!(args[3], OsString::from("--norestore"));
        assert_eq!(args[4], OsString::from("a.docx"));
        assert_eq!(renderer.target_extension(), "pdf");
    }

    #[test]
    fn test_output_path_uses_input_stem() {
        let renderer = SofficeRenderer::new("soffice");
        assert_eq!(
            renderer.output_path(Path::new("output/2000720.docx"), Path::new("outputpdfs")),
            PathBuf::from("outputpdfs/2000720.pdf")
        );
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SofficeRenderer::new(dir.path().join("no-such-soffice"));
        let result = renderer
            .convert(&dir.path().join("a.docx"), dir.path())
            .await;
        assert!(matches!(result, Err(RenderError::SpawnFailed { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure_and_stderr_is_kept() {
        let renderer = SofficeRenderer::new("sh");
        // sh 会把 --headless 当作非法选项，以非零状态退出
        let result = renderer.convert(Path::new("a.docx"), Path::new(".")).await;
        assert!(matches!(result, Err(RenderError::ExitFailure { .. })));
    }
}
