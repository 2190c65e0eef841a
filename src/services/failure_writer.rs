//! 运行报告写入服务 - 业务能力层
//!
//! 只负责把运行信息追加写入报告文件，不关心流程

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// 报告文件写入服务
///
/// 写入失败只影响报告文件本身，由调用方决定是否记录日志，不会中断转换。
#[derive(Debug, Clone)]
pub struct FailureWriter {
    report_path: PathBuf,
}

impl FailureWriter {
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: report_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.report_path
    }

    /// 创建（覆盖）报告文件并写入带时间戳的表头
    pub fn init(&self) -> io::Result<()> {
        let header = format!(
            "{}\n文档生成与转换报告 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        fs::write(&self.report_path, header)
    }

    /// 记录一个转换失败的文件
    pub fn write_failure(&self, input: &Path, reason: &str) -> io::Result<()> {
        debug!("写入失败记录: {}", input.display());
        self.append(&format!("转换失败 | {} | {}\n", input.display(), reason))
    }

    /// 追加最终摘要
    pub fn write_summary(&self, lines: &[String]) -> io::Result<()> {
        let mut text = String::from("\n");
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        self.append(&text)
    }

    fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_path)?;
        file.write_all(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FailureWriter::new(dir.path().join("report.txt"));

        writer.init().unwrap();
        writer.write_failure(Path::new("output/K2.docx"), "exit 1").unwrap();
        writer.write_summary(&["以下文件未能转换:".to_string()]).unwrap();

        let content = fs::read_to_string(writer.path()).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("转换失败 | output/K2.docx | exit 1"));
        assert!(content.trim_end().ends_with("以下文件未能转换:"));
    }

    #[test]
    fn test_init_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FailureWriter::new(dir.path().join("report.txt"));

        writer.init().unwrap();
        writer.write_failure(Path::new("old.docx"), "boom").unwrap();
        writer.init().unwrap();

        let content = fs::read_to_string(writer.path()).unwrap();
        assert!(!content.contains("old.docx"));
    }
}
