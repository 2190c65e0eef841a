use std::path::PathBuf;

/// 运行报告
///
/// 生成阶段出错时整个运行直接终止，所以 `failed_generations` 目前总是空的；
/// 转换失败按输入顺序记录在 `failed_conversions` 中。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub failed_generations: Vec<PathBuf>,
    pub failed_conversions: Vec<PathBuf>,
    /// 本次运行只生成文档，没有转换阶段
    pub generation_only: bool,
}

impl RunReport {
    /// 汇总转换失败列表
    pub fn summarize(failed_conversions: Vec<PathBuf>) -> Self {
        Self {
            failed_generations: Vec::new(),
            failed_conversions,
            generation_only: false,
        }
    }

    /// 只生成文档、未执行转换时的报告
    pub fn generation_only() -> Self {
        Self {
            generation_only: true,
            ..Self::default()
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_generations.is_empty() && self.failed_conversions.is_empty()
    }

    /// 所有失败项，生成失败在前，转换失败在后
    pub fn failures(&self) -> Vec<PathBuf> {
        self.failed_generations
            .iter()
            .chain(self.failed_conversions.iter())
            .cloned()
            .collect()
    }

    /// 进程退出码：0 = 全部成功，1 = 存在失败项
    pub fn exit_code(&self) -> u8 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }

    /// 人类可读的结果摘要
    pub fn summary_lines(&self) -> Vec<String> {
        if self.all_succeeded() {
            let line = if self.generation_only {
                "所有文档均已生成（未执行 PDF 转换）"
            } else {
                "所有文件均已成功转换"
            };
            return vec![line.to_string()];
        }

        let mut lines = vec!["以下文件未能转换:".to_string()];
        lines.extend(
            self.failures()
                .iter()
                .map(|path| format!("  - {}", path.display())),
        );
        lines
    }
}
