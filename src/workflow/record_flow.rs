//! 单条记录处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 为记录构建替换规则
//! 2. 从模板原始文本出发执行替换
//! 3. 复制模板压缩包、替换部件、序列化
//! 4. 按键字段命名并写入输出目录（已存在则覆盖）

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::GenerationError;
use crate::models::{Record, RuleSet, Template};
use crate::services::TemplateEngine;
use crate::workflow::RecordCtx;

static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("文件名字符正则无效"));

/// 由键值得到输出文件名
///
/// 不能出现在文件名中的字符替换为 `_`，键值不会跳出输出目录。
pub fn file_name_for_key(key: &str, extension: &str) -> String {
    let safe = INVALID_FILENAME_CHARS.replace_all(key.trim(), "_");
    format!("{}.{}", safe, extension.trim_start_matches('.'))
}

/// 单条记录处理流程
///
/// 不持有可变状态，所有记录共用一个实例。
pub struct RecordFlow<'a> {
    template: &'a Template,
    rules: &'a RuleSet,
    extension: &'a str,
}

impl<'a> RecordFlow<'a> {
    pub fn new(template: &'a Template, rules: &'a RuleSet, extension: &'a str) -> Self {
        Self {
            template,
            rules,
            extension,
        }
    }

    /// 生成一条记录的文档，返回写入路径
    pub fn run(
        &self,
        record: &Record,
        ctx: &RecordCtx,
        output_dir: &Path,
    ) -> Result<PathBuf, GenerationError> {
        let rules = self.rules.rules_for(record);
        debug!("{} 应用 {} 条替换规则", ctx, rules.len());
        for rule in &rules {
            debug!("{} '{}' → '{}'", ctx, rule.marker, rule.replacement);
        }

        let markup = TemplateEngine::apply(self.template.markup(), &rules);

        let bytes = self
            .template
            .render(markup)
            .map_err(|source| GenerationError::Archive {
                key: ctx.key.clone(),
                source,
            })?;

        let path = output_dir.join(file_name_for_key(&ctx.key, self.extension));
        std::fs::write(&path, bytes).map_err(|source| GenerationError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        info!("{} ✓ 已生成: {}", ctx, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_for_key() {
        assert_eq!(file_name_for_key("2000720", "docx"), "2000720.docx");
        assert_eq!(file_name_for_key(" K1 ", ".docx"), "K1.docx");
        assert_eq!(file_name_for_key("A/B:C", "docx"), "A_B_C.docx");
        assert_eq!(file_name_for_key("..\\x", "odt"), ".._x.odt");
    }

    #[test]
    fn test_ctx_display() {
        let ctx = RecordCtx::new(2, 3, "K2");
        assert_eq!(ctx.to_string(), "[记录 2/3 键 K2]");
    }
}
