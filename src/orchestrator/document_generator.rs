//! 文档生成器 - 编排层
//!
//! 遍历所有记录，委托 `RecordFlow` 生成单个文档。
//! 任何一条记录写入失败都会终止整个生成阶段：已写出的文件保留在磁盘上，
//! 重新运行即可覆盖。

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::{GenerationError, TemplateLoadError};
use crate::models::{Record, RuleSet, Template};
use crate::workflow::{RecordCtx, RecordFlow};

/// 文档生成器
pub struct DocumentGenerator {
    template: Template,
    rules: RuleSet,
    key_field: String,
    extension: String,
}

impl DocumentGenerator {
    pub fn new(
        template: Template,
        rules: RuleSet,
        key_field: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            template,
            rules,
            key_field: key_field.into(),
            extension: extension.into(),
        }
    }

    /// 按配置加载模板（只加载一次）
    pub fn from_config(config: &Config) -> Result<Self, TemplateLoadError> {
        let template = Template::load(&config.template_path, &config.markup_part)?;
        info!(
            "✓ 模板已加载: {} ({})",
            template.path().display(),
            template.markup_part()
        );
        Ok(Self::new(
            template,
            RuleSet::new(config.rules.clone()),
            config.key_field.clone(),
            config.document_extension.clone(),
        ))
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// 为每条记录生成一个文档，按记录顺序返回路径
    ///
    /// 两条记录键值相同时，后者覆盖前者的文件。
    pub fn generate(
        &self,
        records: &[Record],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, GenerationError> {
        let flow = RecordFlow::new(&self.template, &self.rules, &self.extension);
        let total = records.len();
        let mut generated = Vec::with_capacity(total);

        for (index, record) in records.iter().enumerate() {
            let row = index + 1;
            let key = record
                .get(&self.key_field)
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| GenerationError::MissingKey {
                    row,
                    field: self.key_field.clone(),
                })?;

            let ctx = RecordCtx::new(row, total, key);
            generated.push(flow.run(record, &ctx, output_dir)?);
        }

        Ok(generated)
    }
}
