use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::RuleSpec;

/// 程序配置文件
///
/// 所有字段都有默认值，TOML 文件中只需写出要覆盖的部分。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 模板文档路径
    pub template_path: PathBuf,
    /// CSV 数据表路径
    pub table_path: PathBuf,
    /// CSV 分隔符
    pub csv_delimiter: char,
    /// 生成文档的输出目录
    pub docs_dir: PathBuf,
    /// 转换结果（PDF）的输出目录
    pub pdf_dir: PathBuf,
    /// 压缩包中存放标记文本的部件
    pub markup_part: String,
    /// 生成文档的扩展名
    pub document_extension: String,
    /// 用于命名输出文件的字段
    pub key_field: String,
    /// 替换规则，按声明顺序执行
    pub rules: Vec<RuleSpec>,
    /// 渲染器配置
    pub renderer: RendererConfig,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行报告文件
    pub report_file: PathBuf,
}

/// 渲染器（LibreOffice soffice）配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// 可执行文件路径
    pub program: PathBuf,
    /// `--convert-to` 的目标格式，可带过滤器后缀（如 `pdf:writer_pdf_Export`）
    pub target_format: String,
    /// 单个文件的转换超时，未设置时无限等待
    pub timeout_secs: Option<u64>,
    /// 附加参数，放在输入文件之前
    pub extra_args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        let program = if cfg!(windows) {
            r"C:\Program Files (x86)\LibreOffice\program\soffice.exe"
        } else {
            "soffice"
        };
        Self {
            program: PathBuf::from(program),
            target_format: "pdf".to_string(),
            timeout_secs: None,
            extra_args: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("documento.docx"),
            table_path: PathBuf::from("filas.csv"),
            csv_delimiter: ',',
            docs_dir: PathBuf::from("output"),
            pdf_dir: PathBuf::from("outputpdfs"),
            markup_part: "word/document.xml".to_string(),
            document_extension: "docx".to_string(),
            key_field: "Referencia Material".to_string(),
            rules: vec![
                RuleSpec::field("2000720", "Referencia Material"),
                RuleSpec::field("FAR AWAY F", "Identificador Substancia"),
                RuleSpec::literal("Especificaciones técnicas", "Ficha Técnica"),
                RuleSpec::field("MEZCLA DE:", "mezcla").with_prefix("MEZCLA DE: "),
            ],
            renderer: RendererConfig::default(),
            verbose_logging: false,
            report_file: PathBuf::from("report.txt"),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量，最后校验
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖路径类配置
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("MERGE_TEMPLATE") {
            self.template_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("MERGE_TABLE") {
            self.table_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("MERGE_DOCS_DIR") {
            self.docs_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("MERGE_PDF_DIR") {
            self.pdf_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SOFFICE_PATH") {
            self.renderer.program = PathBuf::from(v);
        }
        if let Some(v) = lookup("CONVERT_TIMEOUT_SECS") {
            let secs = v.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "CONVERT_TIMEOUT_SECS".to_string(),
                value: v.clone(),
                expected_type: "u64".to_string(),
            })?;
            self.renderer.timeout_secs = Some(secs);
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = v.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "VERBOSE_LOGGING".to_string(),
                value: v.clone(),
                expected_type: "bool".to_string(),
            })?;
        }
        Ok(self)
    }

    /// 校验配置，只检查"存在性"，不检查模板或数据内容
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_field.trim().is_empty() {
            return Err(invalid("key_field", "不能为空"));
        }
        if self.markup_part.trim().is_empty() {
            return Err(invalid("markup_part", "不能为空"));
        }
        if self.document_extension.trim().is_empty() {
            return Err(invalid("document_extension", "不能为空"));
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(invalid("csv_delimiter", "必须是 ASCII 字符"));
        }
        if self.renderer.target_format.trim().is_empty() {
            return Err(invalid("renderer.target_format", "不能为空"));
        }
        if self.renderer.timeout_secs == Some(0) {
            return Err(invalid("renderer.timeout_secs", "必须大于 0"));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            rule.validate()
                .map_err(|reason| invalid(&format!("rules[{}]", index), &reason))?;
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rules.len(), 4);
        assert_eq!(config.markup_part, "word/document.xml");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            table_path = "data/materials.csv"
            key_field = "code"

            [renderer]
            timeout_secs = 90

            [[rules]]
            marker = "TPL_KEY"
            field = "code"
            "#,
        )
        .unwrap();

        assert_eq!(config.table_path, PathBuf::from("data/materials.csv"));
        assert_eq!(config.template_path, PathBuf::from("documento.docx"));
        assert_eq!(config.renderer.timeout_secs, Some(90));
        assert_eq!(config.renderer.target_format, "pdf");
        assert_eq!(config.rules.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rule_with_field_and_value_is_rejected() {
        let config = Config::from_toml_str(
            r#"
            [[rules]]
            marker = "X"
            field = "a"
            value = "b"
            "#,
        )
        .unwrap();

        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "rules[0]"),
            other => panic!("应该校验失败: {:?}", other),
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MERGE_DOCS_DIR", "/tmp/docs"),
            ("SOFFICE_PATH", "/opt/lo/soffice"),
            ("CONVERT_TIMEOUT_SECS", "30"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.docs_dir, PathBuf::from("/tmp/docs"));
        assert_eq!(config.renderer.program, PathBuf::from("/opt/lo/soffice"));
        assert_eq!(config.renderer.timeout_secs, Some(30));
    }

    #[test]
    fn test_env_override_parse_failure() {
        let result = Config::default().with_overrides(|name| {
            (name == "CONVERT_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::EnvVarParseFailed { .. })
        ));
    }
}
