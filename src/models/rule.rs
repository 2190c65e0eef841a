//! 替换规则
//!
//! `RuleSpec` 是配置里写的规则（标记 → 字段 / 固定文本），
//! `SubstitutionRule` 是针对某条记录解析出来的具体替换。

use serde::Deserialize;

use crate::models::Record;

/// 一条具体的替换：把文本中所有 `marker` 换成 `replacement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub marker: String,
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            replacement: replacement.into(),
        }
    }
}

/// 配置中的规则
///
/// `field` 与 `value` 二选一：
/// - `field`：替换为记录中该字段的值（前后可拼接 `prefix` / `suffix`）
/// - `value`：替换为固定文本，与记录无关
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSpec {
    pub marker: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl RuleSpec {
    /// 标记替换为字段值
    pub fn field(marker: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            field: Some(field.into()),
            value: None,
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// 标记替换为固定文本
    pub fn literal(marker: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            field: None,
            value: Some(value.into()),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.marker.is_empty() {
            return Err("marker 不能为空".to_string());
        }
        match (&self.field, &self.value) {
            (Some(_), Some(_)) => Err(format!("规则 '{}' 不能同时设置 field 和 value", self.marker)),
            (None, None) => Err(format!("规则 '{}' 必须设置 field 或 value", self.marker)),
            _ => Ok(()),
        }
    }

    /// 针对一条记录解析出具体替换
    ///
    /// 记录缺少字段时返回 `None`，该规则对这条记录不生效。
    pub fn resolve(&self, record: &Record) -> Option<SubstitutionRule> {
        let replacement = match (&self.field, &self.value) {
            (Some(field), _) => {
                let value = record.get(field)?;
                format!("{}{}{}", self.prefix, value, self.suffix)
            }
            (None, Some(value)) => value.clone(),
            (None, None) => return None,
        };
        Some(SubstitutionRule::new(self.marker.clone(), replacement))
    }
}

/// 有序规则集合
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    specs: Vec<RuleSpec>,
}

impl RuleSet {
    pub fn new(specs: Vec<RuleSpec>) -> Self {
        Self { specs }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// 为一条记录构建规则列表，保持声明顺序
    pub fn rules_for(&self, record: &Record) -> Vec<SubstitutionRule> {
        self.specs
            .iter()
            .filter_map(|spec| {
                let rule = spec.resolve(record);
                if rule.is_none() {
                    tracing::debug!("记录缺少字段 {:?}，跳过标记 '{}'", spec.field, spec.marker);
                }
                rule
            })
            .collect()
    }
}
