//! 记录处理上下文
//!
//! 封装"我正在处理第几条记录、它的键是什么"这一信息

use std::fmt::Display;

/// 记录处理上下文
#[derive(Debug, Clone)]
pub struct RecordCtx {
    /// 记录序号（从1开始）
    pub row: usize,

    /// 记录总数（仅用于日志显示）
    pub total: usize,

    /// 键字段的值
    pub key: String,
}

impl RecordCtx {
    pub fn new(row: usize, total: usize, key: impl Into<String>) -> Self {
        Self {
            row,
            total,
            key: key.into(),
        }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[记录 {}/{} 键 {}]", self.row, self.total, self.key)
    }
}
