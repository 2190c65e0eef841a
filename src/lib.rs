//! # Docx Merge PDF
//!
//! 一个用于批量套打文档并转换为 PDF 的 Rust 应用程序
//!
//! 给定一张 CSV 数据表和一份模板文档（docx 等 zip 包），为每一行生成一份
//! 替换了标记文本的文档，再逐个调用 LibreOffice 转换为 PDF。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `PackageArchive` - 读写文档压缩包的内部部件
//! - `SofficeRenderer` - 调用外部渲染器转换单个文件
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `TemplateEngine` - 按顺序执行字面量替换
//! - `FailureWriter` - 写运行报告
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条记录"的完整处理流程
//! - `RecordCtx` - 上下文封装（序号 + 键值）
//! - `RecordFlow` - 流程编排（规则 → 替换 → 打包 → 写入）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/document_generator` - 遍历记录生成文档
//! - `orchestrator/batch_converter` - 顺序转换，逐项隔离失败
//! - `orchestrator/pipeline` - 一次运行的生命周期与结果汇总
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, RendererConfig};
pub use error::{AppError, AppResult};
pub use infrastructure::{PackageArchive, Renderer, SofficeRenderer};
pub use models::{Record, RuleSet, RuleSpec, RunReport, SubstitutionRule, Template};
pub use orchestrator::{App, BatchConverter, DocumentGenerator, RunMode};
pub use services::TemplateEngine;
pub use workflow::{RecordCtx, RecordFlow};
