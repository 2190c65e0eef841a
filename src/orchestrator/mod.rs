//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `pipeline` - 运行管线
//! - 管理一次运行的生命周期（准备目录、初始化报告、汇总结果）
//! - 按运行模式串联生成与转换两个阶段
//!
//! ### `document_generator` - 文档生成器
//! - 加载模板（只加载一次）
//! - 遍历记录（Vec<Record>），委托 `RecordFlow` 生成单个文档
//! - 任一记录失败即终止（致命）
//!
//! ### `batch_converter` - 批量转换器
//! - 严格顺序地调用渲染器
//! - 单个文件失败只记录，不中断批次
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (一次运行)
//!     ↓
//! document_generator (Vec<Record>)  →  batch_converter (Vec<PathBuf>)
//!     ↓                                     ↓
//! workflow::RecordFlow (单条记录)        infrastructure::Renderer
//!     ↓
//! services (TemplateEngine) / infrastructure (PackageArchive)
//! ```

pub mod batch_converter;
pub mod document_generator;
pub mod pipeline;

pub use batch_converter::BatchConverter;
pub use document_generator::DocumentGenerator;
pub use pipeline::{App, RunMode};
