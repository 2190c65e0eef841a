//! 基础设施层：持有外部资源（文档压缩包、渲染器进程），只暴露能力

pub mod archive;
pub mod renderer;

pub use archive::PackageArchive;
pub use renderer::{RenderOutput, Renderer, SofficeRenderer};
