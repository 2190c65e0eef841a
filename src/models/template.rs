use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, TemplateLoadError};
use crate::infrastructure::PackageArchive;

/// 模板文档
///
/// 只打开一次；每条记录都从 `markup()` 的原始文本出发，
/// 渲染时复制压缩包再替换部件，模板本身从不修改。
#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    archive: PackageArchive,
    markup_part: String,
    markup: String,
}

impl Template {
    /// 加载模板并提取标记所在部件的文本
    pub fn load(path: &Path, markup_part: &str) -> Result<Self, TemplateLoadError> {
        let bytes = std::fs::read(path).map_err(|source| TemplateLoadError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, bytes, markup_part)
    }

    pub fn from_bytes(
        path: &Path,
        bytes: Vec<u8>,
        markup_part: &str,
    ) -> Result<Self, TemplateLoadError> {
        let invalid = |source: ArchiveError| TemplateLoadError::InvalidPackage {
            path: path.to_path_buf(),
            source,
        };
        let archive = PackageArchive::from_bytes(bytes).map_err(invalid)?;
        let markup = archive.read_text(markup_part).map_err(invalid)?;

        Ok(Self {
            path: path.to_path_buf(),
            archive,
            markup_part: markup_part.to_string(),
            markup,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn markup_part(&self) -> &str {
        &self.markup_part
    }

    /// 原始标记文本
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// 用新的标记文本生成一份完整文档
    pub fn render(&self, markup: String) -> Result<Vec<u8>, ArchiveError> {
        let mut archive = self.archive.clone();
        archive.set_text(self.markup_part.as_str(), markup);
        archive.to_bytes()
    }
}
