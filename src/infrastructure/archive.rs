//! 文档压缩包 - 基础设施层
//!
//! docx / odt 等文档本质上是 zip 包。这里只暴露三种能力：
//! 读取某个内部部件的文本、替换某个部件的文本、重新序列化为字节。

use std::collections::{BTreeMap, HashSet};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::sync::Arc;

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::ArchiveError;

/// 可修改的文档压缩包
///
/// 原始字节共享且只读；`set_text` 只记录覆盖内容，`to_bytes` 时才写出新包。
/// 因此 clone 一份再修改不会影响模板本身。
#[derive(Debug, Clone)]
pub struct PackageArchive {
    bytes: Arc<[u8]>,
    overrides: BTreeMap<String, String>,
}

impl PackageArchive {
    /// 从文件打开
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// 从内存字节打开，并校验是合法的 zip 包
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        ZipArchive::new(Cursor::new(bytes.as_slice()))?;
        Ok(Self {
            bytes: Arc::from(bytes),
            overrides: BTreeMap::new(),
        })
    }

    fn reader(&self) -> Result<ZipArchive<Cursor<&[u8]>>, ArchiveError> {
        Ok(ZipArchive::new(Cursor::new(&self.bytes[..]))?)
    }

    /// 是否包含指定部件
    pub fn contains(&self, part: &str) -> bool {
        if self.overrides.contains_key(part) {
            return true;
        }
        self.reader()
            .map(|archive| archive.file_names().any(|name| name == part))
            .unwrap_or(false)
    }

    /// 读取部件文本
    pub fn read_text(&self, part: &str) -> Result<String, ArchiveError> {
        if let Some(text) = self.overrides.get(part) {
            return Ok(text.clone());
        }

        let mut archive = self.reader()?;
        let mut file = archive.by_name(part).map_err(|e| match e {
            ZipError::FileNotFound => ArchiveError::MissingPart(part.to_string()),
            other => ArchiveError::Zip(other),
        })?;

        let mut raw = Vec::new();
        file.read_to_end(&mut raw)?;
        String::from_utf8(raw).map_err(|_| ArchiveError::NotUtf8(part.to_string()))
    }

    /// 替换部件文本（部件不存在时在序列化时新增）
    pub fn set_text(&mut self, part: impl Into<String>, text: impl Into<String>) {
        self.overrides.insert(part.into(), text.into());
    }

    /// 序列化为新的 zip 字节
    ///
    /// 未修改的条目原样拷贝（不重新压缩），保持原有顺序。
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut archive = self.reader()?;
        let existing: HashSet<String> = archive.file_names().map(String::from).collect();

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        // 固定时间戳，同样的输入总是得到同样的字节
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        for index in 0..archive.len() {
            let file = archive.by_index_raw(index)?;
            match self.overrides.get(file.name()) {
                Some(text) => {
                    let name = file.name().to_string();
                    drop(file);
                    writer.start_file(name, options)?;
                    writer.write_all(text.as_bytes())?;
                }
                None => writer.raw_copy_file(file)?,
            }
        }

        for (name, text) in &self.overrides {
            if !existing.contains(name) {
                writer.start_file(name.as_str(), options)?;
                writer.write_all(text.as_bytes())?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}
