use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::FileError;

/// 列出目录中的所有普通文件（不含子目录），按文件名排序
pub async fn collect_input_files(folder: &Path) -> Result<Vec<PathBuf>, FileError> {
    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound(folder.to_path_buf()));
    }

    let read_dir_failed = |source: std::io::Error| FileError::ReadDirFailed {
        path: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    let mut entries = fs::read_dir(folder).await.map_err(read_dir_failed)?;

    while let Some(entry) = entries.next_entry().await.map_err(read_dir_failed)? {
        let file_type = entry.file_type().await.map_err(read_dir_failed)?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_files_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.docx"), b"b").unwrap();
        std::fs::write(dir.path().join("a.docx"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let files = collect_input_files(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.docx", "b.docx"]);
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_input_files(&dir.path().join("missing")).await;
        assert!(matches!(result, Err(FileError::DirectoryNotFound(_))));
    }
}
