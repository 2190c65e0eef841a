#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use docx_merge_pdf::{Config, RuleSpec};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const PART: &str = "word/document.xml";

/// 构造一个最小的 docx 模板
pub fn write_template(path: &Path, markup: &str) {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.start_file(PART, options).unwrap();
    zip.write_all(markup.as_bytes()).unwrap();
    let bytes = zip.finish().unwrap().into_inner();
    std::fs::write(path, bytes).unwrap();
}

/// 读取生成文档中的标记文本
pub fn read_markup(path: &Path) -> String {
    docx_merge_pdf::PackageArchive::open(path)
        .unwrap()
        .read_text(PART)
        .unwrap()
}

/// 在临时目录中准备模板、数据表，返回指向它们的配置
pub fn workspace(root: &Path, csv: &str) -> Config {
    let template_path = root.join("documento.docx");
    write_template(&template_path, "<w:t>Ficha TPL_KEY</w:t><w:t>TPL_NAME</w:t>");

    let table_path = root.join("filas.csv");
    std::fs::write(&table_path, csv).unwrap();

    Config {
        template_path,
        table_path,
        docs_dir: root.join("output"),
        pdf_dir: root.join("outputpdfs"),
        key_field: "code".to_string(),
        rules: vec![
            RuleSpec::field("TPL_KEY", "code"),
            RuleSpec::field("TPL_NAME", "name"),
        ],
        report_file: root.join("report.txt"),
        ..Config::default()
    }
}

/// 模拟 soffice 的脚本：输入文件名包含 "bad" 时失败，包含 "slow" 时长时间挂起，
/// 否则把输入复制为 `<outdir>/<stem>.pdf` 并在 stderr 输出一条警告
///
/// 整个测试进程只写一次脚本，并行测试边写边执行会撞上 ETXTBSY。
#[cfg(unix)]
pub fn fake_soffice() -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    use std::sync::OnceLock;

    static SCRIPT: OnceLock<(tempfile::TempDir, PathBuf)> = OnceLock::new();

    let script = r#"#!/bin/sh
outdir=""
input=""
while [ $# -gt 0 ]; do
  case "$1" in
    --headless) ;;
    --convert-to) shift ;;
    --outdir) shift; outdir="$1" ;;
    *) input="$1" ;;
  esac
  shift
done
case "$input" in
  *bad*) echo "Error: source file could not be loaded" >&2; exit 1 ;;
  *slow*) exec sleep 20 ;;
esac
name=$(basename "$input")
stem="${name%.*}"
cp "$input" "$outdir/$stem.pdf"
echo "Warning: fake renderer" >&2
"#;

    let (_, path) = SCRIPT.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-soffice.sh");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        (dir, path)
    });
    path.clone()
}
