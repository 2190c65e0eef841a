use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
///
/// 这里的每一种错误都是致命的：出现即终止整个运行，不产生逐项报告。
/// 单个文件的转换失败不属于这里，它们只会被记录进 `RunReport`。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 模板加载错误
    #[error("模板错误: {0}")]
    Template(#[from] TemplateLoadError),
    /// 数据源读取错误
    #[error("数据源错误: {0}")]
    Source(#[from] RowSourceError),
    /// 文档生成错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 文件系统准备错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置项取值非法
    #[error("配置项 {field} 非法: {reason}")]
    Invalid { field: String, reason: String },
}

/// 压缩包（docx 等）读写错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("无法读取压缩包: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("压缩包读写失败: {0}")]
    Io(#[from] std::io::Error),
    /// 指定的内部部件不存在
    #[error("压缩包中缺少部件: {0}")]
    MissingPart(String),
    /// 内部部件不是合法的 UTF-8 文本
    #[error("部件 {0} 不是 UTF-8 文本")]
    NotUtf8(String),
}

/// 模板加载错误
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    /// 模板文件无法读取
    #[error("无法读取模板 {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 模板不是合法的压缩包，或缺少标记所在的部件
    #[error("模板 {path} 无效: {source}")]
    InvalidPackage {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },
}

/// 数据源读取错误
#[derive(Debug, Error)]
pub enum RowSourceError {
    /// 表格文件不存在
    #[error("表格文件不存在: {0}")]
    NotFound(PathBuf),
    /// CSV 解析失败
    #[error("CSV解析失败 ({path}): {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// 文档生成错误（对整个批次致命）
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 记录缺少用于命名的键字段，或其值为空
    #[error("第 {row} 条记录缺少键字段 '{field}'")]
    MissingKey { row: usize, field: String },
    /// 序列化文档失败
    #[error("无法生成文档 {key}: {source}")]
    Archive {
        key: String,
        #[source]
        source: ArchiveError,
    },
    /// 写入文档失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 渲染器（soffice）调用错误，只影响单个文件
#[derive(Debug, Error)]
pub enum RenderError {
    /// 无法启动进程
    #[error("无法启动渲染器 {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 进程以非零状态退出
    #[error("渲染器退出状态 {code:?}: {stderr}")]
    ExitFailure { code: Option<i32>, stderr: String },
    /// 超时被终止
    #[error("渲染器超时 ({secs} 秒)")]
    Timeout { secs: u64 },
}

/// 文件系统准备错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {0}")]
    DirectoryNotFound(PathBuf),
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 读取目录失败
    #[error("读取目录失败 ({path}): {source}")]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
