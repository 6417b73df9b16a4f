use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 进程级错误（终端、配置文件、日志文件）
///
/// 用户输入错误不在这里：无效输入会被静默忽略。
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("无法读取配置文件 {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("配置文件格式错误 {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("无法获取用户数据目录")]
    NoDataDir,
}
