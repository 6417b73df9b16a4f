//! 配置与命令行参数
//!
//! 优先级：命令行 > 配置文件 > 默认值

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Deserializer};
use tracing::level_filters::LevelFilter;

use crate::error::AppError;

const APP_DIR: &str = "expense-tracker";

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "expense-tracker")]
#[command(about = "A terminal expense tracker with a running total")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Currency symbol shown before amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Where to write the debug log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// 配置文件内容
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency_symbol: String,
    #[serde(deserialize_with = "deserialize_level")]
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            log_level: LevelFilter::INFO,
        }
    }
}

/// 日志级别只接受 off/error/warn/info/debug/trace
fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LevelFilter, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// 合并后的最终配置
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub currency_symbol: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

/// 默认配置文件路径 (~/.config/expense-tracker/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// 默认日志路径 (~/.local/share/expense-tracker/debug.log)
pub fn default_log_path() -> Result<PathBuf, AppError> {
    let data_dir = dirs::data_dir().ok_or(AppError::NoDataDir)?.join(APP_DIR);
    Ok(data_dir.join("debug.log"))
}

/// 从 TOML 文件加载配置，文件不存在时使用默认值
pub fn load_settings(path: &Path) -> Result<Settings, AppError> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// 合并命令行参数与配置文件
    pub fn resolve(cli: Cli, settings: Settings, default_log_file: PathBuf) -> Self {
        let log_level = if cli.verbose {
            LevelFilter::DEBUG
        } else {
            settings.log_level
        };

        Self {
            currency_symbol: cli.currency.unwrap_or(settings.currency_symbol),
            log_level,
            log_file: cli.log_file.unwrap_or(default_log_file),
        }
    }

    /// 解析命令行并读取配置文件
    pub fn load() -> Result<Self, AppError> {
        let cli = Cli::parse();
        let settings = match cli.config.clone().or_else(default_config_path) {
            Some(path) => load_settings(&path)?,
            None => Settings::default(),
        };
        let default_log_file = match &cli.log_file {
            Some(path) => path.clone(),
            None => default_log_path()?,
        };
        Ok(Self::resolve(cli, settings, default_log_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["expense-tracker"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(cli(&[]), Settings::default(), PathBuf::from("debug.log"));

        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert_eq!(config.log_file, PathBuf::from("debug.log"));
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: Settings = toml::from_str("currency_symbol = \"€\"").unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.log_level, LevelFilter::INFO);

        let config = Config::resolve(cli(&[]), settings, PathBuf::from("debug.log"));
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_cli_overrides_file() {
        let settings = Settings {
            currency_symbol: "€".to_string(),
            log_level: LevelFilter::WARN,
        };
        let config = Config::resolve(
            cli(&["--currency", "£", "--verbose", "--log-file", "/tmp/x.log"]),
            settings,
            PathBuf::from("/tmp/x.log"),
        );

        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.log_level, LevelFilter::DEBUG);
        assert_eq!(config.log_file, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("expense-tracker-no-such-config.toml");
        assert_eq!(load_settings(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let path = std::env::temp_dir().join(format!(
            "expense-tracker-invalid-{}.toml",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, "currency_symbol = [").unwrap();

        let result = load_settings(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(AppError::ConfigParse { .. })));
    }

    #[test]
    fn test_log_level_parsing() {
        let settings: Settings = toml::from_str("log_level = \"WARN\"").unwrap();
        assert_eq!(settings.log_level, LevelFilter::WARN);

        let settings: Settings = toml::from_str("log_level = \"off\"").unwrap();
        assert_eq!(settings.log_level, LevelFilter::OFF);

        // 非法级别不能被当作 target 指令悄悄接受
        assert!(toml::from_str::<Settings>("log_level = \"verbose\"").is_err());
    }

    #[test]
    fn test_invalid_log_level_file_is_error() {
        let path = std::env::temp_dir().join(format!(
            "expense-tracker-level-{}.toml",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, "log_level = \"verbose\"").unwrap();

        let result = load_settings(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(AppError::ConfigParse { .. })));
    }
}
