//! Logging setup for the enrichment pipeline.
//!
//! ログ初期化は明示的な設定で行い、init → use → flush/close の
//! ライフサイクルを持つ。ファイル出力のバッファは返却されるガードの
//! drop 時にフラッシュされる。

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// ログ設定
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
    /// ログディレクトリ
    pub log_dir: PathBuf,
    /// ファイルローテーション設定
    pub rotation: LogRotation,
    /// コンソール出力有効
    pub console_enabled: bool,
    /// ファイル出力有効
    pub file_enabled: bool,
}

#[derive(Debug, Clone)]
pub enum LogRotation {
    /// 日次ローテーション
    Daily,
    /// 時間毎ローテーション
    Hourly,
    /// ローテーションなし
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            rotation: LogRotation::Daily,
            console_enabled: true,
            file_enabled: true,
        }
    }
}

impl LogConfig {
    /// カスタムログディレクトリを設定
    pub fn with_log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// ログレベルを設定
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// コンソール出力制御
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console_enabled = enabled;
        self
    }

    /// ファイル出力制御
    pub fn with_file(mut self, enabled: bool) -> Self {
        self.file_enabled = enabled;
        self
    }
}

/// ログシステムのライフサイクルガード
///
/// ファイル出力のワーカーを保持する。drop 時にバッファ済みの
/// ログ行がフラッシュされるため、プロセス終了まで保持すること。
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// ログディレクトリを確保
fn ensure_log_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// ログシステムを初期化
///
/// ディレクトリ作成を含む全ての副作用はこの関数の中でのみ起きる。
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let guard = match (config.console_enabled, config.file_enabled) {
        (true, true) => {
            ensure_log_dir(&config.log_dir)?;
            let file_appender = match config.rotation {
                LogRotation::Daily => rolling::daily(&config.log_dir, "threat-detector.log"),
                LogRotation::Hourly => rolling::hourly(&config.log_dir, "threat-detector.log"),
                LogRotation::Never => rolling::never(&config.log_dir, "threat-detector.log"),
            };
            let (file_writer, file_guard) = non_blocking(file_appender);

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr.and(file_writer))
                .with_target(true)
                .init();

            LogGuard {
                _file_guard: Some(file_guard),
            }
        }
        (false, true) => {
            ensure_log_dir(&config.log_dir)?;
            let file_appender = match config.rotation {
                LogRotation::Daily => rolling::daily(&config.log_dir, "threat-detector.log"),
                LogRotation::Hourly => rolling::hourly(&config.log_dir, "threat-detector.log"),
                LogRotation::Never => rolling::never(&config.log_dir, "threat-detector.log"),
            };
            let (file_writer, file_guard) = non_blocking(file_appender);

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .init();

            LogGuard {
                _file_guard: Some(file_guard),
            }
        }
        (true, false) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .init();

            LogGuard { _file_guard: None }
        }
        (false, false) => {
            // 出力先なし：警告以上のみ標準エラーへ
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::WARN)
                .init();

            LogGuard { _file_guard: None }
        }
    };

    tracing::info!("Logging initialized (level: {})", config.level);
    Ok(guard)
}
