//! Local-time display strategy.
//!
//! 表示用のローカル時刻変換。起動時に一度だけ戦略を選択する：
//! 設定されたIANAタイムゾーン名が解決できればカレンダー対応の変換、
//! できなければ固定オフセット演算への決定的フォールバック。
//! 永続化されるレコードは常にUTCであり、ローカル時刻はログ表示専用。

use crate::config::DisplayTimeConfig;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// 表示時刻の変換戦略
#[derive(Debug, Clone)]
pub enum DisplayClock {
    /// IANAタイムゾーンによるカレンダー対応変換
    Zone(Tz),
    /// 固定オフセット演算によるフォールバック
    Fixed(FixedOffset),
}

impl DisplayClock {
    /// 設定から戦略を選択する
    ///
    /// タイムゾーン名が解決できない場合は警告を出してフォールバック
    /// オフセットに切り替える。選択後の変換は失敗しない。
    pub fn select(config: &DisplayTimeConfig) -> Self {
        match config.timezone.parse::<Tz>() {
            Ok(tz) => DisplayClock::Zone(tz),
            Err(_) => {
                let offset = FixedOffset::east_opt(config.fallback_offset_minutes * 60)
                    .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
                warn!(
                    "Timezone '{}' not resolvable, using fixed offset of {} minutes",
                    config.timezone, config.fallback_offset_minutes
                );
                DisplayClock::Fixed(offset)
            }
        }
    }

    /// UTC時刻を表示用ローカル時刻のRFC3339文字列へ変換
    pub fn display(&self, utc: DateTime<Utc>) -> String {
        match self {
            DisplayClock::Zone(tz) => tz.from_utc_datetime(&utc.naive_utc()).to_rfc3339(),
            DisplayClock::Fixed(offset) => utc.with_timezone(offset).to_rfc3339(),
        }
    }
}
