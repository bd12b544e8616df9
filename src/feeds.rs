//! Threat Feed Loaders
//!
//! 行区切り・JSON・CSV の各フィードファイルをメモリ上の
//! メンバーシップ集合として読み込む。いずれかのフィードまたは
//! ルールファイルが不正な場合は即座に致命的エラーとなり、
//! 部分的にロードされた入力でエンリッチメントが始まることはない。

use crate::enrichment::types::{FeedStore, ThreatRule};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// 行区切りテキストの内部フィードを読み込む
///
/// 各行をトリムし、空行は読み飛ばす。
pub fn load_internal_feed(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Feed(format!("Cannot read internal feed {}: {}", path.display(), e)))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// JSON文字列配列のMISPフィードを読み込む
pub fn load_misp_feed(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Feed(format!("Cannot read MISP feed {}: {}", path.display(), e)))?;

    let values: Vec<String> = serde_json::from_str(&content)
        .map_err(|e| Error::Feed(format!("Malformed MISP feed {}: {}", path.display(), e)))?;

    Ok(values.into_iter().collect())
}

/// `ioc` 列を持つCSVのOSINTフィードを読み込む
///
/// 値はトリムし、空の値は読み飛ばす。`ioc` 列を欠く行は致命的エラー。
pub fn load_osint_feed(path: &Path) -> Result<HashSet<String>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::Feed(format!("Cannot read OSINT feed {}: {}", path.display(), e)))?;

    let headers = reader.headers()?.clone();
    let ioc_index = headers
        .iter()
        .position(|h| h == "ioc")
        .ok_or_else(|| Error::Feed(format!("OSINT feed {} has no 'ioc' column", path.display())))?;

    let mut values = HashSet::new();
    for row in reader.records() {
        let row = row?;
        let value = row
            .get(ioc_index)
            .ok_or_else(|| Error::Feed(format!("OSINT feed {} has a short row", path.display())))?
            .trim();
        if !value.is_empty() {
            values.insert(value.to_string());
        }
    }
    Ok(values)
}

/// ルールファイル上の生のルールオブジェクト
///
/// 判別子（ip_range / keyword）はどちらも任意。両方を欠くルールは
/// 決してマッチできないため、検証時に警告付きで除外される。
#[derive(Debug, Deserialize)]
struct RawRule {
    ip_range: Option<String>,
    keyword: Option<String>,
    threat_type: String,
}

/// JSONルールファイル（`patterns` 配列）を読み込む
///
/// ルールの順序は先頭一致評価のタイブレークポリシーなので、
/// ファイル上の順序をそのまま保持する。
pub fn load_threat_rules(path: &Path) -> Result<Vec<ThreatRule>> {
    #[derive(Deserialize)]
    struct RuleFile {
        patterns: Vec<RawRule>,
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Rules(format!("Cannot read rule file {}: {}", path.display(), e)))?;

    let rule_file: RuleFile = serde_json::from_str(&content)
        .map_err(|e| Error::Rules(format!("Malformed rule file {}: {}", path.display(), e)))?;

    let mut rules = Vec::with_capacity(rule_file.patterns.len());
    for (index, raw) in rule_file.patterns.into_iter().enumerate() {
        // 両方の判別子を持つルールはIPプレフィックスとして扱う
        // （評価順で ip_range が先に試されるため）
        match (raw.ip_range, raw.keyword) {
            (Some(ip_range), _) => rules.push(ThreatRule::IpRange {
                ip_range,
                threat_type: raw.threat_type,
            }),
            (None, Some(keyword)) => rules.push(ThreatRule::Keyword {
                keyword,
                threat_type: raw.threat_type,
            }),
            (None, None) => {
                warn!(
                    "Rule {} in {} has neither ip_range nor keyword and can never match, skipping",
                    index,
                    path.display()
                );
            }
        }
    }
    Ok(rules)
}

/// 3つのフィードを読み込み、名前付きフィードストアを組み立てる
pub fn load_feed_store(
    internal_path: &Path,
    misp_path: &Path,
    osint_path: &Path,
) -> Result<FeedStore> {
    let mut store = FeedStore::new();
    store.insert("internal", load_internal_feed(internal_path)?);
    store.insert("misp", load_misp_feed(misp_path)?);
    store.insert("osint", load_osint_feed(osint_path)?);

    info!(
        "Loaded feed store: internal={}, misp={}, osint={}",
        store.feed_size("internal").unwrap_or(0),
        store.feed_size("misp").unwrap_or(0),
        store.feed_size("osint").unwrap_or(0)
    );
    Ok(store)
}
