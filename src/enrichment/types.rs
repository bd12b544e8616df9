//! IOC Enrichment Types
//!
//! エンリッチメントパイプラインで使用される基本的なデータ構造を定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// 脅威タイプが未知の場合のセンチネル値
pub const UNKNOWN_THREAT: &str = "unknown";

/// ソースが未知の場合のセンチネル値
pub const UNKNOWN_SOURCE: &str = "unknown";

/// IOC の構造的タイプ
///
/// 分類は全域関数であり、全ての入力文字列が必ずいずれかの値に分類される。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    /// IPv4 アドレス
    #[serde(rename = "ipv4-addr")]
    Ipv4Addr,
    /// ファイルハッシュ（フォールバック分類を含む）
    #[serde(rename = "file-hash")]
    FileHash,
    /// メールアドレス
    #[serde(rename = "email-addr")]
    EmailAddr,
    /// ドメイン名
    #[serde(rename = "domain-name")]
    DomainName,
}

impl IndicatorType {
    /// ワイヤーフォーマット文字列を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::Ipv4Addr => "ipv4-addr",
            IndicatorType::FileHash => "file-hash",
            IndicatorType::EmailAddr => "email-addr",
            IndicatorType::DomainName => "domain-name",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 脅威マッチングルール
///
/// IPプレフィックスルールまたはキーワードルールのいずれか。
/// 各ルールは必ず1つの判別子と1つの脅威タイプラベルを持つ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ThreatRule {
    /// IPプレフィックスによるマッチング（CIDRではなく単純な前方一致）
    IpRange {
        /// マッチ対象のIPプレフィックス
        ip_range: String,
        /// 脅威タイプラベル
        threat_type: String,
    },
    /// キーワードによるマッチング（大文字小文字を区別しない部分一致）
    Keyword {
        /// マッチ対象のキーワード
        keyword: String,
        /// 脅威タイプラベル
        threat_type: String,
    },
}

impl ThreatRule {
    /// ルールが持つ脅威タイプラベルを取得
    pub fn threat_type(&self) -> &str {
        match self {
            ThreatRule::IpRange { threat_type, .. } => threat_type,
            ThreatRule::Keyword { threat_type, .. } => threat_type,
        }
    }
}

/// フィードストア
///
/// ソース名から既知のIOC値集合へのマッピング。ロード後は読み取り専用で、
/// エンジンはメンバーシップ照会のみを行う（正規化は行わない）。
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    feeds: HashMap<String, HashSet<String>>,
}

impl FeedStore {
    /// 空のフィードストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 名前付きフィードを登録
    pub fn insert(&mut self, name: impl Into<String>, values: HashSet<String>) {
        self.feeds.insert(name.into(), values);
    }

    /// 登録済みフィード数を取得
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    /// フィードストアが空かどうか
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// 指定名称のフィードに含まれる値の個数を取得
    pub fn feed_size(&self, name: &str) -> Option<usize> {
        self.feeds.get(name).map(|set| set.len())
    }

    /// IOC 値を含む全フィード名を取得（完全一致のメンバーシップテスト）
    pub fn sources_for(&self, ioc: &str) -> Vec<String> {
        let mut sources: Vec<String> = self
            .feeds
            .iter()
            .filter(|(_, values)| values.contains(ioc))
            .map(|(name, _)| name.clone())
            .collect();
        // 出力とログを決定的にするためソートする
        sources.sort();
        sources
    }
}

/// エンリッチ済みIOCレコード
///
/// パイプラインの終端成果物。一度構築されたら変更されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichedIoc {
    /// レコード識別子（`ioc-{counter}` 形式）
    pub id: String,
    /// 生のIOC値
    pub value: String,
    /// 構造的タイプ
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    /// 脅威タイプラベル
    pub threat_type: String,
    /// 信頼度スコア（10〜100）
    pub confidence: u8,
    /// 正規ソースラベル
    pub source: String,
    /// エンリッチ時刻（UTC）
    pub timestamp: DateTime<Utc>,
}
