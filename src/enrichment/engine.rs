//! Enrichment Engine
//!
//! 分類・ルールマッチング・スコアリング・ソース解決を合成し、
//! 1つのIOCから1つのエンリッチ済みレコードを生成する

use crate::enrichment::classifier::IocClassifier;
use crate::enrichment::confidence::score_confidence;
use crate::enrichment::matcher::match_threat;
use crate::enrichment::source::resolve_source;
use crate::enrichment::types::{
    EnrichedIoc, FeedStore, IndicatorType, ThreatRule, UNKNOWN_SOURCE, UNKNOWN_THREAT,
};
use chrono::Utc;
use tracing::debug;

/// エンリッチメントエンジン
///
/// ルール列とフィードストアを実行期間中読み取り専用で保持する。
/// 各呼び出しは他の呼び出しから独立しており、識別子カウンタは
/// 呼び出し側が所有・前進させる。
pub struct EnrichmentEngine {
    /// IOC分類器
    classifier: IocClassifier,
    /// 順序付き脅威ルール列
    rules: Vec<ThreatRule>,
    /// 読み取り専用フィードストア
    feeds: FeedStore,
}

impl EnrichmentEngine {
    /// 新しいエンリッチメントエンジンを作成
    pub fn new(rules: Vec<ThreatRule>, feeds: FeedStore) -> crate::error::Result<Self> {
        Ok(Self {
            classifier: IocClassifier::new()?,
            rules,
            feeds,
        })
    }

    /// 1つのIOCをエンリッチする
    ///
    /// 空のIOCは分類・マッチングを迂回し、定義済みフォールバックとして
    /// 縮退レコード（file-hash / unknown / 信頼度10 / unknown ソース）を
    /// 返す。エラーにはならず、どの入力に対しても必ず1レコードを返す。
    pub fn enrich(&self, ioc: &str, record_id: u64) -> EnrichedIoc {
        if ioc.is_empty() {
            return EnrichedIoc {
                id: format!("ioc-{}", record_id),
                value: String::new(),
                indicator_type: IndicatorType::FileHash,
                threat_type: UNKNOWN_THREAT.to_string(),
                confidence: 10,
                source: UNKNOWN_SOURCE.to_string(),
                timestamp: Utc::now(),
            };
        }

        let indicator_type = self.classifier.classify(ioc);
        let threat_type = match_threat(ioc, &self.rules);
        let sources = self.feeds.sources_for(ioc);
        let confidence = score_confidence(&sources, &threat_type);
        let source = resolve_source(&sources);

        debug!(
            "Enriched IOC {} as {} ({} corroborating sources)",
            ioc,
            indicator_type,
            sources.len()
        );

        EnrichedIoc {
            id: format!("ioc-{}", record_id),
            value: ioc.to_string(),
            indicator_type,
            threat_type,
            confidence,
            source,
            timestamp: Utc::now(),
        }
    }

    /// エンジンが保持するルール数を取得
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// エンジンが保持するフィードストアへの参照を取得
    pub fn feeds(&self) -> &FeedStore {
        &self.feeds
    }
}
