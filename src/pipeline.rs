//! Enrichment pipeline orchestration.
//!
//! 入力リストを読み、エントリごとにエンジンを呼び出し、
//! エンリッチ済みレコードの配列を出力ファイルへ書き出す。
//! エンジンは入力1件につき必ず1レコードを返すため、
//! パイプラインの失敗はすべてI/Oと構文の問題に限られる。

use crate::enrichment::{EnrichedIoc, EnrichmentEngine};
use crate::error::{Error, Result};
use crate::localtime::DisplayClock;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// 入力ファイル上の1エントリ
///
/// `ioc` が欠落または null のエントリは空文字列として扱われ、
/// エンジンの縮退レコード経路に乗る。
#[derive(Debug, Deserialize)]
struct InputEntry {
    #[serde(default)]
    ioc: Option<String>,
}

/// 入力JSONを読み込み、各エントリをエンリッチする
///
/// 識別子カウンタは `start_id` から1ずつ前進し、呼び出し側（この関数）が
/// 所有する。エンジン自体はカウンタを保持しない。
pub fn enrich_all(engine: &EnrichmentEngine, input_path: &Path, start_id: u64) -> Result<Vec<EnrichedIoc>> {
    let content = fs::read_to_string(input_path)
        .map_err(|e| Error::Feed(format!("Cannot read input {}: {}", input_path.display(), e)))?;

    let entries: Vec<InputEntry> = serde_json::from_str(&content)
        .map_err(|e| Error::Feed(format!("Malformed input {}: {}", input_path.display(), e)))?;

    let mut records = Vec::with_capacity(entries.len());
    for (offset, entry) in entries.into_iter().enumerate() {
        let ioc = entry.ioc.unwrap_or_default();
        let record = engine.enrich(&ioc, start_id + offset as u64);
        info!(
            "Processed IOC: {} | Type: {} | Threat: {} | Confidence: {}",
            record.value, record.indicator_type, record.threat_type, record.confidence
        );
        records.push(record);
    }
    Ok(records)
}

/// エンリッチ済みレコードを整形JSONとして書き出す
pub fn write_output(records: &[EnrichedIoc], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(output_path, json)?;
    info!("Enriched IOCs written to {}", output_path.display());
    Ok(())
}

/// パイプライン全体を実行する
///
/// 読み込み → エンリッチ → 書き出し。完了時刻を表示用タイムゾーンで
/// ログに残す。レコード自体のタイムスタンプは常にUTC。
pub fn run(
    engine: &EnrichmentEngine,
    input_path: &Path,
    output_path: &Path,
    start_id: u64,
    clock: &DisplayClock,
) -> Result<Vec<EnrichedIoc>> {
    let records = enrich_all(engine, input_path, start_id)?;
    write_output(&records, output_path)?;

    let finished = chrono::Utc::now();
    info!(
        "IOC enrichment complete: {} records (local time: {})",
        records.len(),
        clock.display(finished)
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::{FeedStore, ThreatRule};
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn test_engine() -> EnrichmentEngine {
        let rules = vec![ThreatRule::Keyword {
            keyword: "evil".to_string(),
            threat_type: "phishing".to_string(),
        }];
        let mut feeds = FeedStore::new();
        feeds.insert(
            "misp",
            ["evil.com".to_string()].into_iter().collect::<HashSet<_>>(),
        );
        EnrichmentEngine::new(rules, feeds).unwrap()
    }

    fn input_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_enrich_all_advances_counter() {
        let engine = test_engine();
        let input = input_file(r#"[{"ioc": "evil.com"}, {"ioc": "other.org"}]"#);

        let records = enrich_all(&engine, input.path(), 1001).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "ioc-1001");
        assert_eq!(records[1].id, "ioc-1002");
        assert_eq!(records[0].threat_type, "phishing");
    }

    #[test]
    fn test_missing_ioc_field_yields_degenerate_record() {
        let engine = test_engine();
        let input = input_file(r#"[{}, {"ioc": null}]"#);

        let records = enrich_all(&engine, input.path(), 1).unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.value, "");
            assert_eq!(record.threat_type, "unknown");
            assert_eq!(record.confidence, 10);
        }
    }

    #[test]
    fn test_malformed_input_is_fatal() {
        let engine = test_engine();
        let input = input_file("not json");

        assert!(enrich_all(&engine, input.path(), 1).is_err());
    }

    #[test]
    fn test_write_output_round_trips() {
        let engine = test_engine();
        let input = input_file(r#"[{"ioc": "evil.com"}]"#);
        let records = enrich_all(&engine, input.path(), 5).unwrap();

        let output = NamedTempFile::new().unwrap();
        write_output(&records, output.path()).unwrap();

        let written: Vec<EnrichedIoc> =
            serde_json::from_str(&fs::read_to_string(output.path()).unwrap()).unwrap();
        assert_eq!(written, records);
    }
}
