//! Confidence Scorer
//!
//! 裏付けソースと脅威タイプから有界の信頼度スコアを算出する

/// 信頼度スコアの下限
pub const CONFIDENCE_FLOOR: u8 = 10;

/// 信頼度スコアの上限
pub const CONFIDENCE_CEILING: u8 = 100;

/// 裏付けソース集合と脅威タイプラベルから信頼度スコアを算出
///
/// ソースボーナスは独立した加算（internal +50 / misp +30 / public・osint +10）
/// で、メンバーシップ判定は大文字小文字を区別しない。脅威タイプボーナスは
/// 固定テーブルを大文字小文字を区別せずに引く。結果は [10, 100] にクランプ
/// される（証拠ゼロでも下限10、加算が超過しても上限100）。
pub fn score_confidence(sources: &[String], threat_type: &str) -> u8 {
    let lower_sources: Vec<String> = sources.iter().map(|s| s.to_lowercase()).collect();

    let mut base: u32 = 0;
    if lower_sources.iter().any(|s| s == "internal") {
        base += 50;
    }
    if lower_sources.iter().any(|s| s == "misp") {
        base += 30;
    }
    if lower_sources.iter().any(|s| s == "public" || s == "osint") {
        base += 10;
    }

    base += threat_type_bonus(threat_type);

    base.clamp(CONFIDENCE_FLOOR as u32, CONFIDENCE_CEILING as u32) as u8
}

/// 脅威タイプごとの固定ボーナス
fn threat_type_bonus(threat_type: &str) -> u32 {
    match threat_type.to_lowercase().as_str() {
        "ransomware" => 10,
        "infostealer" | "malware" | "trojan" | "botnet" | "command-and-control"
        | "phishing" | "malicious-domain" => 5,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_floor_with_no_evidence() {
        assert_eq!(score_confidence(&[], "unknown"), 10);
    }

    #[test]
    fn test_ceiling_is_clamped() {
        // 50 + 30 + 10 + 10 = 100 ちょうどで上限
        assert_eq!(
            score_confidence(&sources(&["internal", "misp", "public"]), "ransomware"),
            100
        );
    }

    #[test]
    fn test_additive_bonuses() {
        assert_eq!(
            score_confidence(&sources(&["misp", "public"]), "infostealer"),
            45
        );
        assert_eq!(score_confidence(&sources(&["internal"]), "unknown"), 50);
    }

    #[test]
    fn test_source_lookup_is_case_insensitive() {
        assert_eq!(score_confidence(&sources(&["MISP"]), "unknown"), 30);
        assert_eq!(score_confidence(&sources(&["Internal"]), "unknown"), 50);
    }

    #[test]
    fn test_osint_and_public_share_one_bonus() {
        // 両方あっても +10 は一度だけ
        assert_eq!(score_confidence(&sources(&["osint", "public"]), "unknown"), 10);
        assert_eq!(
            score_confidence(&sources(&["osint", "public", "misp"]), "unknown"),
            40
        );
    }

    #[test]
    fn test_threat_type_bonus_is_case_insensitive() {
        assert_eq!(score_confidence(&sources(&["misp"]), "Ransomware"), 40);
        assert_eq!(score_confidence(&sources(&["misp"]), "PHISHING"), 35);
    }

    #[test]
    fn test_unknown_threat_type_adds_nothing() {
        assert_eq!(score_confidence(&sources(&["misp"]), "unheard-of"), 30);
    }
}
