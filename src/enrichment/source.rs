//! Source Resolver
//!
//! 裏付けソース集合から単一の正規ソースラベルを決定する

use crate::enrichment::types::UNKNOWN_SOURCE;

/// 優先順位に従って正規ソースラベルを1つ返す
///
/// 優先順位: `internal` → `MISP`（misp の正規表記）→ `public`
/// （osint または public）→ `unknown`。複数ソースが裏付けていても
/// 返すラベルは常に1つ（表示の単純化であってマージではない）。
/// misp / public / osint の判定は大文字小文字を区別しない。
pub fn resolve_source(sources: &[String]) -> String {
    if sources.iter().any(|s| s == "internal") {
        return "internal".to_string();
    }
    if sources.iter().any(|s| s.eq_ignore_ascii_case("misp")) {
        return "MISP".to_string();
    }
    if sources
        .iter()
        .any(|s| s.eq_ignore_ascii_case("osint") || s.eq_ignore_ascii_case("public"))
    {
        return "public".to_string();
    }
    UNKNOWN_SOURCE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_internal_beats_everything() {
        assert_eq!(resolve_source(&sources(&["internal", "misp"])), "internal");
        assert_eq!(
            resolve_source(&sources(&["internal", "misp", "osint"])),
            "internal"
        );
    }

    #[test]
    fn test_misp_gets_canonical_casing() {
        assert_eq!(resolve_source(&sources(&["misp"])), "MISP");
        assert_eq!(resolve_source(&sources(&["MiSp", "osint"])), "MISP");
    }

    #[test]
    fn test_osint_resolves_to_public() {
        assert_eq!(resolve_source(&sources(&["osint"])), "public");
        assert_eq!(resolve_source(&sources(&["Public"])), "public");
    }

    #[test]
    fn test_empty_set_is_unknown() {
        assert_eq!(resolve_source(&[]), "unknown");
    }
}
