//! Threat Matcher
//!
//! 順序付きルール列に対する先頭一致で脅威タイプを決定する

use crate::enrichment::types::{ThreatRule, UNKNOWN_THREAT};

/// IOCを順序付きルール列と照合し、最初にマッチしたルールの脅威タイプを返す
///
/// ルールの順序は呼び出し側が制御するタイブレークポリシーであり、
/// 「最長一致」や「最良一致」の意味論は持たない。IPプレフィックスルールは
/// 単純な前方一致（CIDR非対応）、キーワードルールは大文字小文字を区別しない
/// 部分一致。どのルールにもマッチしなければ `unknown` を返す。
pub fn match_threat(ioc: &str, rules: &[ThreatRule]) -> String {
    let ioc_lower = ioc.to_lowercase();
    for rule in rules {
        match rule {
            ThreatRule::IpRange { ip_range, .. } => {
                if ioc.starts_with(ip_range.as_str()) {
                    return rule.threat_type().to_string();
                }
            }
            ThreatRule::Keyword { keyword, .. } => {
                let keyword = keyword.trim().to_lowercase();
                if !keyword.is_empty() && ioc_lower.contains(&keyword) {
                    return rule.threat_type().to_string();
                }
            }
        }
    }
    UNKNOWN_THREAT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_rule(keyword: &str, threat_type: &str) -> ThreatRule {
        ThreatRule::Keyword {
            keyword: keyword.to_string(),
            threat_type: threat_type.to_string(),
        }
    }

    fn ip_rule(prefix: &str, threat_type: &str) -> ThreatRule {
        ThreatRule::IpRange {
            ip_range: prefix.to_string(),
            threat_type: threat_type.to_string(),
        }
    }

    #[test]
    fn test_first_match_wins() {
        // 後続ルールの方が長くマッチしても先頭のルールが優先される
        let rules = vec![keyword_rule("a", "X"), keyword_rule("ab", "Y")];
        assert_eq!(match_threat("ab", &rules), "X");
    }

    #[test]
    fn test_ip_prefix_match() {
        let rules = vec![ip_rule("8.8.8.", "botnet")];
        assert_eq!(match_threat("8.8.8.8", &rules), "botnet");
        assert_eq!(match_threat("8.8.9.8", &rules), "unknown");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let rules = vec![keyword_rule("EVIL", "malware")];
        assert_eq!(match_threat("login.evil-site.com", &rules), "malware");
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let rules = vec![keyword_rule("   ", "malware"), keyword_rule("evil", "phishing")];
        assert_eq!(match_threat("evil.com", &rules), "phishing");
    }

    #[test]
    fn test_no_rules_returns_unknown() {
        assert_eq!(match_threat("anything", &[]), "unknown");
    }
}
