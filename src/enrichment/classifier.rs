//! IOC Classifier
//!
//! IOC文字列を構造的タイプに分類する

use crate::enrichment::types::IndicatorType;
use crate::error::{Error, Result};
use regex::Regex;

/// IOC分類器
///
/// 事前コンパイル済みの正規表現を保持し、順序付き先頭一致で分類する。
/// 分類は全域関数であり、不正な入力に対しても必ず値を返す。
pub struct IocClassifier {
    /// IPv4 ドット付き4整数の正規表現
    ipv4_regex: Regex,
    /// 16進ハッシュ（8文字以上）の正規表現
    hash_regex: Regex,
    /// メールアドレス形式の正規表現
    email_regex: Regex,
    /// ドメイン名形式の正規表現
    domain_regex: Regex,
}

impl IocClassifier {
    /// 新しい分類器を作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            ipv4_regex: Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$")
                .map_err(|e| Error::Configuration(format!("Invalid IPv4 regex: {}", e)))?,

            hash_regex: Regex::new(r"^[a-fA-F0-9]{8,}$")
                .map_err(|e| Error::Configuration(format!("Invalid hash regex: {}", e)))?,

            email_regex: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .map_err(|e| Error::Configuration(format!("Invalid email regex: {}", e)))?,

            // IPv4形式は手前のステップで分類済みなので、ここで到達する
            // 文字列に否定先読みは不要
            domain_regex: Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .map_err(|e| Error::Configuration(format!("Invalid domain regex: {}", e)))?,
        })
    }

    /// IOC文字列を構造的タイプに分類
    ///
    /// 判定順序: IPv4 → 16進ハッシュ → メール → ドメイン → file-hash
    /// （最後の file-hash は意図的なキャッチオールのフォールバック）
    pub fn classify(&self, ioc: &str) -> IndicatorType {
        if self.ipv4_regex.is_match(ioc) {
            IndicatorType::Ipv4Addr
        } else if self.hash_regex.is_match(ioc) {
            IndicatorType::FileHash
        } else if self.email_regex.is_match(ioc) {
            IndicatorType::EmailAddr
        } else if self.domain_regex.is_match(ioc) {
            IndicatorType::DomainName
        } else {
            IndicatorType::FileHash
        }
    }
}

impl Default for IocClassifier {
    fn default() -> Self {
        Self::new().expect("built-in classifier patterns are valid")
    }
}
