//! # threat-detector-rs
//!
//! IOC enrichment engine for threat intelligence pipelines.
//!
//! This crate ingests raw indicators of compromise (IP addresses, domains,
//! file hashes, email addresses) and produces enriched records: each IOC is
//! tagged with its structural type, a threat category from first-match rule
//! evaluation, a bounded confidence score from corroborating feeds, and the
//! canonical feed that vouches for it. Feed and rule loading, configuration
//! and logging live in collaborator modules around the pure engine core.

pub mod config;
pub mod enrichment;
pub mod error;
pub mod feeds;
pub mod localtime;
pub mod logging;
pub mod pipeline;

pub use enrichment::{EnrichedIoc, EnrichmentEngine, FeedStore, IndicatorType, ThreatRule};
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::Feed("test".to_string());
        assert!(err.to_string().contains("test"));
    }
}
