//! IOC Enrichment Module
//!
//! このモジュールは、生のIOC（侵害指標）を分類・ルールマッチング・
//! 信頼度スコアリング・ソース解決によってエンリッチする機能を実装します。

pub mod classifier;
pub mod confidence;
pub mod engine;
pub mod matcher;
pub mod source;
pub mod types;

// 主要な型と構造体の再エクスポート
pub use classifier::*;
pub use confidence::*;
pub use engine::*;
pub use matcher::*;
pub use source::*;
pub use types::*;
