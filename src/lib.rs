//! Tool Matcher - ranked tool recommendations for free-text requests
//!
//! Scores a fixed catalog of agency tools against what a visitor types:
//! - Synonym expansion so "site", "web" and "online" all reach website tools
//! - Ordered intent and business-stage classification (first match wins)
//! - Weighted scoring over keywords, intent affinity, stage fit, use cases and context
//! - Primary/secondary ranking with a one-line explanation and per-tool reasons
//!
//! # Example
//!
//! ```
//! use tool_matcher::{Catalog, ToolMatchingEngine};
//!
//! let engine = ToolMatchingEngine::new(Catalog::builtin().unwrap());
//! let results = engine.find_best_matches("I need a domain name for my startup", None);
//! assert!(!results.primary.is_empty());
//! ```

pub mod catalog;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod scoring;

pub use catalog::{BusinessStage, Catalog, Category, ComplexityLevel, Solution, TimeToValue, Tool};
pub use classify::{detect_stage, extract_intent, Intent, QueryStage};
pub use engine::{
    ConfidenceThresholds, MatchContext, MatchQuality, MatchResult, SearchResults,
    ToolMatchingEngine, DEFAULT_COMPLEMENTARY_LIMIT, RELEVANCE_THRESHOLD,
};
pub use error::MatcherError;
pub use normalize::normalize;
pub use scoring::{explain_match, score, MatchWeights};
