//! The tool matching engine: ranking, result assembly and complementary lookup.
//!
//! The engine owns an immutable [`Catalog`] and nothing else. Every call is a
//! pure function of the catalog and its arguments, so one instance can be
//! shared freely across threads or rebuilt per request.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::{Catalog, Category, Solution, Tool};
use crate::classify::{self, Intent, QueryStage};
use crate::normalize;
use crate::scoring::{self, MatchWeights};

/// Matches shown in the primary list
const PRIMARY_SIZE: usize = 3;

/// Matches shown in the secondary list (ranks 4-6)
const SECONDARY_SIZE: usize = 3;

/// Scores at or below this are not matches
pub const RELEVANCE_THRESHOLD: f64 = 0.1;

/// Default result count for complementary lookups
pub const DEFAULT_COMPLEMENTARY_LIMIT: usize = 2;

const EXPLAIN_HIGH: &str = "I found some great matches for your needs!";
const EXPLAIN_MEDIUM: &str = "Here are some tools that should help with what you're looking for:";
const EXPLAIN_NONE: &str =
    "I couldn't find exact matches, but these popular tools might be helpful:";
const EXPLAIN_LOW: &str = "These tools might be helpful based on your request:";

lazy_static! {
    /// Categories worth suggesting next to a tool of the key category
    static ref RELATED_CATEGORIES: HashMap<Category, &'static [Category]> = {
        let mut m: HashMap<Category, &'static [Category]> = HashMap::new();
        m.insert(Category::Branding, &[Category::Marketing, Category::Content]);
        m.insert(
            Category::Marketing,
            &[Category::Branding, Category::Content, Category::Analytics],
        );
        m.insert(Category::Content, &[Category::Marketing, Category::Branding]);
        m.insert(Category::Analytics, &[Category::Marketing, Category::Business]);
        m.insert(Category::Business, &[Category::Analytics, Category::Productivity]);
        m
    };
}

// ============================================================================
// Input / Output Types
// ============================================================================

/// Optional session context that nudges scores toward what the user already uses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchContext {
    pub preferred_category: Option<Category>,
    pub current_solution: Option<Solution>,
    pub previous_tools: Vec<String>,
}

/// A scored tool with the reasons it was suggested
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub tool: Tool,
    /// In [0, 1], two decimals
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Ranked, explained answer to one query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub primary: Vec<MatchResult>,
    pub secondary: Vec<MatchResult>,
    /// Matches above the relevance threshold, including those not returned
    pub total_found: usize,
    pub confidence: f64,
    pub explanation: String,
    pub intent: Intent,
    pub business_stage: QueryStage,
}

impl SearchResults {
    /// Result for a query that matched nothing
    pub fn empty(intent: Intent, business_stage: QueryStage) -> Self {
        Self {
            primary: Vec::new(),
            secondary: Vec::new(),
            total_found: 0,
            confidence: 0.0,
            explanation: EXPLAIN_NONE.to_string(),
            intent,
            business_stage,
        }
    }

    pub fn quality(&self) -> MatchQuality {
        MatchQuality::from_confidence(self.confidence, &ConfidenceThresholds::default())
    }
}

// ============================================================================
// Confidence
// ============================================================================

/// Confidence thresholds for the top match
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    /// Confidence above this is HIGH
    pub high: f64,
    /// Confidence above this (but not above high) is MEDIUM
    pub medium: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.7,
            medium: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    High,
    Medium,
    Low,
}

impl MatchQuality {
    pub fn from_confidence(confidence: f64, thresholds: &ConfidenceThresholds) -> Self {
        if confidence > thresholds.high {
            MatchQuality::High
        } else if confidence > thresholds.medium {
            MatchQuality::Medium
        } else {
            MatchQuality::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchQuality::High => "HIGH",
            MatchQuality::Medium => "MEDIUM",
            MatchQuality::Low => "LOW",
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

pub struct ToolMatchingEngine {
    catalog: Catalog,
    weights: MatchWeights,
    thresholds: ConfidenceThresholds,
}

impl ToolMatchingEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            weights: MatchWeights::default(),
            thresholds: ConfidenceThresholds::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rank the catalog against a free-text query.
    ///
    /// Never fails: unmatched or empty input yields empty lists and the
    /// fallback explanation.
    pub fn find_best_matches(
        &self,
        user_input: &str,
        context: Option<&MatchContext>,
    ) -> SearchResults {
        let default_context = MatchContext::default();
        let context = context.unwrap_or(&default_context);

        let normalized = normalize::normalize(user_input);
        let intent = classify::extract_intent(&normalized);
        let stage = classify::detect_stage(&normalized);
        let words = normalize::words(&normalized);

        debug!(
            "Normalized query: {:?} (intent: {}, stage: {})",
            normalized, intent, stage
        );

        let mut matches: Vec<MatchResult> = self
            .catalog
            .iter()
            .filter_map(|tool| {
                let breakdown = scoring::score_breakdown(tool, &words, intent, stage, context);
                let score = breakdown.total(&self.weights);
                if score > RELEVANCE_THRESHOLD && breakdown.has_lexical_evidence() {
                    Some(MatchResult {
                        tool: tool.clone(),
                        score,
                        reasons: scoring::explain_match(tool, stage),
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stable: equal scores keep catalog order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));

        let total_found = matches.len();
        let mut ranked = matches.into_iter();
        let primary: Vec<MatchResult> = ranked.by_ref().take(PRIMARY_SIZE).collect();
        let secondary: Vec<MatchResult> = ranked.take(SECONDARY_SIZE).collect();

        let confidence = primary.first().map(|m| m.score).unwrap_or(0.0);
        let explanation = self.explain(confidence, primary.is_empty()).to_string();

        debug!(
            "Found {} matches (confidence: {:.2})",
            total_found, confidence
        );

        SearchResults {
            primary,
            secondary,
            total_found,
            confidence,
            explanation,
            intent,
            business_stage: stage,
        }
    }

    /// Tools worth suggesting next to `tool_id`: same solution, or a category
    /// related to the source tool's category. Catalog order, at most `limit`.
    pub fn get_complementary_tools(&self, tool_id: &str, limit: usize) -> Vec<&Tool> {
        let Some(source) = self.catalog.get(tool_id) else {
            debug!("Complementary lookup for unknown tool {:?}", tool_id);
            return Vec::new();
        };

        let related: &[Category] = RELATED_CATEGORIES
            .get(&source.category)
            .copied()
            .unwrap_or(&[]);

        self.catalog
            .iter()
            .filter(|t| t.id != source.id)
            .filter(|t| t.solution == source.solution || related.contains(&t.category))
            .take(limit)
            .collect()
    }

    fn explain(&self, confidence: f64, nothing_found: bool) -> &'static str {
        match MatchQuality::from_confidence(confidence, &self.thresholds) {
            MatchQuality::High => EXPLAIN_HIGH,
            MatchQuality::Medium => EXPLAIN_MEDIUM,
            MatchQuality::Low if nothing_found => EXPLAIN_NONE,
            MatchQuality::Low => EXPLAIN_LOW,
        }
    }
}
