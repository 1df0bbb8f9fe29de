//! Intent and business-stage classification.
//!
//! Both classifiers walk a fixed, ordered trigger table and return the first
//! label with any trigger contained in the normalized query. Ambiguous queries
//! resolve by declaration order, never by match count.

use serde::Serialize;
use std::fmt;

use crate::catalog::BusinessStage;

// ============================================================================
// Intent
// ============================================================================

/// What the user is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Create,
    Improve,
    Analyze,
    Automate,
    Learn,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Create => "create",
            Intent::Improve => "improve",
            Intent::Analyze => "analyze",
            Intent::Automate => "automate",
            Intent::Learn => "learn",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent triggers in precedence order
const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::Create,
        &["create", "make", "build", "generate", "design", "craft", "develop"],
    ),
    (
        Intent::Improve,
        &["better", "improve", "optimize", "enhance", "boost", "increase"],
    ),
    (
        Intent::Analyze,
        &["analyze", "measure", "track", "understand", "insights", "data"],
    ),
    (
        Intent::Automate,
        &["automate", "streamline", "efficient", "save time", "automatic"],
    ),
    (
        Intent::Learn,
        &["learn", "understand", "know", "help", "guide", "how to"],
    ),
];

pub fn extract_intent(normalized: &str) -> Intent {
    first_match(INTENT_TRIGGERS, normalized).unwrap_or(Intent::General)
}

// ============================================================================
// Business Stage
// ============================================================================

/// Stage inferred from the query; `General` when nothing matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStage {
    Idea,
    Launch,
    Growth,
    Scale,
    General,
}

impl QueryStage {
    /// The concrete lifecycle stage, if any
    pub fn business_stage(&self) -> Option<BusinessStage> {
        match self {
            QueryStage::Idea => Some(BusinessStage::Idea),
            QueryStage::Launch => Some(BusinessStage::Launch),
            QueryStage::Growth => Some(BusinessStage::Growth),
            QueryStage::Scale => Some(BusinessStage::Scale),
            QueryStage::General => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self.business_stage() {
            Some(stage) => stage.as_str(),
            None => "general",
        }
    }
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage triggers in precedence order.
/// "launch" sits under Idea as well as Launch; Idea is checked first.
const STAGE_TRIGGERS: &[(QueryStage, &[&str])] = &[
    (
        QueryStage::Idea,
        &["starting", "new", "beginning", "launch", "startup", "idea", "planning"],
    ),
    (
        QueryStage::Launch,
        &["launching", "going live", "start", "begin", "initial", "first"],
    ),
    (
        QueryStage::Growth,
        &["growing", "scaling", "expanding", "increase", "improve", "optimize"],
    ),
    (
        QueryStage::Scale,
        &["scaling up", "enterprise", "large", "established", "mature"],
    ),
];

pub fn detect_stage(normalized: &str) -> QueryStage {
    first_match(STAGE_TRIGGERS, normalized).unwrap_or(QueryStage::General)
}

fn first_match<L: Copy>(table: &[(L, &[&str])], text: &str) -> Option<L> {
    table
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| text.contains(t)))
        .map(|(label, _)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_single_trigger() {
        assert_eq!(extract_intent("create a logo"), Intent::Create);
        assert_eq!(extract_intent("boost my sales"), Intent::Improve);
        assert_eq!(extract_intent("track visitors"), Intent::Analyze);
        assert_eq!(extract_intent("save time on invoices"), Intent::Automate);
        assert_eq!(extract_intent("how to price"), Intent::Learn);
    }

    #[test]
    fn test_intent_defaults_to_general() {
        assert_eq!(extract_intent(""), Intent::General);
        assert_eq!(extract_intent("domain name"), Intent::General);
    }

    #[test]
    fn test_intent_first_declared_wins() {
        // "understand" is both an analyze and a learn trigger
        assert_eq!(extract_intent("analyze and understand"), Intent::Analyze);
        assert_eq!(extract_intent("learn to build"), Intent::Create);
    }

    #[test]
    fn test_stage_detection() {
        assert_eq!(detect_stage("going live soon"), QueryStage::Launch);
        assert_eq!(detect_stage("we are growing fast"), QueryStage::Growth);
        assert_eq!(detect_stage("enterprise rollout"), QueryStage::Scale);
        assert_eq!(detect_stage("a brand refresh"), QueryStage::General);
    }

    #[test]
    fn test_launch_resolves_to_idea() {
        assert_eq!(detect_stage("launch"), QueryStage::Idea);
        assert_eq!(detect_stage("launching next week"), QueryStage::Idea);
    }

    #[test]
    fn test_scaling_up_hits_growth_first() {
        assert_eq!(detect_stage("scaling up"), QueryStage::Growth);
    }

    #[test]
    fn test_query_stage_maps_to_business_stage() {
        assert_eq!(QueryStage::Growth.business_stage(), Some(BusinessStage::Growth));
        assert_eq!(QueryStage::General.business_stage(), None);
        assert_eq!(QueryStage::General.to_string(), "general");
    }
}
