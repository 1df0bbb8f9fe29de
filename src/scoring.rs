//! Per-tool scoring and match reasons.
//!
//! A tool's score is a weighted sum of five sub-scores, each already in
//! `[0, 1]`, rounded to two decimals:
//!
//! | signal   | weight |
//! |----------|--------|
//! | keyword  | 0.40   |
//! | intent   | 0.25   |
//! | stage    | 0.20   |
//! | use case | 0.10   |
//! | context  | 0.05   |

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::catalog::{ComplexityLevel, TimeToValue, Tool};
use crate::classify::{Intent, QueryStage};
use crate::engine::MatchContext;
use crate::normalize;

/// Affinity for tools or intents missing from the table
const DEFAULT_INTENT_AFFINITY: f64 = 0.3;

/// Stage sub-score when the query names no stage
const GENERAL_STAGE_FIT: f64 = 0.6;

/// Stage sub-score when only a neighbouring stage is served
const ADJACENT_STAGE_FIT: f64 = 0.4;

const NO_STAGE_FIT: f64 = 0.1;

/// Added per matching use-case phrase
const USE_CASE_HIT: f64 = 0.3;

const CATEGORY_BONUS: f64 = 0.5;
const SOLUTION_BONUS: f64 = 0.3;
const PREVIOUS_TOOL_BONUS: f64 = 0.2;

// ============================================================================
// Scoring Weights
// ============================================================================

/// Weight applied to each sub-score; the weights sum to 1.0
#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    /// Lexical overlap with keywords, name and description
    pub keyword: f64,
    /// Tool affinity for the classified intent
    pub intent: f64,
    /// Fit between query stage and the tool's business stages
    pub stage: f64,
    /// Overlap with use-case phrases
    pub use_case: f64,
    /// Session context bonus
    pub context: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            keyword: 0.40,
            intent: 0.25,
            stage: 0.20,
            use_case: 0.10,
            context: 0.05,
        }
    }
}

// ============================================================================
// Intent Affinity (tool id x intent)
// ============================================================================

lazy_static! {
    static ref INTENT_AFFINITY: HashMap<&'static str, &'static [(Intent, f64)]> = {
        let mut m: HashMap<&'static str, &'static [(Intent, f64)]> = HashMap::new();
        m.insert("domain-name-genie", &[(Intent::Create, 0.9), (Intent::Learn, 0.5)]);
        m.insert("business-name-generator", &[(Intent::Create, 1.0), (Intent::Learn, 0.4)]);
        m.insert("logo-concept-studio", &[(Intent::Create, 1.0), (Intent::Improve, 0.5)]);
        m.insert("brand-voice-builder", &[(Intent::Create, 0.8), (Intent::Improve, 0.7)]);
        m.insert(
            "marketing-plan-generator",
            &[(Intent::Create, 0.8), (Intent::Improve, 0.7), (Intent::Learn, 0.6)],
        );
        m.insert(
            "social-media-post-generator",
            &[(Intent::Create, 1.0), (Intent::Improve, 0.5), (Intent::Automate, 0.4)],
        );
        m.insert("blog-post-writer", &[(Intent::Create, 1.0), (Intent::Improve, 0.6)]);
        m.insert(
            "email-campaign-writer",
            &[(Intent::Create, 0.9), (Intent::Improve, 0.6), (Intent::Automate, 0.5)],
        );
        m.insert(
            "seo-audit-assistant",
            &[(Intent::Analyze, 1.0), (Intent::Improve, 0.9), (Intent::Learn, 0.5)],
        );
        m.insert(
            "analytics-dashboard-advisor",
            &[(Intent::Analyze, 1.0), (Intent::Learn, 0.6), (Intent::Improve, 0.5)],
        );
        m.insert("proposal-generator", &[(Intent::Create, 1.0), (Intent::Automate, 0.6)]);
        m.insert(
            "pricing-strategy-advisor",
            &[(Intent::Improve, 0.8), (Intent::Analyze, 0.7), (Intent::Learn, 0.5)],
        );
        m.insert(
            "workflow-automation-planner",
            &[(Intent::Automate, 1.0), (Intent::Improve, 0.7)],
        );
        m
    };
}

pub fn intent_affinity(tool_id: &str, intent: Intent) -> f64 {
    INTENT_AFFINITY
        .get(tool_id)
        .and_then(|row| row.iter().find(|(i, _)| *i == intent))
        .map(|(_, affinity)| *affinity)
        .unwrap_or(DEFAULT_INTENT_AFFINITY)
}

// ============================================================================
// Sub-scores
// ============================================================================

/// The five sub-scores behind a tool's final score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub intent: f64,
    pub stage: f64,
    pub use_case: f64,
    pub context: f64,
}

impl ScoreBreakdown {
    /// Weighted sum rounded to two decimals
    pub fn total(&self, weights: &MatchWeights) -> f64 {
        let raw = self.keyword * weights.keyword
            + self.intent * weights.intent
            + self.stage * weights.stage
            + self.use_case * weights.use_case
            + self.context * weights.context;
        round2(raw).clamp(0.0, 1.0)
    }

    /// Whether the query text itself overlaps the tool at all
    pub fn has_lexical_evidence(&self) -> bool {
        self.keyword > 0.0 || self.use_case > 0.0
    }
}

/// Compute every sub-score for one tool against pre-tokenized query words
pub fn score_breakdown(
    tool: &Tool,
    words: &[&str],
    intent: Intent,
    stage: QueryStage,
    context: &MatchContext,
) -> ScoreBreakdown {
    ScoreBreakdown {
        keyword: keyword_score(tool, words),
        intent: intent_affinity(&tool.id, intent),
        stage: stage_fit(tool, stage),
        use_case: use_case_score(tool, words),
        context: context_bonus(tool, context),
    }
}

/// Final score of `tool` for an already normalized query
pub fn score(
    tool: &Tool,
    normalized: &str,
    intent: Intent,
    stage: QueryStage,
    context: &MatchContext,
) -> f64 {
    let words = normalize::words(normalized);
    score_breakdown(tool, &words, intent, stage, context).total(&MatchWeights::default())
}

/// Two points per keyword/word containment in either direction, one point per
/// word found in the name or description, over two points per word.
fn keyword_score(tool: &Tool, words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }

    let mut matches: usize = 0;

    for keyword in &tool.keywords {
        let kw_lower = keyword.to_lowercase();
        for word in words {
            if word.contains(kw_lower.as_str()) || kw_lower.contains(word) {
                matches += 2;
            }
        }
    }

    let text = format!("{} {}", tool.name, tool.description).to_lowercase();
    matches += words.iter().filter(|w| text.contains(*w)).count();

    (matches as f64 / (words.len() * 2) as f64).min(1.0)
}

fn stage_fit(tool: &Tool, stage: QueryStage) -> f64 {
    match stage.business_stage() {
        None => GENERAL_STAGE_FIT,
        Some(s) if tool.serves_stage(s) => 1.0,
        Some(s) if s.adjacent().any(|a| tool.serves_stage(a)) => ADJACENT_STAGE_FIT,
        Some(_) => NO_STAGE_FIT,
    }
}

fn use_case_score(tool: &Tool, words: &[&str]) -> f64 {
    let hits = tool
        .use_cases
        .iter()
        .filter(|use_case| {
            let use_case = use_case.to_lowercase();
            words.iter().any(|w| use_case.contains(w))
        })
        .count();

    (hits as f64 * USE_CASE_HIT).min(1.0)
}

fn context_bonus(tool: &Tool, context: &MatchContext) -> f64 {
    let mut bonus = 0.0;
    if context.preferred_category == Some(tool.category) {
        bonus += CATEGORY_BONUS;
    }
    if context.current_solution == Some(tool.solution) {
        bonus += SOLUTION_BONUS;
    }
    if context.previous_tools.iter().any(|id| *id == tool.id) {
        bonus += PREVIOUS_TOOL_BONUS;
    }
    f64::min(bonus, 1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Reasons
// ============================================================================

/// Short justifications shown next to a match, in fixed order
pub fn explain_match(tool: &Tool, stage: QueryStage) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(s) = stage.business_stage() {
        if tool.serves_stage(s) {
            reasons.push(format!("Perfect for {} stage businesses", s.as_str()));
        }
    }
    if tool.time_to_value == TimeToValue::Immediate {
        reasons.push("Quick to implement".to_string());
    }
    if tool.complexity_level == ComplexityLevel::Beginner {
        reasons.push("Easy to use".to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BusinessStage, Category, Solution};

    fn tool(id: &str) -> Tool {
        Tool {
            id: id.to_string(),
            name: "Domain Name Genie".to_string(),
            description: "Find an available domain".to_string(),
            category: Category::Branding,
            solution: Solution::LaunchPad,
            features: vec![],
            keywords: vec!["domain".to_string(), "website".to_string(), "name".to_string()],
            use_cases: vec!["naming a new website".to_string(), "buying a domain".to_string()],
            user_personas: vec![],
            business_stages: vec![BusinessStage::Idea, BusinessStage::Launch],
            complexity_level: ComplexityLevel::Beginner,
            time_to_value: TimeToValue::Immediate,
            href: String::new(),
            icon: String::new(),
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = MatchWeights::default();
        let sum = w.keyword + w.intent + w.stage + w.use_case + w.context;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_score_counts_both_directions() {
        let t = tool("x");
        // "domain": keyword hit (2) + name hit (1); "zzz": nothing
        let score = keyword_score(&t, &["domain", "zzz"]);
        assert!((score - 3.0 / 4.0).abs() < 1e-9);
        // "web" is contained in the keyword "website"
        let score = keyword_score(&t, &["web"]);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_score_no_words() {
        assert_eq!(keyword_score(&tool("x"), &[]), 0.0);
    }

    #[test]
    fn test_keyword_score_capped() {
        let score = keyword_score(&tool("x"), &["domain", "name"]);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_intent_affinity_lookup_and_default() {
        assert_eq!(intent_affinity("seo-audit-assistant", Intent::Analyze), 1.0);
        assert_eq!(intent_affinity("seo-audit-assistant", Intent::Automate), 0.3);
        assert_eq!(intent_affinity("unknown-tool", Intent::Create), 0.3);
        assert_eq!(intent_affinity("domain-name-genie", Intent::General), 0.3);
    }

    #[test]
    fn test_stage_fit_levels() {
        let t = tool("x");
        assert_eq!(stage_fit(&t, QueryStage::Idea), 1.0);
        assert_eq!(stage_fit(&t, QueryStage::General), 0.6);
        assert_eq!(stage_fit(&t, QueryStage::Growth), 0.4);
        assert_eq!(stage_fit(&t, QueryStage::Scale), 0.1);
    }

    #[test]
    fn test_use_case_hits() {
        let t = tool("x");
        assert!((use_case_score(&t, &["website", "domain"]) - 0.6).abs() < 1e-9);
        assert_eq!(use_case_score(&t, &["payroll"]), 0.0);
    }

    #[test]
    fn test_context_bonus_capped_sum() {
        let t = tool("x");
        let ctx = MatchContext {
            preferred_category: Some(Category::Branding),
            current_solution: Some(Solution::LaunchPad),
            previous_tools: vec!["x".to_string()],
        };
        assert!((context_bonus(&t, &ctx) - 1.0).abs() < 1e-9);

        let ctx = MatchContext {
            current_solution: Some(Solution::LaunchPad),
            ..MatchContext::default()
        };
        assert!((context_bonus(&t, &ctx) - 0.3).abs() < 1e-9);
        assert_eq!(context_bonus(&t, &MatchContext::default()), 0.0);
    }

    #[test]
    fn test_score_is_rounded_and_bounded() {
        let t = tool("x");
        let s = score(
            &t,
            "need a domain",
            Intent::General,
            QueryStage::General,
            &MatchContext::default(),
        );
        assert!((0.0..=1.0).contains(&s));
        assert_eq!(s, (s * 100.0).round() / 100.0);
    }

    #[test]
    fn test_lexical_evidence() {
        let none = ScoreBreakdown {
            intent: 0.3,
            stage: 0.6,
            ..ScoreBreakdown::default()
        };
        assert!(!none.has_lexical_evidence());
        let some = ScoreBreakdown {
            use_case: 0.3,
            ..none
        };
        assert!(some.has_lexical_evidence());
    }

    #[test]
    fn test_explain_match_order() {
        let t = tool("x");
        assert_eq!(
            explain_match(&t, QueryStage::Idea),
            vec![
                "Perfect for idea stage businesses".to_string(),
                "Quick to implement".to_string(),
                "Easy to use".to_string(),
            ]
        );
        assert_eq!(explain_match(&t, QueryStage::General).len(), 2);
    }

    #[test]
    fn test_explain_match_can_be_empty() {
        let mut t = tool("x");
        t.complexity_level = ComplexityLevel::Advanced;
        t.time_to_value = TimeToValue::Long;
        assert!(explain_match(&t, QueryStage::Scale).is_empty());
    }
}
