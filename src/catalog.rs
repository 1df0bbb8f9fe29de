//! Tool catalog: the immutable list of tools the engine ranks.
//!
//! The catalog is an ordered JSON array of tool records. Order matters: it is
//! the tie-break for equal scores and the result order of complementary lookups.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::MatcherError;

/// Catalog shipped with the binary
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

// ============================================================================
// Closed label sets
// ============================================================================

/// Tool category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Branding,
    Marketing,
    Content,
    Analytics,
    Business,
    Productivity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Branding => "Branding",
            Category::Marketing => "Marketing",
            Category::Content => "Content",
            Category::Analytics => "Analytics",
            Category::Business => "Business",
            Category::Productivity => "Productivity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "branding" => Ok(Category::Branding),
            "marketing" => Ok(Category::Marketing),
            "content" => Ok(Category::Content),
            "analytics" => Ok(Category::Analytics),
            "business" => Ok(Category::Business),
            "productivity" => Ok(Category::Productivity),
            _ => Err(format!("unknown category '{}'", s)),
        }
    }
}

/// Product suite a tool belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Solution {
    LaunchPad,
    GrowthEngine,
    ContentStudio,
    InsightHub,
    OperationsSuite,
}

impl Solution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Solution::LaunchPad => "LaunchPad",
            Solution::GrowthEngine => "GrowthEngine",
            Solution::ContentStudio => "ContentStudio",
            Solution::InsightHub => "InsightHub",
            Solution::OperationsSuite => "OperationsSuite",
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Solution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "launchpad" => Ok(Solution::LaunchPad),
            "growthengine" => Ok(Solution::GrowthEngine),
            "contentstudio" => Ok(Solution::ContentStudio),
            "insighthub" => Ok(Solution::InsightHub),
            "operationssuite" => Ok(Solution::OperationsSuite),
            _ => Err(format!("unknown solution '{}'", s)),
        }
    }
}

/// Business maturity stage, in lifecycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStage {
    Idea,
    Launch,
    Growth,
    Scale,
}

impl BusinessStage {
    /// All stages in lifecycle order
    pub const ORDERED: [BusinessStage; 4] = [
        BusinessStage::Idea,
        BusinessStage::Launch,
        BusinessStage::Growth,
        BusinessStage::Scale,
    ];

    /// Position in the lifecycle (idea = 0)
    pub fn position(&self) -> usize {
        match self {
            BusinessStage::Idea => 0,
            BusinessStage::Launch => 1,
            BusinessStage::Growth => 2,
            BusinessStage::Scale => 3,
        }
    }

    /// Stages one step before and after this one
    pub fn adjacent(&self) -> impl Iterator<Item = BusinessStage> {
        let pos = self.position();
        Self::ORDERED
            .into_iter()
            .filter(move |s| s.position().abs_diff(pos) == 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessStage::Idea => "idea",
            BusinessStage::Launch => "launch",
            BusinessStage::Growth => "growth",
            BusinessStage::Scale => "scale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeToValue {
    Immediate,
    Short,
    Medium,
    Long,
}

// ============================================================================
// Tool record
// ============================================================================

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique identifier, also the key of the intent affinity table
    pub id: String,

    pub name: String,

    pub description: String,

    pub category: Category,

    pub solution: Solution,

    /// Capability bullets (display only)
    #[serde(default)]
    pub features: Vec<String>,

    /// Terms matched lexically against the query
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Scenario phrases the tool serves
    #[serde(default)]
    pub use_cases: Vec<String>,

    #[serde(default)]
    pub user_personas: Vec<String>,

    #[serde(default)]
    pub business_stages: Vec<BusinessStage>,

    pub complexity_level: ComplexityLevel,

    pub time_to_value: TimeToValue,

    #[serde(default)]
    pub href: String,

    #[serde(default)]
    pub icon: String,
}

impl Tool {
    pub fn serves_stage(&self, stage: BusinessStage) -> bool {
        self.business_stages.contains(&stage)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered, validated collection of tools
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<Tool>,
}

impl Catalog {
    /// Build a catalog from tools already in memory, enforcing unique ids
    pub fn new(tools: Vec<Tool>) -> Result<Self, MatcherError> {
        validate(&tools)?;
        Ok(Self { tools })
    }

    /// Parse a JSON array of tool records
    pub fn from_json(content: &str) -> Result<Self, MatcherError> {
        let tools: Vec<Tool> =
            serde_json::from_str(content).map_err(|e| MatcherError::CatalogParse(e.to_string()))?;
        Self::new(tools)
    }

    /// Read and parse a catalog file
    pub fn load(path: &Path) -> Result<Self, MatcherError> {
        if !path.exists() {
            return Err(MatcherError::CatalogNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| MatcherError::CatalogRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let catalog = Self::from_json(&content)?;
        debug!("Loaded {} tools from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// The catalog embedded at compile time
    pub fn builtin() -> Result<Self, MatcherError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Tool;
    type IntoIter = std::slice::Iter<'a, Tool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}

fn validate(tools: &[Tool]) -> Result<(), MatcherError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tools.len());
    for (position, tool) in tools.iter().enumerate() {
        if tool.id.trim().is_empty() {
            return Err(MatcherError::CatalogValidation(format!(
                "tool at position {} has an empty id",
                position
            )));
        }
        if !seen.insert(tool.id.as_str()) {
            return Err(MatcherError::CatalogValidation(format!(
                "duplicate tool id '{}'",
                tool.id
            )));
        }
    }
    Ok(())
}
