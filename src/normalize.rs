//! Query normalization and tokenization.
//!
//! Normalization is purely additive: the lowercased query is kept intact and
//! the canonical concept word is appended once for every synonym found in it,
//! so keyword matching can hit either spelling.

use lazy_static::lazy_static;
use regex::Regex;

/// Words this short or shorter are ignored by every lexical signal
const MIN_WORD_LEN: usize = 2;

// ============================================================================
// Synonym Table
// ============================================================================

/// Canonical concept -> synonym phrases, in expansion order
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("website", &["site", "web", "online", "digital presence", "internet"]),
    ("marketing", &["promotion", "advertising", "outreach", "campaigns"]),
    ("branding", &["brand", "logo", "identity", "visual style"]),
    ("content", &["blog", "article", "copywriting", "posts", "writing"]),
    ("email", &["newsletter", "mailing list", "inbox", "e-mail"]),
    ("social media", &["instagram", "facebook", "linkedin", "tiktok", "twitter", "social"]),
    ("seo", &["search engine", "ranking", "google", "organic traffic"]),
    ("analytics", &["metrics", "statistics", "reporting", "kpi", "dashboard"]),
    ("automation", &["automate", "workflow", "streamline", "repetitive"]),
    ("proposal", &["pitch", "quote", "tender", "rfp"]),
    ("domain", &["url", "web address", "domain name"]),
    ("pricing", &["price", "cost", "rates", "fees"]),
    ("startup", &["new business", "starting", "founder", "entrepreneur", "small business"]),
    ("sales", &["selling", "revenue", "deals", "leads", "customers"]),
];

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Lowercase, trim, and append canonical concepts for every synonym hit
pub fn normalize(input: &str) -> String {
    let msg = input.trim().to_lowercase();
    let mut normalized = msg.clone();

    for (canonical, synonyms) in SYNONYMS {
        for synonym in *synonyms {
            if msg.contains(synonym) {
                normalized.push(' ');
                normalized.push_str(canonical);
            }
        }
    }

    normalized
}

/// Split on whitespace, keeping words longer than two characters
pub fn words(normalized: &str) -> Vec<&str> {
    RE_WHITESPACE
        .split(normalized)
        .filter(|w| w.chars().count() > MIN_WORD_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize("  Hello THERE  "), "hello there");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
    }

    #[test]
    fn test_synonym_appends_canonical() {
        let n = normalize("I need a site");
        assert!(n.starts_with("i need a site"));
        assert!(n.ends_with(" website"));
    }

    #[test]
    fn test_expansion_is_additive() {
        let n = normalize("Advertising for my bakery");
        assert!(n.contains("advertising for my bakery"));
        assert!(n.contains("marketing"));
    }

    #[test]
    fn test_each_synonym_hit_appends() {
        // "website" contains both "site" and "web"
        let n = normalize("website");
        assert_eq!(n, "website website website");
    }

    #[test]
    fn test_words_drop_short_tokens() {
        assert_eq!(words("i need a new   website"), vec!["need", "new", "website"]);
        assert!(words("").is_empty());
    }

    #[test]
    fn test_words_count_chars_not_bytes() {
        assert_eq!(words("né café"), vec!["café"]);
    }
}
