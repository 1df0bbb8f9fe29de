//! `tool-matcher` CLI
//!
//! # Commands
//! - `search <QUERY...>`: rank the catalog against a query
//! - `complement <TOOL_ID>`: tools that pair well with a chosen tool
//! - `list`: print the catalog
//! - `hook`: read `{"query": ..., "context": {...}}` from stdin, write results JSON
//!
//! Logs go to stderr (`RUST_LOG=debug` for details); stdout carries only output.

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, error, info};

use tool_matcher::config::{self, CATALOG_ENV};
use tool_matcher::{
    Category, Intent, MatchContext, MatchQuality, MatchResult, MatcherError, QueryStage,
    SearchResults, Solution, ToolMatchingEngine, DEFAULT_COMPLEMENTARY_LIMIT,
};

#[derive(Debug, Parser)]
#[command(name = "tool-matcher", version, about = "Recommend agency tools for a free-text request")]
struct Cli {
    /// Tool catalog JSON file (defaults to the user config dir, then the built-in catalog)
    #[arg(long, global = true, env = CATALOG_ENV)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank tools for a query
    Search {
        /// What the user is looking for
        #[arg(required = true)]
        query: Vec<String>,

        /// Preferred tool category
        #[arg(long)]
        category: Option<Category>,

        /// Product suite the user is currently in
        #[arg(long)]
        solution: Option<Solution>,

        /// Tools the user already used (repeatable)
        #[arg(long = "previous")]
        previous: Vec<String>,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// List tools that complement a tool
    Complement {
        tool_id: String,

        #[arg(long, default_value_t = DEFAULT_COMPLEMENTARY_LIMIT)]
        limit: usize,

        #[arg(long)]
        json: bool,
    },
    /// Print the catalog
    List,
    /// Answer one JSON request from stdin
    Hook,
}

/// Request payload for `hook`
#[derive(Debug, Deserialize)]
struct HookInput {
    #[serde(default)]
    query: String,

    #[serde(default)]
    context: Option<MatchContext>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let is_hook = matches!(cli.command, Command::Hook);

    if let Err(e) = run(cli) {
        error!("Error: {}", e);
        if is_hook {
            // Empty answer keeps the caller's UI responsive
            let output = SearchResults::empty(Intent::General, QueryStage::General);
            println!("{}", serde_json::to_string(&output).unwrap_or_default());
            std::process::exit(0);
        }
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), MatcherError> {
    let source = config::resolve_catalog_source(cli.catalog.as_deref());
    debug!("Catalog source: {:?}", source);
    let engine = ToolMatchingEngine::new(config::load_catalog(&source)?);

    match cli.command {
        Command::Search {
            query,
            category,
            solution,
            previous,
            json,
        } => {
            let query = query.join(" ");
            let context = MatchContext {
                preferred_category: category,
                current_solution: solution,
                previous_tools: previous,
            };
            info!("Processing query: {}", truncate(&query, 50));
            let results = engine.find_best_matches(&query, Some(&context));
            if json {
                println!("{}", to_json(&results, true)?);
            } else {
                print_results(&results);
            }
        }
        Command::Complement {
            tool_id,
            limit,
            json,
        } => {
            let tools = engine.get_complementary_tools(&tool_id, limit);
            if json {
                println!("{}", to_json(&tools, true)?);
            } else if tools.is_empty() {
                println!("No complementary tools for {}", tool_id.bold());
            } else {
                for tool in tools {
                    println!(
                        "{} {} [{} / {}]",
                        "+".green(),
                        tool.name.bold(),
                        tool.category,
                        tool.solution
                    );
                }
            }
        }
        Command::List => {
            for tool in engine.catalog() {
                println!(
                    "{:<32} {:<12} {:<16} {}",
                    tool.id.bold(),
                    tool.category.as_str(),
                    tool.solution.as_str(),
                    tool.description.dimmed()
                );
            }
        }
        Command::Hook => {
            let mut input_json = String::new();
            io::stdin().read_to_string(&mut input_json)?;
            debug!("Received input: {}", input_json);

            let input: HookInput = serde_json::from_str(&input_json)?;
            let results = engine.find_best_matches(&input.query, input.context.as_ref());
            println!("{}", to_json(&results, false)?);
        }
    }

    Ok(())
}

fn print_results(results: &SearchResults) {
    let quality = results.quality();
    let label = match quality {
        MatchQuality::High => quality.as_str().green(),
        MatchQuality::Medium => quality.as_str().yellow(),
        MatchQuality::Low => quality.as_str().red(),
    };

    println!("{}", results.explanation.bold());
    println!(
        "intent: {}  stage: {}  found: {}  confidence: {:.2} ({})",
        results.intent, results.business_stage, results.total_found, results.confidence, label
    );

    for m in &results.primary {
        print_match(m, true);
    }
    if !results.secondary.is_empty() {
        println!("{}", "Also consider:".dimmed());
        for m in &results.secondary {
            print_match(m, false);
        }
    }
}

fn print_match(m: &MatchResult, primary: bool) {
    let marker = if primary { "★".yellow() } else { "·".white() };
    println!(
        "{} {} ({:.2}) - {}",
        marker,
        m.tool.name.bold(),
        m.score,
        m.tool.description
    );
    if !m.reasons.is_empty() {
        println!("    {}", m.reasons.join(", ").cyan());
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, MatcherError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(MatcherError::OutputSerialize)
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_output_errors_are_not_input_errors() {
        // JSON object keys must be strings
        let mut unrenderable = HashMap::new();
        unrenderable.insert((1u8, 2u8), "x");

        let err = to_json(&unrenderable, false).unwrap_err();
        assert!(matches!(err, MatcherError::OutputSerialize(_)));
        assert!(err.to_string().starts_with("Failed to serialize output"));
    }

    #[test]
    fn test_to_json_renders_results() {
        let results = SearchResults::empty(Intent::General, QueryStage::General);
        let compact = to_json(&results, false).unwrap();
        assert!(compact.contains("\"totalFound\":0"));
        assert!(to_json(&results, true).unwrap().contains('\n'));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 50), "hi");
    }
}
