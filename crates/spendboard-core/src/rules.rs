//! Category rule table
//!
//! Rules are loaded with a two-layer resolution:
//! 1. An explicit override path (`--rules`), or the data dir override
//!    (~/.local/share/spendboard/categories.toml) when present
//! 2. The embedded defaults (compiled into binary)
//!
//! The rule order is fixed: one rule per assignable category, in
//! [`Category::RULE_ORDER`]. Overrides may change keywords, never the order.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Category;

/// Embedded default rules (compiled into binary)
const DEFAULT_RULES: &str = include_str!("../../../config/categories.toml");

/// Where a rule set was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for RuleOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "built-in defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rule: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    category: Category,
    #[serde(default)]
    keywords: Vec<String>,
}

/// One keyword rule: fires when the description contains any keyword
#[derive(Debug, Clone)]
pub struct CategoryRule {
    category: Category,
    keywords: Vec<String>,
    /// Alternation of the escaped keywords; None when there are no keywords
    matcher: Option<Regex>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Result<Self> {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        Self::from_keywords(category, keywords)
    }

    fn from_keywords(category: Category, keywords: Vec<String>) -> Result<Self> {
        if category == Category::Unassigned {
            return Err(Error::Config(
                "'unassigned' is the fallback label and cannot have a rule".into(),
            ));
        }

        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let matcher = if keywords.is_empty() {
            None
        } else {
            let pattern = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&pattern)?)
        };

        Ok(Self {
            category,
            keywords,
            matcher,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Check a lowercased description against this rule
    pub fn matches(&self, description: &str) -> bool {
        self.matcher
            .as_ref()
            .map(|re| re.is_match(description))
            .unwrap_or(false)
    }
}

/// The ordered rule table
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
    origin: RuleOrigin,
}

impl RuleSet {
    /// The built-in rule table
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_RULES, RuleOrigin::Embedded)
    }

    /// Load rules: explicit path, then data dir override, then built-in defaults
    ///
    /// An explicit path that does not exist is an error; a missing data dir
    /// override silently falls back to the defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            return Self::from_file(path);
        }

        if let Some(default_path) = default_rules_path() {
            if default_path.exists() {
                return Self::from_file(&default_path);
            }
        }

        Self::embedded()
    }

    /// Load rules from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read rules {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content, RuleOrigin::File(path.to_path_buf()))
    }

    /// Parse and validate a rules document
    pub fn from_toml(content: &str, origin: RuleOrigin) -> Result<Self> {
        let file: RulesFile = toml::from_str(content)?;

        let found: Vec<Category> = file.rule.iter().map(|r| r.category).collect();
        if found != Category::RULE_ORDER {
            let expected = Category::RULE_ORDER
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::Config(format!(
                "Rules must list each category once, in order: {}",
                expected
            )));
        }

        let rules = file
            .rule
            .into_iter()
            .map(|entry| CategoryRule::from_keywords(entry.category, entry.keywords))
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} category rules from {}", rules.len(), origin);
        Ok(Self { rules, origin })
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn origin(&self) -> &RuleOrigin {
        &self.origin
    }
}

/// Default rules override path
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendboard").join("categories.toml"))
}
