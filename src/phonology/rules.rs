//! Sound-change rules: data-driven, ordered, loaded once.
//!
//! Rules are structs, not code. Authored order is significant and is
//! preserved from the table file through to application.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::categories::category;
use crate::script::{strip_separators, NULL_MARKER};
use crate::tables::error::{TableError, TableResult};

const TABLE: &str = "sound_changes";

category!(
    /// Kind of historical change a rule describes.
    ChangeType {
        Loss => "loss",
        Merger => "merger",
        Split => "split",
        Lenition => "lenition",
        CompensatoryLengthening => "compensatory_lengthening",
        Assimilation => "assimilation",
    }
);

/// Phonological context in which a rule's source is sought.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Environment {
    /// `#_`
    WordInitial,
    /// `_#`
    WordFinal,
    /// `V_V`
    Intervocalic,
    /// Any other notation. Matches anywhere in the form.
    Context(String),
}

impl Environment {
    pub fn parse(notation: &str) -> Self {
        match notation.trim() {
            "#_" => Self::WordInitial,
            "_#" => Self::WordFinal,
            "V_V" => Self::Intervocalic,
            other => Self::Context(other.to_string()),
        }
    }

    pub fn notation(&self) -> &str {
        match self {
            Self::WordInitial => "#_",
            Self::WordFinal => "_#",
            Self::Intervocalic => "V_V",
            Self::Context(raw) => raw,
        }
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.notation().to_string()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.notation())
    }
}

/// One ordered sound change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundChangeRule {
    pub name: String,
    /// Source pattern as authored, e.g. `-t,-d,-k,-g`.
    pub source_pattern: String,
    /// Replacement; `None` deletes the source.
    pub target_pattern: Option<String>,
    pub environment: Environment,
    pub period: String,
    pub change_type: ChangeType,
    pub description: String,
    pub examples: Vec<(String, String)>,
    /// Source alternatives with positional separators stripped.
    #[serde(skip)]
    sources: Vec<String>,
}

impl SoundChangeRule {
    /// Build a rule, splitting comma-separated source alternatives.
    pub fn new(
        name: impl Into<String>,
        source_pattern: impl Into<String>,
        target_pattern: &str,
        environment: Environment,
        change_type: ChangeType,
    ) -> TableResult<Self> {
        let name = name.into();
        let source_pattern = source_pattern.into();
        if name.trim().is_empty() {
            return Err(TableError::invalid(TABLE, "rule with an empty name"));
        }
        let sources: Vec<String> = source_pattern
            .split(',')
            .map(|alt| strip_separators(alt.trim()))
            .filter(|alt| !alt.is_empty())
            .collect();
        if sources.is_empty() {
            return Err(TableError::invalid(
                TABLE,
                format!("rule \"{name}\" has an empty source pattern"),
            ));
        }
        let target = strip_separators(target_pattern.trim());
        let target_pattern = if target.is_empty() || target == NULL_MARKER.to_string() {
            None
        } else {
            Some(target)
        };

        Ok(Self {
            name,
            source_pattern,
            target_pattern,
            environment,
            period: "Unknown".to_string(),
            change_type,
            description: String::new(),
            examples: Vec::new(),
            sources,
        })
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_examples(mut self, examples: Vec<(String, String)>) -> Self {
        self.examples = examples;
        self
    }

    /// Source alternatives, separators stripped.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Target rendered for display, `∅` for deletion.
    pub fn target_display(&self) -> String {
        self.target_pattern
            .clone()
            .unwrap_or_else(|| NULL_MARKER.to_string())
    }
}

/// The ordered rule table.
#[derive(Debug, Clone, Default)]
pub struct SoundChangeTable {
    rules: Vec<SoundChangeRule>,
}

#[derive(Debug, Deserialize)]
struct SoundChangesToml {
    #[serde(default)]
    rule: Vec<RuleToml>,
}

#[derive(Debug, Deserialize)]
struct RuleToml {
    name: String,
    source: String,
    target: String,
    #[serde(default)]
    environment: String,
    #[serde(default = "unknown_period")]
    period: String,
    #[serde(rename = "type")]
    change_type: ChangeType,
    #[serde(default)]
    description: String,
    #[serde(default)]
    examples: Vec<(String, String)>,
}

fn unknown_period() -> String {
    "Unknown".to_string()
}

impl SoundChangeTable {
    pub fn new(rules: Vec<SoundChangeRule>) -> Self {
        Self { rules }
    }

    /// Parse and validate `sound_changes.toml`, keeping authored order.
    pub fn from_toml(text: &str) -> TableResult<Self> {
        let parsed: SoundChangesToml = toml::from_str(text).map_err(|e| TableError::Parse {
            table: TABLE.into(),
            message: e.to_string(),
        })?;
        let rules = parsed
            .rule
            .into_iter()
            .map(|raw| -> TableResult<SoundChangeRule> {
                Ok(SoundChangeRule::new(
                    raw.name,
                    raw.source,
                    &raw.target,
                    Environment::parse(&raw.environment),
                    raw.change_type,
                )?
                .with_period(raw.period)
                .with_description(raw.description)
                .with_examples(raw.examples))
            })
            .collect::<TableResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SoundChangeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
