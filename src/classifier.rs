//! Rule text classification.
//!
//! Turns a rule's name and description into a [`RuleEffectiveness`]: a
//! categorical power level, a usage frequency and a multiplier. Matching is
//! plain case-insensitive substring containment with no word boundaries, so
//! "toughened" matches the keyword "tough".

use crate::config::ClassifierConfig;
use crate::error::CostError;
use serde::{Deserialize, Serialize};

/// How powerful a rule's text implies it is.
///
/// Variants are ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BaseEffectiveness {
    Minimal,
    Moderate,
    Strong,
    Overpowered,
}

impl BaseEffectiveness {
    /// Every level, weakest first.
    pub const ALL: [BaseEffectiveness; 4] = [
        BaseEffectiveness::Minimal,
        BaseEffectiveness::Moderate,
        BaseEffectiveness::Strong,
        BaseEffectiveness::Overpowered,
    ];

    /// Lower-case wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            BaseEffectiveness::Minimal => "minimal",
            BaseEffectiveness::Moderate => "moderate",
            BaseEffectiveness::Strong => "strong",
            BaseEffectiveness::Overpowered => "overpowered",
        }
    }
}

/// Unknown labels read as `moderate`, the formula's neutral weight.
impl From<&str> for BaseEffectiveness {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "minimal" => BaseEffectiveness::Minimal,
            "strong" => BaseEffectiveness::Strong,
            "overpowered" => BaseEffectiveness::Overpowered,
            _ => BaseEffectiveness::Moderate,
        }
    }
}

impl From<String> for BaseEffectiveness {
    fn from(s: String) -> Self {
        BaseEffectiveness::from(s.as_str())
    }
}

impl From<BaseEffectiveness> for String {
    fn from(value: BaseEffectiveness) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for BaseEffectiveness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a rule can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    /// Always active.
    Passive,
    /// Triggered by circumstances. Also the fallback for unknown labels.
    Conditional,
    /// Restricted number of uses.
    Limited,
    /// Usable every turn.
    Frequent,
}

impl Frequency {
    /// Lower-case wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Passive => "passive",
            Frequency::Conditional => "conditional",
            Frequency::Limited => "limited",
            Frequency::Frequent => "frequent",
        }
    }
}

impl From<&str> for Frequency {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "passive" => Frequency::Passive,
            "limited" => Frequency::Limited,
            "frequent" => Frequency::Frequent,
            _ => Frequency::Conditional,
        }
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        Frequency::from(s.as_str())
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical assessment of a rule, input to the tiered point formula.
///
/// # Examples
///
/// ```rust
/// use rostercost::{BaseEffectiveness, Frequency, RuleEffectiveness};
///
/// let json = r#"{"baseValue": "strong", "multiplier": 1.2, "frequency": "limited"}"#;
/// let eff: RuleEffectiveness = serde_json::from_str(json).unwrap();
/// assert_eq!(eff.base_value, BaseEffectiveness::Strong);
/// assert_eq!(eff.frequency, Frequency::Limited);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEffectiveness {
    pub base_value: BaseEffectiveness,
    /// Expected within `[0.1, 2.0]`.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_frequency() -> Frequency {
    Frequency::Conditional
}

impl RuleEffectiveness {
    /// Effectiveness from its parts. `multiplier` is not checked against `frequency`.
    pub fn new(base_value: BaseEffectiveness, multiplier: f64, frequency: Frequency) -> Self {
        Self {
            base_value,
            multiplier,
            frequency,
        }
    }
}

impl Default for RuleEffectiveness {
    fn default() -> Self {
        Self::new(BaseEffectiveness::Moderate, 1.0, Frequency::Conditional)
    }
}

/// Keyword and number heuristics over rule text.
#[derive(Debug, Clone, Default)]
pub struct TextClassifier {
    config: ClassifierConfig,
}

impl TextClassifier {
    /// Classifier using the default keyword tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier using custom tables.
    ///
    /// Rejects inverted or non-finite multiplier bounds. Keywords are
    /// lower-cased, so tables may be written in any case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rostercost::{ClassifierConfig, Frequency, TextClassifier};
    ///
    /// let config = ClassifierConfig {
    ///     frequent_keywords: vec!["Every Phase".into()],
    ///     ..ClassifierConfig::default()
    /// };
    /// let classifier = TextClassifier::with_config(config).unwrap();
    /// let eff = classifier.classify("Drill", "every phase this unit may move", None);
    /// assert_eq!(eff.frequency, Frequency::Frequent);
    /// ```
    pub fn with_config(config: ClassifierConfig) -> Result<Self, CostError> {
        config.validate()?;
        Ok(Self {
            config: config.normalized(),
        })
    }

    /// The tables in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a rule from its name, description and optional type label.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rostercost::{BaseEffectiveness, Frequency, TextClassifier};
    ///
    /// let classifier = TextClassifier::new();
    /// let eff = classifier.classify("Toughened Hide", "", None);
    /// assert_eq!(eff.base_value, BaseEffectiveness::Strong);
    /// assert_eq!(eff.frequency, Frequency::Passive);
    /// assert_eq!(eff.multiplier, 1.0);
    /// ```
    pub fn classify(
        &self,
        name: &str,
        description: &str,
        rule_type: Option<&str>,
    ) -> RuleEffectiveness {
        let mut text = format!("{} {}", name, description);
        if let Some(t) = rule_type.filter(|t| !t.is_empty()) {
            text.push(' ');
            text.push_str(t);
        }
        self.classify_text(&text)
    }

    /// Classify an already-assembled piece of text.
    ///
    /// A number in the text at or above the configured thresholds replaces
    /// whatever level the keywords produced.
    pub fn classify_text(&self, text: &str) -> RuleEffectiveness {
        let text = text.to_lowercase();

        let frequency = self.frequency(&text);
        let mut base_value = self.base_effectiveness(&text);

        let numbers = extract_numbers(&text);
        if !numbers.is_empty() {
            let max_number = numbers.iter().copied().fold(0, i64::max);
            if max_number >= self.config.overpowered_number {
                base_value = BaseEffectiveness::Overpowered;
            } else if max_number >= self.config.strong_number {
                base_value = BaseEffectiveness::Strong;
            } else if max_number >= self.config.moderate_number {
                base_value = BaseEffectiveness::Moderate;
            }
        }

        let multiplier = 1.0_f64
            .max(self.config.min_multiplier)
            .min(self.config.max_multiplier);

        RuleEffectiveness {
            base_value,
            multiplier,
            frequency,
        }
    }

    /// Keyword-only power level. Expects lower-cased text.
    pub fn base_effectiveness(&self, text: &str) -> BaseEffectiveness {
        let overpowered = count_matches(text, &self.config.overpowered_keywords);
        let strong = count_matches(text, &self.config.strong_keywords);
        let moderate = count_matches(text, &self.config.moderate_keywords);
        let minimal = count_matches(text, &self.config.minimal_keywords);

        if dominates(overpowered, strong) {
            BaseEffectiveness::Overpowered
        } else if dominates(strong, moderate) {
            BaseEffectiveness::Strong
        } else if dominates(moderate, minimal) {
            BaseEffectiveness::Moderate
        } else {
            BaseEffectiveness::Minimal
        }
    }

    /// Keyword-only usage frequency. Expects lower-cased text.
    pub fn frequency(&self, text: &str) -> Frequency {
        let passive = count_matches(text, &self.config.passive_keywords);
        let limited = count_matches(text, &self.config.limited_keywords);
        let frequent = count_matches(text, &self.config.frequent_keywords);

        if dominates(limited, frequent) {
            Frequency::Limited
        } else if dominates(passive, frequent) {
            Frequency::Passive
        } else if frequent >= 1 {
            Frequency::Frequent
        } else {
            Frequency::Conditional
        }
    }
}

/// A category wins with two hits, or with one hit when the next one down has none.
fn dominates(count: usize, next: usize) -> bool {
    count >= 2 || (count >= 1 && next == 0)
}

fn count_matches(text: &str, keywords: &[String]) -> usize {
    keywords.iter().filter(|k| text.contains(k.as_str())).count()
}

/// Integer tokens in whitespace-separated text.
///
/// Each token loses one trailing `s`, `th`, `st`, `nd` and `rd` (in that
/// order) before parsing, so ordinals like `3rd` and plurals like `10s`
/// count.
///
/// # Examples
///
/// ```rust
/// use rostercost::classifier::extract_numbers;
///
/// assert_eq!(extract_numbers("roll 2 dice on the 3rd turn"), vec![2, 3]);
/// assert_eq!(extract_numbers("6+ save"), Vec::<i64>::new());
/// ```
pub fn extract_numbers(text: &str) -> Vec<i64> {
    text.split_whitespace()
        .filter_map(|word| {
            let mut clean = word;
            for suffix in ["s", "th", "st", "nd", "rd"] {
                clean = clean.strip_suffix(suffix).unwrap_or(clean);
            }
            clean.parse::<i64>().ok()
        })
        .collect()
}
