//! Keyword classifier that picks a representative emoji for a prompt
//!
//! A [`Classifier`] scans an ordered [`RuleSet`] and returns the symbol of the
//! first rule whose pattern occurs in the search text. Rule order encodes
//! priority, so rule sets are plain ordered lists and never maps.
//!
//! Three built-in rule sets exist because they are used at different stages:
//!
//! - [`RuleSet::compile`]: regular expressions, used when compiling documents
//! - [`RuleSet::repair`]: substrings, used when regenerating invalid symbols
//! - [`RuleSet::suggestion`]: substrings, used for verbose validator advice
//!
//! Rule sets are data injected at construction, so tests and configuration can
//! substitute their own.

use crate::error::{CatalogError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Symbol returned when no rule matches
pub const DEFAULT_SYMBOL: &str = "🔧";

/// How rule patterns are tested against the search text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Unanchored regular expression search
    Regex,
    /// Plain substring containment
    Substring,
}

/// A single `(pattern, symbol)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Pattern tested against the lowercased search text
    pub pattern: String,
    /// Symbol returned when the pattern matches
    pub symbol: String,
}

impl Rule {
    /// Create a rule
    pub fn new(pattern: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            symbol: symbol.into(),
        }
    }
}

/// An ordered, immutable list of rules with a match mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    mode: MatchMode,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set from rules in priority order
    pub fn new(mode: MatchMode, rules: Vec<Rule>) -> Self {
        Self { mode, rules }
    }

    /// Match mode of this set
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Regex rules applied when a document is compiled
    pub fn compile() -> Self {
        Self::from_pairs(MatchMode::Regex, COMPILE_RULES)
    }

    /// Substring rules applied when repair regenerates a symbol
    pub fn repair() -> Self {
        Self::from_pairs(MatchMode::Substring, REPAIR_RULES)
    }

    /// Substring rules behind the validator's "consider" hints
    pub fn suggestion() -> Self {
        let rules = SUGGESTION_RULES
            .iter()
            .flat_map(|(symbol, keywords)| keywords.iter().map(|kw| Rule::new(*kw, *symbol)))
            .collect();
        Self::new(MatchMode::Substring, rules)
    }

    fn from_pairs(mode: MatchMode, pairs: &[(&str, &str)]) -> Self {
        let rules = pairs
            .iter()
            .map(|(pattern, symbol)| Rule::new(*pattern, *symbol))
            .collect();
        Self::new(mode, rules)
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Substring(String),
}

impl Matcher {
    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Regex(re) => re.is_match(text),
            Matcher::Substring(needle) => text.contains(needle.as_str()),
        }
    }
}

/// First-match-wins classifier over a [`RuleSet`]
#[derive(Debug, Clone)]
pub struct Classifier {
    matchers: Vec<(Matcher, String)>,
    fallback: String,
}

impl Classifier {
    /// Build a classifier, compiling regex patterns up front
    pub fn new(rules: &RuleSet, fallback: impl Into<String>) -> Result<Self> {
        let mut matchers = Vec::with_capacity(rules.rules().len());
        for rule in rules.rules() {
            let matcher = match rules.mode() {
                MatchMode::Regex => {
                    Matcher::Regex(Regex::new(&rule.pattern).map_err(|e| {
                        CatalogError::InvalidRule {
                            pattern: rule.pattern.clone(),
                            source: Box::new(e),
                        }
                    })?)
                }
                MatchMode::Substring => Matcher::Substring(rule.pattern.to_lowercase()),
            };
            matchers.push((matcher, rule.symbol.clone()));
        }
        Ok(Self {
            matchers,
            fallback: fallback.into(),
        })
    }

    /// Classifier over [`RuleSet::compile`] with [`DEFAULT_SYMBOL`]
    pub fn for_compile() -> Self {
        Self::new(&RuleSet::compile(), DEFAULT_SYMBOL).expect("Failed to compile built-in rules")
    }

    /// Classifier over [`RuleSet::repair`] with [`DEFAULT_SYMBOL`]
    pub fn for_repair() -> Self {
        Self::new(&RuleSet::repair(), DEFAULT_SYMBOL).expect("Failed to compile built-in rules")
    }

    /// Classifier over [`RuleSet::suggestion`] with [`DEFAULT_SYMBOL`]
    pub fn for_suggestion() -> Self {
        Self::new(&RuleSet::suggestion(), DEFAULT_SYMBOL)
            .expect("Failed to compile built-in rules")
    }

    /// Symbol returned when nothing matches
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Pick a symbol for a prompt from its description and name
    ///
    /// Both are joined with a space and lowercased before matching.
    pub fn classify(&self, description: &str, name: &str) -> &str {
        let text = format!("{description} {name}").to_lowercase();
        self.first_match(&text).unwrap_or(&self.fallback)
    }

    /// Symbol of the first rule matching `text`, which is used as-is
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.matchers
            .iter()
            .find(|(matcher, _)| matcher.is_match(text))
            .map(|(_, symbol)| symbol.as_str())
    }

    /// Suggest a symbol other than `current` for a description
    ///
    /// Rules whose symbol equals `current` are skipped, so the answer is always
    /// an alternative. Returns `None` when no other rule matches.
    pub fn suggest(&self, description: &str, current: &str) -> Option<&str> {
        let text = description.to_lowercase();
        self.matchers
            .iter()
            .filter(|(_, symbol)| symbol != current)
            .find(|(matcher, _)| matcher.is_match(&text))
            .map(|(_, symbol)| symbol.as_str())
    }

    /// Every symbol this classifier can return, fallback last
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.matchers
            .iter()
            .map(|(_, symbol)| symbol.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
    }
}

const COMPILE_RULES: &[(&str, &str)] = &[
    // Business & Product
    (
        r"(product\s*manager|pm|business|strategy|roadmap|pric(?:ing|e)|market(?:ing)?)",
        "👨‍💼",
    ),
    (r"(startup|founder|entrepreneur|ceo|cto|leadership)", "🚀"),
    // Development
    (
        r"(developer|engineer|coding|programming|software|debug(?:ging)?|code)",
        "👨‍💻",
    ),
    (r"(frontend|backend|full[-\s]?stack|devops|api|rest|graphql)", "💻"),
    (r"(python|javascript|typescript|java|golang|rust|cpp|c\+\+)", "🐍"),
    // Design & Creative
    (r"(design(?:er)?|creative|art|ui|ux|figma|sketch|visual)", "🎨"),
    (r"(writer|writing|copy(?:writing)?|content|blog|article)", "✍️"),
    (r"(video|photo|image|media|editing|film)", "🎬"),
    // Analytics & Data
    (r"(analytic|data|metric|statistics|insight|report|dashboard)", "📊"),
    (r"(sql|database|query|etl|pipeline|warehouse)", "🗄️"),
    (
        r"(machine\s*learning|ml|ai|artificial\s*intelligence|model|training)",
        "🤖",
    ),
    // Communication
    (r"(chat|support|communication|customer|service|help)", "💬"),
    (r"(email|newsletter|marketing|outreach|campaign)", "📧"),
    // Education
    (r"(teacher|education|learning|tutorial|course|mentor|coach)", "📚"),
    (r"(student|academic|research|paper|thesis|study)", "🎓"),
    // Finance
    (r"(finance|money|trading|investment|crypto|bitcoin|stock)", "💰"),
    (r"(accounting|budget|invoice|payment)", "💵"),
    // Science & Research
    (
        r"(science|research|lab|experiment|discovery|biology|chemistry)",
        "🔬",
    ),
    (r"(math|physics|calculation|formula|equation)", "🧮"),
    // Tools & Utilities
    (r"(assistant|helper|copilot|aid|tool|utility)", "🤖"),
    (r"(automation|workflow|script|batch|process)", "⚙️"),
    (r"(security|privacy|encrypt|protect|auth)", "🔒"),
    // Documents & Files
    (r"(document|pdf|word|excel|spreadsheet|presentation)", "📄"),
    (r"(file|folder|directory|storage|backup|sync)", "📁"),
    // Web & Internet
    (r"(web|website|html|css|browser|internet|url|link)", "🌐"),
    (r"(seo|search|google|index|ranking)", "🔍"),
    // General
    (r"(general|default|universal|common)", "🔧"),
];

const REPAIR_RULES: &[(&str, &str)] = &[
    ("product manager", "👨‍💼"),
    ("pm", "👨‍💼"),
    ("business", "👨‍💼"),
    ("strategy", "👨‍💼"),
    ("marketing", "👨‍💼"),
    ("startup", "🚀"),
    ("founder", "🚀"),
    ("developer", "👨‍💻"),
    ("engineer", "👨‍💻"),
    ("coding", "👨‍💻"),
    ("programming", "👨‍💻"),
    ("software", "👨‍💻"),
    ("debug", "👨‍💻"),
    ("frontend", "💻"),
    ("backend", "💻"),
    ("devops", "💻"),
    ("design", "🎨"),
    ("creative", "🎨"),
    ("ui", "🎨"),
    ("ux", "🎨"),
    ("writer", "✍️"),
    ("writing", "✍️"),
    ("content", "✍️"),
    ("analytic", "📊"),
    ("data", "📊"),
    ("metric", "📊"),
    ("statistics", "📊"),
    ("chat", "💬"),
    ("support", "💬"),
    ("communication", "💬"),
    ("customer", "💬"),
    ("teacher", "📚"),
    ("education", "📚"),
    ("learning", "📚"),
    ("tutorial", "📚"),
    ("finance", "💰"),
    ("money", "💰"),
    ("trading", "💰"),
    ("science", "🔬"),
    ("research", "🔬"),
    ("assistant", "🤖"),
    ("helper", "🤖"),
    ("copilot", "🤖"),
    ("automation", "⚙️"),
];

const SUGGESTION_RULES: &[(&str, &[&str])] = &[
    ("👨‍💼", &["pm", "product manager", "business", "strategy"]),
    (
        "👨‍💻",
        &["developer", "engineer", "coding", "programming", "software"],
    ),
    ("✍️", &["writer", "writing", "copy", "content"]),
    ("🎨", &["design", "creative", "art", "ui", "ux"]),
    ("📊", &["analytic", "data", "metric", "analysis"]),
    ("🤖", &["assistant", "helper", "copilot", "ai"]),
    ("💬", &["chat", "support", "communication"]),
    ("📚", &["teacher", "education", "learning"]),
    ("💰", &["finance", "money", "trading"]),
    ("🔬", &["science", "research", "lab"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::is_valid_emoji;

    #[test]
    fn test_first_match_wins() {
        let classifier = Classifier::for_compile();
        // "developer" rule sits above the "design" rule
        assert_eq!(classifier.classify("developer who designs", ""), "👨‍💻");
    }

    #[test]
    fn test_debug_frontend_resolves_to_developer_rule() {
        let classifier = Classifier::for_compile();
        assert_eq!(
            classifier.classify("Helps debug frontend code", "frontend-helper"),
            "👨‍💻"
        );
    }

    #[test]
    fn test_filename_participates() {
        let classifier = Classifier::for_compile();
        assert_eq!(classifier.classify("", "kubernetes-devops"), "💻");
    }

    #[test]
    fn test_case_folded() {
        let classifier = Classifier::for_compile();
        assert_eq!(classifier.classify("FINANCE tips", ""), "💰");
    }

    #[test]
    fn test_fallback() {
        let classifier = Classifier::for_compile();
        assert_eq!(classifier.classify("", "zzz"), DEFAULT_SYMBOL);
    }

    #[test]
    fn test_regex_is_unanchored() {
        let classifier = Classifier::for_compile();
        // "ai" inside "maintain" hits the machine-learning rule
        assert_eq!(classifier.classify("maintain", ""), "🤖");
    }

    #[test]
    fn test_repair_table_substrings() {
        let classifier = Classifier::for_repair();
        assert_eq!(classifier.classify("Budget finance helper", ""), "💰");
        assert_eq!(classifier.classify("", "Financial"), DEFAULT_SYMBOL);
        assert_eq!(classifier.classify("", "ux-review"), "🎨");
    }

    #[test]
    fn test_tables_differ() {
        let compile = Classifier::for_compile();
        let repair = Classifier::for_repair();
        assert_eq!(compile.classify("python scripts", ""), "🐍");
        assert_eq!(repair.classify("python scripts", ""), DEFAULT_SYMBOL);
    }

    #[test]
    fn test_suggest_skips_current() {
        let classifier = Classifier::for_suggestion();
        assert_eq!(classifier.suggest("A data helper", "📊"), Some("🤖"));
        assert_eq!(classifier.suggest("A data helper", "🔧"), Some("📊"));
        assert_eq!(classifier.suggest("nothing relevant", "🔧"), None);
    }

    #[test]
    fn test_custom_rules_injected() {
        let rules = RuleSet::new(MatchMode::Substring, vec![Rule::new("Tea", "🍵")]);
        let classifier = Classifier::new(&rules, "❓").unwrap();
        assert_eq!(classifier.classify("green tea", ""), "🍵");
        assert_eq!(classifier.classify("coffee", ""), "❓");
    }

    #[test]
    fn test_rule_order_changes_result() {
        let first = RuleSet::new(
            MatchMode::Substring,
            vec![Rule::new("a", "🅰️"), Rule::new("b", "🅱️")],
        );
        let second = RuleSet::new(
            MatchMode::Substring,
            vec![Rule::new("b", "🅱️"), Rule::new("a", "🅰️")],
        );
        let text = "ab";
        assert_eq!(
            Classifier::new(&first, "🔧").unwrap().classify(text, ""),
            "🅰️"
        );
        assert_eq!(
            Classifier::new(&second, "🔧").unwrap().classify(text, ""),
            "🅱️"
        );
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let rules = RuleSet::new(MatchMode::Regex, vec![Rule::new("(unclosed", "🔧")]);
        let err = Classifier::new(&rules, "🔧").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRule { .. }));
    }

    #[test]
    fn test_repair_symbols_are_valid() {
        for symbol in Classifier::for_repair().symbols() {
            assert!(is_valid_emoji(symbol), "{symbol} must survive repair");
        }
    }

    #[test]
    fn test_compile_symbols_are_valid() {
        for symbol in Classifier::for_compile().symbols() {
            assert!(is_valid_emoji(symbol), "{symbol} must be a valid emoji");
        }
    }
}
