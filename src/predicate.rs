use std::fmt::{self, Display};

/// An inclusive range of Unicode code points identifying a writing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRange {
    /// Human readable block name, used in failure reports.
    pub name: &'static str,
    pub first: char,
    pub last: char,
}

/// The Tamil Unicode block.
///
/// Wider than the letters-only heuristic `[அ-ஹ]`: vowel signs and the
/// virama also count as evidence that transliteration happened.
pub const TAMIL: ScriptRange = ScriptRange {
    name: "Tamil",
    first: '\u{0B80}',
    last: '\u{0BFF}',
};

impl ScriptRange {
    pub fn contains_any(&self, text: &str) -> bool {
        text.chars().any(|c| self.first <= c && c <= self.last)
    }
}

/// Verdict on a single oracle output.
///
/// Predicates only ever see the one string the oracle produced for the
/// case's input; an absent output must be handed in as the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Passes iff the output contains the literal contiguous substring.
    ExactSubstring(String),
    /// Same as [Predicate::ExactSubstring], compared case-folded.
    CaseInsensitiveSubstring(String),
    /// Passes iff at least one code point of the block is present.
    ScriptPresence(ScriptRange),
    /// Passes iff no code point of the block is present.
    NegatedScriptPresence(ScriptRange),
    /// Passes iff the output has zero length.
    EmptyOutput,
    /// Disjunction, passes iff any inner predicate passes.
    AnyOf(Vec<Predicate>),
    /// Conjunction, passes iff every inner predicate passes.
    AllOf(Vec<Predicate>),
}

impl Predicate {
    pub fn exact_substring<T: Into<String>>(expected: T) -> Self {
        Self::ExactSubstring(expected.into())
    }

    pub fn case_insensitive_substring<T: Into<String>>(expected: T) -> Self {
        Self::CaseInsensitiveSubstring(expected.into())
    }

    /// The standard check for a negative case: the oracle either produced
    /// nothing, or nothing in the target script.
    pub fn rejected_by(script: ScriptRange) -> Self {
        Self::AnyOf(vec![
            Self::EmptyOutput,
            Self::NegatedScriptPresence(script),
        ])
    }

    pub fn evaluate(&self, output: &str) -> bool {
        match self {
            Self::ExactSubstring(expected) => output.contains(expected),
            Self::CaseInsensitiveSubstring(expected) => {
                output.to_lowercase().contains(&expected.to_lowercase())
            }
            Self::ScriptPresence(range) => range.contains_any(output),
            Self::NegatedScriptPresence(range) => !range.contains_any(output),
            Self::EmptyOutput => output.is_empty(),
            Self::AnyOf(inner) => inner.iter().any(|p| p.evaluate(output)),
            Self::AllOf(inner) => inner.iter().all(|p| p.evaluate(output)),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactSubstring(expected) => write!(f, "contains `{expected}`"),
            Self::CaseInsensitiveSubstring(expected) => {
                write!(f, "contains `{expected}` (case-insensitive)")
            }
            Self::ScriptPresence(range) => write!(f, "contains {} characters", range.name),
            Self::NegatedScriptPresence(range) => write!(f, "contains no {} character", range.name),
            Self::EmptyOutput => write!(f, "is empty"),
            Self::AnyOf(inner) => {
                let parts: Vec<String> = inner.iter().map(|p| p.to_string()).collect();
                write!(f, "({})", parts.join(" or "))
            }
            Self::AllOf(inner) => {
                let parts: Vec<String> = inner.iter().map(|p| p.to_string()).collect();
                write!(f, "({})", parts.join(" and "))
            }
        }
    }
}
