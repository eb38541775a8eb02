use serde::{Deserialize, Serialize};

/// Keyword that stands for verbs without an action meaning of their own.
pub const DELEXICAL: &str = "delexical";

/// Surface forms recognised as delexical verbs.
pub const DELEXICAL_VERBS: [&str; 6] = ["do", "go", "make", "perform", "take", "turn"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl KeywordEntry {
    pub fn new(keyword: &str, synonyms: &[&str]) -> Self {
        Self {
            keyword: keyword.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn matches(&self, candidate: &str) -> bool {
        self.keyword.eq_ignore_ascii_case(candidate)
            || self.synonyms.iter().any(|s| s.eq_ignore_ascii_case(candidate))
    }
}

/// Keyword/synonym table in knowledge-base load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl KeywordTable {
    pub fn new(entries: Vec<KeywordEntry>) -> Self {
        Self { entries }
    }

    /// Verb table: the knowledge-base entries followed by the delexical entry.
    pub fn with_delexical(mut self) -> Self {
        self.entries.push(KeywordEntry::new(DELEXICAL, &DELEXICAL_VERBS));
        self
    }

    /// First keyword (in table order) whose name or synonyms equal the candidate,
    /// ignoring case.
    pub fn resolve(&self, candidate: &str) -> Option<&str> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.matches(candidate))
            .map(|entry| entry.keyword.as_str())
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
