use std::collections::HashMap;

/// Dependency labels the engine cares about. Anything else is `Unclassified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    Particle,
    AdverbialModifier,
    ClausalComplement,
    OpenClausalComplement,
    NounModifier,
    DirectObject,
    Dependent,
    Compound,
    AdjectivalModifier,
    Unclassified,
}

/// Edges that may complete a multi-word verb ("move" + "up").
pub const VERB_EXTENSION_TAGS: [DependencyTag; 5] = [
    DependencyTag::Particle,
    DependencyTag::AdverbialModifier,
    DependencyTag::ClausalComplement,
    DependencyTag::OpenClausalComplement,
    DependencyTag::NounModifier,
];

/// Object/complement edges.
pub const OBJECT_TAGS: [DependencyTag; 2] = [DependencyTag::DirectObject, DependencyTag::Dependent];

/// Modifier edges searched for a body side.
pub const MODIFIER_TAGS: [DependencyTag; 2] = [DependencyTag::Compound, DependencyTag::AdjectivalModifier];

impl DependencyTag {
    /// Maps a Stanford/UD label (`dobj`, `compound:prt`, `nmod:poss`, ...) onto a tag.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_ascii_lowercase();
        match label.as_str() {
            "prt" | "compound:prt" => DependencyTag::Particle,
            "advmod" => DependencyTag::AdverbialModifier,
            "ccomp" => DependencyTag::ClausalComplement,
            "xcomp" => DependencyTag::OpenClausalComplement,
            "nmod" | "obl" => DependencyTag::NounModifier,
            "dobj" | "obj" => DependencyTag::DirectObject,
            "dep" => DependencyTag::Dependent,
            "compound" => DependencyTag::Compound,
            "amod" => DependencyTag::AdjectivalModifier,
            l if l.starts_with("nmod:") || l.starts_with("obl:") => DependencyTag::NounModifier,
            _ => DependencyTag::Unclassified,
        }
    }
}

/// Penn Treebank part-of-speech tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosTag(String);

impl PosTag {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.0
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }

    pub fn is_verb(&self) -> bool {
        self.has_prefix("VB")
    }

    pub fn is_noun(&self) -> bool {
        self.has_prefix("NN")
    }

    pub fn is_comparative(&self) -> bool {
        self.has_prefix("JJR")
    }

    pub fn is_plural_noun(&self) -> bool {
        self.0.eq_ignore_ascii_case("NNS")
    }
}

/// One word of the sentence with its outgoing dependency edges.
///
/// Edges are grouped by tag once at build time; within a tag the order of
/// discovery is kept.
#[derive(Debug, Clone, Default)]
pub struct Token {
    text: String,
    pos: PosTag,
    edges: HashMap<DependencyTag, Vec<String>>,
}

impl Token {
    pub fn new(text: &str, pos: &str) -> Self {
        Self {
            text: text.to_string(),
            pos: PosTag::new(pos),
            edges: HashMap::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pos(&self) -> &PosTag {
        &self.pos
    }

    pub fn add_edge(&mut self, tag: DependencyTag, target: &str) {
        self.edges.entry(tag).or_default().push(target.to_string());
    }

    pub fn targets(&self, tag: DependencyTag) -> &[String] {
        self.edges.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Referenced tokens for a list of tags: tag order first, then edge order.
    pub fn targets_in(&self, tags: &[DependencyTag]) -> Vec<&str> {
        tags.iter()
            .flat_map(|tag| self.targets(*tag).iter().map(String::as_str))
            .collect()
    }
}

/// Per-sentence token map, iterated in discovery order.
#[derive(Debug, Clone, Default)]
pub struct SentenceAnnotations {
    tokens: Vec<Token>,
    index: HashMap<String, usize>,
}

impl SentenceAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token. A literal already present keeps its position and edges;
    /// only an empty POS tag gets filled in.
    pub fn add_token(&mut self, text: &str, pos: &str) -> &mut Token {
        let idx = match self.index.get(text) {
            Some(&idx) => {
                if self.tokens[idx].pos.as_str().is_empty() {
                    self.tokens[idx].pos = PosTag::new(pos);
                }
                idx
            }
            None => {
                self.tokens.push(Token::new(text, pos));
                self.index.insert(text.to_string(), self.tokens.len() - 1);
                self.tokens.len() - 1
            }
        };
        &mut self.tokens[idx]
    }

    /// Adds `governor --tag--> dependent`. An unknown governor is registered
    /// with an empty POS tag.
    pub fn add_edge(&mut self, governor: &str, tag: DependencyTag, dependent: &str) {
        self.add_token(governor, "").add_edge(tag, dependent);
    }

    pub fn get(&self, text: &str) -> Option<&Token> {
        self.index.get(text).map(|&idx| &self.tokens[idx])
    }

    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn literals(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
