use serde::Deserialize;

use crate::annotation::{DependencyTag, SentenceAnnotations};
use crate::error::{PipelineError, PipelineResult};

/// Properties sent to a CoreNLP server.
pub const CORENLP_PROPERTIES: &str =
    r#"{"annotators":"tokenize,ssplit,pos,depparse","outputFormat":"json"}"#;

#[derive(Debug, Deserialize)]
struct CoreNlpDocument {
    #[serde(default)]
    sentences: Vec<CoreNlpSentence>,
}

#[derive(Debug, Deserialize)]
struct CoreNlpSentence {
    #[serde(default)]
    tokens: Vec<CoreNlpToken>,
    #[serde(rename = "basicDependencies", default)]
    basic_dependencies: Vec<CoreNlpDependency>,
}

#[derive(Debug, Deserialize)]
struct CoreNlpToken {
    word: String,
    pos: String,
}

#[derive(Debug, Deserialize)]
struct CoreNlpDependency {
    dep: String,
    #[serde(rename = "governorGloss")]
    governor_gloss: String,
    #[serde(rename = "dependentGloss")]
    dependent_gloss: String,
}

fn is_punctuation(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_punctuation())
}

/// Converts a CoreNLP JSON document into sentence annotations.
///
/// Punctuation is dropped, `ROOT` edges are ignored, and repeated words collapse
/// onto their first occurrence.
pub fn parse_document(json: &str) -> PipelineResult<SentenceAnnotations> {
    let document: CoreNlpDocument = serde_json::from_str(json)
        .map_err(|e| PipelineError::Malformed(format!("annotator output is not CoreNLP JSON: {}", e)))?;

    if document.sentences.is_empty() {
        return Err(PipelineError::Malformed("annotator returned no sentences".to_string()));
    }

    let mut annotations = SentenceAnnotations::new();

    for sentence in &document.sentences {
        for token in &sentence.tokens {
            if is_punctuation(&token.word) {
                continue;
            }
            annotations.add_token(&token.word, &token.pos);
        }

        for dependency in &sentence.basic_dependencies {
            if dependency.dep.eq_ignore_ascii_case("root") {
                continue;
            }
            if is_punctuation(&dependency.governor_gloss) || is_punctuation(&dependency.dependent_gloss) {
                continue;
            }
            if !annotations.contains(&dependency.governor_gloss) {
                tracing::debug!("Dependency governor '{}' missing from tokens", dependency.governor_gloss);
            }
            annotations.add_edge(
                &dependency.governor_gloss,
                DependencyTag::from_label(&dependency.dep),
                &dependency.dependent_gloss,
            );
        }
    }

    Ok(annotations)
}
