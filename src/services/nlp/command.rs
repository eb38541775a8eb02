use std::process::Command;

use super::corenlp::parse_document;
use crate::annotation::{Annotator, SentenceAnnotations};
use crate::error::{PipelineError, PipelineResult};

/// Annotator that runs a local tool and reads CoreNLP JSON from its stdout.
/// The sentence is passed as the last argument.
#[derive(Debug, Clone)]
pub struct CommandAnnotator {
    program: String,
    args: Vec<String>,
}

impl CommandAnnotator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Annotator for CommandAnnotator {
    fn annotate(&self, sentence: &str) -> PipelineResult<SentenceAnnotations> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(sentence)
            .output()
            .map_err(|e| PipelineError::Annotator(format!("failed to run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Annotator(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| PipelineError::Malformed(format!("annotator output is not UTF-8: {}", e)))?;
        parse_document(&stdout)
    }
}
