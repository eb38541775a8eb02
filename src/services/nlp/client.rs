use reqwest::blocking::Client;
use std::time::Duration;

use super::corenlp::{parse_document, CORENLP_PROPERTIES};
use crate::annotation::{Annotator, SentenceAnnotations};
use crate::error::{PipelineError, PipelineResult};

/// Annotator backed by a CoreNLP-compatible HTTP server.
#[derive(Clone)]
pub struct HttpAnnotator {
    client: Client,
    base_url: String,
}

impl HttpAnnotator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PipelineResult<Self> {
        let client = Client::builder()
            .timeout(timeout) // Network-level deadline, the core itself never times out
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Annotator for HttpAnnotator {
    fn annotate(&self, sentence: &str) -> PipelineResult<SentenceAnnotations> {
        tracing::debug!("Annotating via {}", self.base_url);

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("properties", CORENLP_PROPERTIES)])
            .body(sentence.to_string())
            .send()?;

        if !response.status().is_success() {
            return Err(PipelineError::Annotator(format!(
                "CoreNLP server error: {}",
                response.status()
            )));
        }

        let body = response.text()?;
        parse_document(&body)
    }
}
