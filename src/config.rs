use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::annotation::Annotator;
use crate::error::PipelineError;
use crate::kernel::Session;
use crate::knowledge::{KnowledgeBase, OntologyStore};
use crate::services::nlp::{CommandAnnotator, HttpAnnotator};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pipeline setup failed: {0}")]
    Pipeline(#[from] PipelineError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where sentences get their POS tags and dependencies from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnnotatorConfig {
    /// CoreNLP-compatible HTTP server.
    Http {
        #[serde(default = "default_annotator_url")]
        url: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
    /// Local program printing CoreNLP JSON for the sentence passed as last argument.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        AnnotatorConfig::Http {
            url: default_annotator_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_ontology_path")]
    pub ontology_path: PathBuf,

    #[serde(default)]
    pub annotator: AnnotatorConfig,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_ontology_path() -> PathBuf {
    PathBuf::from("ontology/zora.json")
}

fn default_annotator_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_listen_addr() -> String {
    "127.0.0.1:5003".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ontology_path: default_ontology_path(),
            annotator: AnnotatorConfig::default(),
            listen_addr: default_listen_addr(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Reads a JSON config. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn build_annotator(&self) -> ConfigResult<Box<dyn Annotator>> {
        let annotator: Box<dyn Annotator> = match &self.annotator {
            AnnotatorConfig::Http { url, timeout_ms } => {
                Box::new(HttpAnnotator::new(url, Duration::from_millis(*timeout_ms))?)
            }
            AnnotatorConfig::Command { program, args } => Box::new(CommandAnnotator::new(program, args.clone())),
        };
        Ok(annotator)
    }

    pub fn load_knowledge_base(&self) -> ConfigResult<Arc<dyn KnowledgeBase>> {
        Ok(Arc::new(OntologyStore::load(&self.ontology_path)?))
    }

    /// Knowledge base, annotator and session wired together.
    pub fn open_session(&self) -> ConfigResult<Session> {
        let kb = self.load_knowledge_base()?;
        let annotator = self.build_annotator()?;
        Ok(Session::new(kb, annotator)?)
    }
}
