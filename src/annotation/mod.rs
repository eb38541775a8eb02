pub mod types;

pub use types::*;

use crate::error::PipelineResult;

/// The linguistic pipeline as seen by the core: text in, annotations out.
///
/// Implementations may shell out or talk to a server; callers cannot tell.
pub trait Annotator: Send + Sync {
    fn annotate(&self, sentence: &str) -> PipelineResult<SentenceAnnotations>;
}
