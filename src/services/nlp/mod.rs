pub mod client;
pub mod command;
pub mod corenlp;

pub use client::HttpAnnotator;
pub use command::CommandAnnotator;
pub use corenlp::parse_document;
