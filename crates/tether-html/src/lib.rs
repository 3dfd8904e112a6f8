//! tether HTML Parser
//!
//! HTML5 parsing built on html5ever, producing `tether_dom::Document`s
//! that controllers can be registered against.

mod parser;

pub use parser::HtmlParser;
pub use tether_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
