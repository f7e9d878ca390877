//! Content file parsing
//!
//! Every content file is plain text carrying an optional leading metadata block
//! and an optional bracket-tag markup body. Parsing never fails: lines that do
//! not fit the grammar produce no output.

pub mod markup;
pub mod metadata;

pub use markup::{has_custom_tags, parse_file_content, ContentElement, ElementBody, HeadingLevel, InlineSpan, ParsedContent};
pub use metadata::{parse_metadata_block, Metadata, MetadataValue};
