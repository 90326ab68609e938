//! Input parsing: delimited files into named-field records.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{Record, RecordTable, SourceMetadata};
