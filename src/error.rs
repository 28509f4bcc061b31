//! Error type shared by every part of the reader.

use std::io;

use thiserror::Error;

use crate::types::{DataType, EdgeWeightFormat, EdgeWeightType};

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ParseError>;

/// Everything that can go wrong while loading or querying an instance.
///
/// A load aborts on the first error; no partially built instance is ever returned.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying stream could not be read
    #[error("read error: {0}")]
    Io(#[from] io::Error),
    /// A header line without a colon, with an empty value, or with an unparsable number
    #[error("malformed header at line {line}: '{content}'")]
    MalformedHeaderLine { line: usize, content: String },
    /// A data line inside a section that does not match the section's layout
    #[error("malformed data at line {line}: '{content}'")]
    MalformedDataLine { line: usize, content: String },
    /// A header value that is not part of the field's vocabulary
    #[error("unknown value '{value}' for {field}")]
    UnknownEnumValue { field: String, value: String },
    /// A section appeared before a header field it depends on
    #[error("{section} requires {field} to be declared first")]
    MissingPrerequisiteField { section: &'static str, field: &'static str },
    /// The stream ended in the middle of a section
    #[error("input ended inside {section}")]
    UnexpectedEndOfInput { section: &'static str },
    /// A node-indexed section finished without listing this node (1-based)
    #[error("{section} does not define node {node}")]
    MissingNode { section: &'static str, node: usize },
    /// A node index outside `[0, dimension)` (zero-based queries) or `[1, dimension]` (file data)
    #[error("node index {index} out of bounds for dimension {dimension}")]
    IndexOutOfBounds { index: usize, dimension: usize },
    /// A declared size the reader cannot hold in memory
    #[error("{field} of {value} is too large")]
    TooLarge { field: &'static str, value: usize },
    /// The edge data does not contain an edge between these zero-based nodes
    #[error("no edge between nodes {from} and {to}")]
    Unconnected { from: usize, to: usize },
    #[error("edge weight type {0} is not supported")]
    UnsupportedEdgeWeightType(EdgeWeightType),
    #[error("edge weight format {0} is not supported")]
    UnsupportedEdgeWeightFormat(EdgeWeightFormat),
    /// A distance was requested from an instance without any distance section
    #[error("instance has no distance table")]
    NoDistanceTable,
    /// A file spliced in as a tour source declared another data type
    #[error("not a tour file ({})", declared_type(.0))]
    NotATourFile(Option<DataType>),
}

fn declared_type(kind: &Option<DataType>) -> String {
    match kind {
        Some(kind) => format!("declared type {}", kind),
        None => "no type declared".to_string(),
    }
}
