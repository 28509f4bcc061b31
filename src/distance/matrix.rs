//! Explicit weight matrices from `EDGE_WEIGHT_SECTION`.

use std::io::BufRead;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::reader::LineReader;
use crate::types::EdgeWeightFormat;

/// Precomputed weights, expanded into a dense row-major `dimension x dimension` matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeWeightMatrix {
    format: EdgeWeightFormat,
    dimension: usize,
    weights: Vec<f64>,
}

/// Order in which a format lists the matrix cells, as `(row, column)` pairs
fn cells(format: EdgeWeightFormat, n: usize) -> Result<impl Iterator<Item = (usize, usize)>> {
    // Column-wise upper triangles read like row-wise lower triangles and vice versa;
    // triangular formats are symmetric, so the transposition does not matter.
    let row: fn(usize, usize) -> Range<usize> = match format {
        EdgeWeightFormat::FullMatrix => |_, n| 0..n,
        EdgeWeightFormat::UpperRow | EdgeWeightFormat::LowerCol => |i, n| i + 1..n,
        EdgeWeightFormat::LowerRow | EdgeWeightFormat::UpperCol => |i, _| 0..i,
        EdgeWeightFormat::UpperDiagRow | EdgeWeightFormat::LowerDiagCol => |i, n| i..n,
        EdgeWeightFormat::LowerDiagRow | EdgeWeightFormat::UpperDiagCol => |i, _| 0..i + 1,
        EdgeWeightFormat::Function => return Err(ParseError::UnsupportedEdgeWeightFormat(format)),
    };
    Ok((0..n).flat_map(move |i| row(i, n).map(move |j| (i, j))))
}

/// Number of values a format lists for `n` nodes
fn cell_count(format: EdgeWeightFormat, n: usize) -> Result<usize> {
    let too_large = ParseError::TooLarge { field: "DIMENSION", value: n };
    let count = match format {
        EdgeWeightFormat::FullMatrix => n.checked_mul(n),
        EdgeWeightFormat::UpperRow
        | EdgeWeightFormat::LowerCol
        | EdgeWeightFormat::LowerRow
        | EdgeWeightFormat::UpperCol => n.checked_mul(n.saturating_sub(1)).map(|c| c / 2),
        EdgeWeightFormat::UpperDiagRow
        | EdgeWeightFormat::LowerDiagCol
        | EdgeWeightFormat::LowerDiagRow
        | EdgeWeightFormat::UpperDiagCol => n.checked_add(1).and_then(|m| m.checked_mul(n)).map(|c| c / 2),
        EdgeWeightFormat::Function => return Err(ParseError::UnsupportedEdgeWeightFormat(format)),
    };
    count.ok_or(too_large)
}

impl EdgeWeightMatrix {
    /// Builds a matrix from values listed in `format` order
    pub fn from_values(format: EdgeWeightFormat, dimension: usize, values: &[f64]) -> Result<Self> {
        if values.len() != cell_count(format, dimension)? {
            return Err(ParseError::UnexpectedEndOfInput { section: "EDGE_WEIGHT_SECTION" });
        }

        // every value is present here, so the dense size is bounded by the input
        let size = dimension
            .checked_mul(dimension)
            .ok_or(ParseError::TooLarge { field: "DIMENSION", value: dimension })?;
        let mut matrix = EdgeWeightMatrix { format, dimension, weights: vec![0.0; size] };
        for ((i, j), &w) in cells(format, dimension)?.zip(values) {
            matrix.set(i, j, w);
        }
        Ok(matrix)
    }

    /// Reads as many values as `format` requires; values may wrap freely over lines
    pub(crate) fn load<R: BufRead>(
        reader: &mut LineReader<R>,
        dimension: usize,
        format: EdgeWeightFormat,
    ) -> Result<Self> {
        let section = "EDGE_WEIGHT_SECTION";

        let mut values = Vec::new();
        let mut tokens = reader.tokens(section);
        for _ in cells(format, dimension)? {
            values.push(tokens.expect::<f64>()?);
        }

        log::debug!("{}: read {} weights ({}, dimension {})", section, values.len(), format, dimension);

        Self::from_values(format, dimension, &values)
    }

    fn set(&mut self, i: usize, j: usize, w: f64) {
        let n = self.dimension;
        self.weights[i * n + j] = w;
        if self.is_symmetric() {
            self.weights[j * n + i] = w;
        }
    }

    /// Triangular layouts describe symmetric weights
    pub fn is_symmetric(&self) -> bool {
        self.format != EdgeWeightFormat::FullMatrix
    }

    pub fn format(&self) -> EdgeWeightFormat {
        self.format
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Weight of the edge from zero-based `i` to zero-based `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        let n = self.dimension;
        if i >= n {
            return Err(ParseError::IndexOutOfBounds { index: i, dimension: n });
        }
        if j >= n {
            return Err(ParseError::IndexOutOfBounds { index: j, dimension: n });
        }
        Ok(self.weights[i * n + j])
    }

    /// Zero-based row `i`
    pub fn row(&self, i: usize) -> Result<&[f64]> {
        let n = self.dimension;
        if i >= n {
            return Err(ParseError::IndexOutOfBounds { index: i, dimension: n });
        }
        Ok(&self.weights[i * n..(i + 1) * n])
    }
}
