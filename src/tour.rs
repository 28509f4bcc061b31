//! Tours read from a `TOUR_SECTION`.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::reader::{LineReader, SECTION_END};

/// An ordered visiting sequence of zero-based node indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tour from zero-based node indices
    pub fn from_nodes(nodes: &[usize]) -> Self {
        Tour { nodes: nodes.to_vec() }
    }

    /// Reads 1-based indices until `-1`.
    ///
    /// An `EOF` line or the end of the stream also ends the tour; the `EOF` line
    /// is left for the instance parser.
    /// When `dimension` is known every index must lie in `[1, dimension]`.
    pub(crate) fn load<R: BufRead>(reader: &mut LineReader<R>, dimension: Option<usize>) -> Result<Self> {
        let (indices, terminated) = reader.tokens("TOUR_SECTION").indices_until_sentinel()?;
        if !terminated && !indices.is_empty() {
            log::warn!("tour ending at line {} not closed by {}", reader.line_number(), SECTION_END);
        }

        let nodes = indices
            .into_iter()
            .map(|index| match dimension {
                Some(dimension) if index == 0 || index > dimension => {
                    Err(ParseError::IndexOutOfBounds { index, dimension })
                }
                _ if index == 0 => Err(ParseError::IndexOutOfBounds { index, dimension: 0 }),
                _ => Ok(index - 1),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Tour { nodes })
    }

    /// Number of visits in the tour
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Zero-based node at `position`
    pub fn get(&self, position: usize) -> Result<usize> {
        self.nodes
            .get(position)
            .copied()
            .ok_or(ParseError::IndexOutOfBounds { index: position, dimension: self.nodes.len() })
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().copied()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }
}
