//! Node clusters of generalized TSP instances (`GTSP_SET_SECTION`).

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::reader::{LineReader, SECTION_END};

/// Partition of the nodes into numbered clusters.
///
/// Node indices are kept exactly as written in the file (1-based).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clusters {
    sets: Vec<Vec<usize>>,
}

impl Clusters {
    pub fn new(sets: Vec<Vec<usize>>) -> Self {
        Clusters { sets }
    }

    /// Reads `count` lines of `id node... -1`.
    ///
    /// The leading id and the trailing sentinel are dropped; a line without the
    /// sentinel is malformed. With a known `dimension` every node must lie in
    /// `[1, dimension]`.
    pub(crate) fn load<R: BufRead>(
        reader: &mut LineReader<R>,
        count: usize,
        dimension: Option<usize>,
    ) -> Result<Self> {
        let section = "GTSP_SET_SECTION";
        let mut sets = Vec::new();

        for _ in 0..count {
            let line = reader.next_data_line(section)?;
            let mut parts: Vec<&str> = line.split_whitespace().collect();

            if parts.len() < 2 || parts.pop() != Some(SECTION_END) {
                return Err(reader.malformed(&line));
            }

            let nodes = parts[1..]
                .iter()
                .map(|token| {
                    let node: usize = reader.parse_token(token)?;
                    match dimension {
                        Some(dimension) if node == 0 || node > dimension => {
                            Err(ParseError::IndexOutOfBounds { index: node, dimension })
                        }
                        _ => Ok(node),
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            sets.push(nodes);
        }

        log::debug!("{}: read {} clusters", section, sets.len());

        Ok(Clusters { sets })
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Nodes of the zero-based cluster `k`
    pub fn get(&self, k: usize) -> Result<&[usize]> {
        self.sets
            .get(k)
            .map(Vec::as_slice)
            .ok_or(ParseError::IndexOutOfBounds { index: k, dimension: self.sets.len() })
    }

    pub fn sets(&self) -> &[Vec<usize>] {
        &self.sets
    }

    /// Zero-based index of the first cluster containing the 1-based `node`
    pub fn cluster_of(&self, node: usize) -> Option<usize> {
        self.sets.iter().position(|set| set.contains(&node))
    }
}
