//! Explicit edges from `EDGE_DATA_SECTION` and `FIXED_EDGES_SECTION`.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::reader::{to_zero_based, LineReader, SECTION_END};
use crate::types::EdgeDataFormat;

/// Weight of an edge listed without an explicit weight
pub const UNWEIGHTED_EDGE: f64 = 1.0;

/// A sparse set of undirected edges between zero-based nodes.
///
/// Edges are stored with the smaller endpoint first; the weight is `None` for
/// edges given without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    format: EdgeDataFormat,
    dimension: usize,
    #[serde(with = "edge_list")]
    edges: BTreeMap<(usize, usize), Option<f64>>,
}

/// Edges serialize as a list of `(from, to, weight)` since JSON keys must be strings
mod edge_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    type Edges = BTreeMap<(usize, usize), Option<f64>>;

    pub(super) fn serialize<S: Serializer>(edges: &Edges, serializer: S) -> Result<S::Ok, S::Error> {
        let list: Vec<(usize, usize, Option<f64>)> = edges.iter().map(|(&(i, j), &w)| (i, j, w)).collect();
        list.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Edges, D::Error> {
        let list = Vec::<(usize, usize, Option<f64>)>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|(i, j, w)| ((i, j), w)).collect())
    }
}

#[inline]
fn key(i: usize, j: usize) -> (usize, usize) {
    if i <= j {
        (i, j)
    } else {
        (j, i)
    }
}

impl EdgeData {
    pub fn new(format: EdgeDataFormat, dimension: usize) -> Self {
        EdgeData { format, dimension, edges: BTreeMap::new() }
    }

    /// Adds an edge between zero-based nodes
    pub fn insert(&mut self, i: usize, j: usize, weight: Option<f64>) -> Result<()> {
        self.check(i)?;
        self.check(j)?;
        self.edges.insert(key(i, j), weight);
        Ok(())
    }

    pub(crate) fn load<R: BufRead>(
        reader: &mut LineReader<R>,
        section: &'static str,
        dimension: usize,
        format: EdgeDataFormat,
    ) -> Result<Self> {
        let mut data = EdgeData::new(format, dimension);
        match format {
            EdgeDataFormat::EdgeList => data.load_edge_list(reader, section)?,
            EdgeDataFormat::AdjList => data.load_adjacency_list(reader, section)?,
        }

        log::debug!("{}: read {} edges ({})", section, data.len(), format);

        Ok(data)
    }

    /// One `from to [weight]` line per edge, closed by a `-1` line
    fn load_edge_list<R: BufRead>(&mut self, reader: &mut LineReader<R>, section: &'static str) -> Result<()> {
        loop {
            let line = match reader.next_line()? {
                Some(line) if line.is_empty() => continue,
                Some(line) => line,
                None => {
                    log::warn!("{} not closed by {}", section, SECTION_END);
                    return Ok(());
                }
            };
            if line == SECTION_END {
                return Ok(());
            }
            if line == "EOF" {
                log::warn!("{} not closed by {}", section, SECTION_END);
                reader.push_back(line);
                return Ok(());
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 || parts.len() > 3 {
                return Err(reader.malformed(&line));
            }

            let from = to_zero_based(reader.parse_token(parts[0])?, self.dimension)?;
            let to = to_zero_based(reader.parse_token(parts[1])?, self.dimension)?;
            let weight = match parts.get(2) {
                Some(w) => Some(reader.parse_token::<f64>(w)?),
                None => None,
            };
            self.insert(from, to, weight)?;
        }
    }

    /// `node neighbor... -1` groups, the whole list closed by another `-1`
    fn load_adjacency_list<R: BufRead>(&mut self, reader: &mut LineReader<R>, section: &'static str) -> Result<()> {
        let dimension = self.dimension;
        let mut tokens = reader.tokens(section);
        let mut edges = Vec::new();

        while let Some(token) = tokens.next_token()? {
            if token == SECTION_END {
                break;
            }
            let node: usize = tokens.parse(&token)?;
            let (neighbors, terminated) = tokens.indices_until_sentinel()?;
            edges.extend(neighbors.into_iter().map(|neighbor| (node, neighbor)));
            if !terminated {
                break;
            }
        }

        for (node, neighbor) in edges {
            self.insert(to_zero_based(node, dimension)?, to_zero_based(neighbor, dimension)?, None)?;
        }
        Ok(())
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.dimension {
            return Err(ParseError::IndexOutOfBounds { index, dimension: self.dimension });
        }
        Ok(())
    }

    pub fn format(&self) -> EdgeDataFormat {
        self.format
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of distinct edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether zero-based `i` and `j` are joined by an edge
    pub fn contains(&self, i: usize, j: usize) -> Result<bool> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.edges.contains_key(&key(i, j)))
    }

    /// Weight of the edge between zero-based `i` and `j`, `None` when there is no such edge.
    ///
    /// Edges listed without a weight count as [`UNWEIGHTED_EDGE`].
    pub fn weight(&self, i: usize, j: usize) -> Result<Option<f64>> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.edges.get(&key(i, j)).map(|w| w.unwrap_or(UNWEIGHTED_EDGE)))
    }

    /// Zero-based neighbors of `i`, ascending
    pub fn neighbors_of(&self, i: usize) -> Result<Vec<usize>> {
        self.check(i)?;
        let neighbors: BTreeSet<usize> = self
            .edges
            .keys()
            .filter_map(|&(a, b)| {
                if a == i {
                    Some(b)
                } else if b == i {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        Ok(neighbors.into_iter().collect())
    }

    /// All edges as zero-based `(from, to)` pairs, smaller endpoint first
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.keys().copied()
    }
}
