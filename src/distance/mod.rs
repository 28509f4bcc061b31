//! Distance tables: the three ways a TSPLIB file can define edge weights.
//!
//! All queries take zero-based node indices.

pub mod coordinates;
pub mod edges;
pub mod matrix;
pub mod metric;

pub use coordinates::{Node, NodeCoordinates};
pub use edges::EdgeData;
pub use matrix::EdgeWeightMatrix;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::types::EdgeWeightType;

/// The table answering "what does it cost to go from node i to node j"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DistanceTable {
    /// Distances derived from coordinates with the declared metric
    NodeCoordinates { coordinates: NodeCoordinates, edge_weight_type: EdgeWeightType },
    EdgeWeightMatrix(EdgeWeightMatrix),
    EdgeData(EdgeData),
}

impl DistanceTable {
    /// Short name of the backing variant
    pub fn kind(&self) -> &'static str {
        match self {
            DistanceTable::NodeCoordinates { .. } => "node coordinates",
            DistanceTable::EdgeWeightMatrix(_) => "edge weight matrix",
            DistanceTable::EdgeData(_) => "edge data",
        }
    }

    /// Number of nodes the table covers
    pub fn size(&self) -> usize {
        match self {
            DistanceTable::NodeCoordinates { coordinates, .. } => coordinates.len(),
            DistanceTable::EdgeWeightMatrix(matrix) => matrix.dimension(),
            DistanceTable::EdgeData(data) => data.dimension(),
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        let dimension = self.size();
        if index >= dimension {
            return Err(ParseError::IndexOutOfBounds { index, dimension });
        }
        Ok(())
    }

    /// All zero-based node indices
    pub fn list_nodes(&self) -> Vec<usize> {
        (0..self.size()).collect()
    }

    /// Distance from zero-based `i` to zero-based `j`.
    ///
    /// Edge data reports a missing edge as [`ParseError::Unconnected`], never as a weight.
    pub fn distance_between(&self, i: usize, j: usize) -> Result<f64> {
        match self {
            DistanceTable::NodeCoordinates { coordinates, edge_weight_type } => {
                let (a, b) = (coordinates.get(i)?, coordinates.get(j)?);
                if i == j {
                    return Ok(0.0);
                }
                metric::distance(*edge_weight_type, a, b)
            }
            DistanceTable::EdgeWeightMatrix(matrix) => matrix.get(i, j),
            DistanceTable::EdgeData(data) => data.weight(i, j)?.ok_or(ParseError::Unconnected { from: i, to: j }),
        }
    }

    /// Whether `j` can be reached from `i` directly.
    ///
    /// Coordinates and matrices describe complete graphs; edge data only its listed edges.
    pub fn is_neighbor(&self, i: usize, j: usize) -> Result<bool> {
        match self {
            DistanceTable::EdgeData(data) => data.contains(i, j),
            _ => {
                self.check(i)?;
                self.check(j)?;
                Ok(i != j)
            }
        }
    }

    /// Zero-based neighbors of `i`, ascending
    pub fn neighbors_of(&self, i: usize) -> Result<Vec<usize>> {
        match self {
            DistanceTable::EdgeData(data) => data.neighbors_of(i),
            _ => {
                self.check(i)?;
                Ok((0..self.size()).filter(|&j| j != i).collect())
            }
        }
    }

    /// Coordinates backing the table, if any
    pub fn coordinates(&self) -> Option<&NodeCoordinates> {
        match self {
            DistanceTable::NodeCoordinates { coordinates, .. } => Some(coordinates),
            _ => None,
        }
    }
}
