//! Node coordinates from `NODE_COORD_SECTION` and `DISPLAY_DATA_SECTION`.

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::reader::{to_zero_based, LineReader};
use crate::types::NodeCoordType;

/// A node with its position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier (1-indexed, as in the file)
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Only present for 3D coordinates
    pub z: Option<f64>,
}

impl Node {
    pub fn new(id: usize, x: f64, y: f64, z: Option<f64>) -> Self {
        Node { id, x, y, z }
    }

    /// Coordinates as a slice-like vector, 2 or 3 values
    pub fn position(&self) -> Vec<f64> {
        match self.z {
            Some(z) => vec![self.x, self.y, z],
            None => vec![self.x, self.y],
        }
    }
}

/// Coordinates of every node, indexed by zero-based node index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCoordinates {
    coord_type: NodeCoordType,
    nodes: Vec<Node>,
}

impl NodeCoordinates {
    /// Builds the table from nodes already ordered by id
    pub fn new(coord_type: NodeCoordType, nodes: Vec<Node>) -> Self {
        NodeCoordinates { coord_type, nodes }
    }

    /// Reads `dimension` lines of `id x y [z]`.
    ///
    /// Nodes may be listed in any order, but every id in `1..=dimension` must appear.
    pub(crate) fn load<R: BufRead>(
        reader: &mut LineReader<R>,
        section: &'static str,
        dimension: usize,
        coord_type: NodeCoordType,
    ) -> Result<Self> {
        let arity = coord_type.arity();
        if arity == 0 {
            return Err(ParseError::MissingPrerequisiteField { section, field: "NODE_COORD_TYPE" });
        }

        let mut placed = BTreeMap::new();
        for _ in 0..dimension {
            let line = reader.next_data_line(section)?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < arity + 1 {
                return Err(reader.malformed(&line));
            }

            let id: usize = reader.parse_token(parts[0])?;
            let x: f64 = reader.parse_token(parts[1])?;
            let y: f64 = reader.parse_token(parts[2])?;
            let z = if arity == 3 { Some(reader.parse_token::<f64>(parts[3])?) } else { None };

            let index = to_zero_based(id, dimension)?;
            placed.insert(index, Node::new(id, x, y, z));
        }

        let nodes = (0..dimension)
            .map(|index| placed.remove(&index).ok_or(ParseError::MissingNode { section, node: index + 1 }))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("{}: read {} nodes ({})", section, nodes.len(), coord_type);

        Ok(NodeCoordinates { coord_type, nodes })
    }

    pub fn coord_type(&self) -> NodeCoordType {
        self.coord_type
    }

    /// Node at zero-based `index`
    pub fn get(&self, index: usize) -> Result<&Node> {
        self.nodes.get(index).ok_or(ParseError::IndexOutOfBounds { index, dimension: self.nodes.len() })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box as `(min_x, max_x, min_y, max_y)`, `None` without nodes
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.nodes.first()?;
        let init = (first.x, first.x, first.y, first.y);
        Some(self.nodes.iter().fold(init, |(min_x, max_x, min_y, max_y), n| {
            (min_x.min(n.x), max_x.max(n.x), min_y.min(n.y), max_y.max(n.y))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str, dimension: usize, coord_type: NodeCoordType) -> Result<NodeCoordinates> {
        let mut reader = LineReader::new(text.as_bytes());
        NodeCoordinates::load(&mut reader, "NODE_COORD_SECTION", dimension, coord_type)
    }

    #[test]
    fn test_reads_two_dimensional_nodes() {
        let coords = load("1 0 0\n2 3.5 0\n3 0 4e1\nEOF\n", 3, NodeCoordType::TwodCoords).unwrap();

        assert_eq!(coords.len(), 3);
        assert_eq!(coords.get(1).unwrap(), &Node::new(2, 3.5, 0.0, None));
        assert_eq!(coords.get(2).unwrap().y, 40.0);
        assert_eq!(coords.bounds(), Some((0.0, 3.5, 0.0, 40.0)));
    }

    #[test]
    fn test_reads_three_dimensional_nodes_out_of_order() {
        let coords = load("2 1 2 3\n\n1 4 5 6\n", 2, NodeCoordType::ThreedCoords).unwrap();

        assert_eq!(coords.get(0).unwrap().position(), vec![4.0, 5.0, 6.0]);
        assert_eq!(coords.get(1).unwrap().z, Some(3.0));
    }

    #[test]
    fn test_duplicate_id_leaves_a_hole() {
        let result = load("1 0 0\n1 1 1\n", 2, NodeCoordType::TwodCoords);
        assert!(matches!(result, Err(ParseError::MissingNode { node: 2, .. })));
    }

    #[test]
    fn test_rejects_short_and_out_of_range_lines() {
        assert!(matches!(
            load("1 0\n", 1, NodeCoordType::TwodCoords),
            Err(ParseError::MalformedDataLine { line: 1, .. })
        ));
        assert!(matches!(
            load("5 0 0\n", 1, NodeCoordType::TwodCoords),
            Err(ParseError::IndexOutOfBounds { index: 5, dimension: 1 })
        ));
        assert!(matches!(
            load("1 0 0\n", 2, NodeCoordType::TwodCoords),
            Err(ParseError::UnexpectedEndOfInput { section: "NODE_COORD_SECTION" })
        ));
    }

    #[test]
    fn test_huge_dimension_runs_out_of_lines() {
        assert!(matches!(
            load("1 0 0\n", usize::MAX, NodeCoordType::TwodCoords),
            Err(ParseError::UnexpectedEndOfInput { section: "NODE_COORD_SECTION" })
        ));
    }

    #[test]
    fn test_query_outside_table() {
        let coords = load("1 0 0\n", 1, NodeCoordType::TwodCoords).unwrap();
        assert!(matches!(coords.get(1), Err(ParseError::IndexOutOfBounds { index: 1, dimension: 1 })));
    }
}
