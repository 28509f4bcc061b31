//! Demands and depots of vehicle routing instances.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::reader::{to_zero_based, LineReader, SECTION_END};

/// Demand of every node plus the set of depots, all zero-based.
///
/// `DEMAND_SECTION` and `DEPOT_SECTION` fill the two halves independently and may
/// come in either order. Demands stay empty until a `DEMAND_SECTION` has been read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRoutingTable {
    dimension: usize,
    demands: Vec<u64>,
    depots: BTreeSet<usize>,
}

impl VehicleRoutingTable {
    /// An empty table for `dimension` nodes, every demand 0
    pub fn new(dimension: usize) -> Self {
        VehicleRoutingTable { dimension, demands: Vec::new(), depots: BTreeSet::new() }
    }

    /// Reads `dimension` lines of `node demand`
    pub(crate) fn load_demands<R: BufRead>(&mut self, reader: &mut LineReader<R>) -> Result<()> {
        let section = "DEMAND_SECTION";
        let dimension = self.dimension;

        let mut read = BTreeMap::new();
        for _ in 0..dimension {
            let line = reader.next_data_line(section)?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(reader.malformed(&line));
            }

            let node = to_zero_based(reader.parse_token(parts[0])?, dimension)?;
            read.insert(node, reader.parse_token::<u64>(parts[1])?);
        }
        self.demands = (0..dimension).map(|node| read.get(&node).copied().unwrap_or(0)).collect();

        log::debug!("{}: total demand {}", section, self.total_demand());
        Ok(())
    }

    /// Reads depot indices until `-1`
    pub(crate) fn load_depots<R: BufRead>(&mut self, reader: &mut LineReader<R>) -> Result<()> {
        let section = "DEPOT_SECTION";
        let (indices, terminated) = reader.tokens(section).indices_until_sentinel()?;
        if !terminated {
            log::warn!("{} not closed by {}", section, SECTION_END);
        }

        for index in indices {
            self.depots.insert(to_zero_based(index, self.dimension)?);
        }

        log::debug!("{}: {} depot(s)", section, self.depots.len());
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Demand of zero-based `node`
    pub fn demand(&self, node: usize) -> Result<u64> {
        if node >= self.dimension {
            return Err(ParseError::IndexOutOfBounds { index: node, dimension: self.dimension });
        }
        Ok(self.demands.get(node).copied().unwrap_or(0))
    }

    /// Demands by zero-based node, empty without a `DEMAND_SECTION`
    pub fn demands(&self) -> &[u64] {
        &self.demands
    }

    pub fn total_demand(&self) -> u64 {
        self.demands.iter().sum()
    }

    /// Zero-based depot nodes, ascending
    pub fn depots(&self) -> impl Iterator<Item = usize> + '_ {
        self.depots.iter().copied()
    }

    pub fn is_depot(&self, node: usize) -> bool {
        self.depots.contains(&node)
    }
}
