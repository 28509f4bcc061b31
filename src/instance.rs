//! Module for loading and representing TSPLIB/GTSPLIB problem instances.
//!
//! A [`ProblemInstance`] is produced by a single pass over a TSPLIB file. After
//! loading it is read-only, except that further tours can be appended.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cluster::Clusters;
use crate::distance::{DistanceTable, EdgeData, NodeCoordinates};
use crate::error::{ParseError, Result};
use crate::parser::InstanceBuilder;
use crate::reader::LineReader;
use crate::tour::Tour;
use crate::types::*;
use crate::vrp::VehicleRoutingTable;

/// Represents a complete TSPLIB problem instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemInstance {
    /// Name of the instance
    pub(crate) name: Option<String>,
    /// Kind of problem
    pub(crate) data_type: Option<DataType>,
    /// Comment lines, joined with newlines
    pub(crate) comment: Option<String>,
    /// Number of nodes
    pub(crate) dimension: usize,
    /// Number of clusters declared by `GTSP_SETS`
    pub(crate) cluster_count: usize,
    /// Vehicle capacity (CVRP only)
    pub(crate) capacity: Option<u64>,
    pub(crate) edge_weight_type: Option<EdgeWeightType>,
    pub(crate) edge_weight_format: Option<EdgeWeightFormat>,
    pub(crate) edge_data_format: Option<EdgeDataFormat>,
    pub(crate) node_coord_type: NodeCoordType,
    pub(crate) display_data_type: DisplayDataType,
    /// Nodes, edges and weights of the instance
    pub(crate) distance_table: Option<DistanceTable>,
    /// Explicit coordinates for drawing, never used for distances
    pub(crate) display_data: Option<NodeCoordinates>,
    /// Edges required in every solution
    pub(crate) fixed_edges: Option<EdgeData>,
    /// Known solutions
    pub(crate) tours: Vec<Tour>,
    /// Demands and depots (vehicle routing only)
    pub(crate) vehicle_routing_table: Option<VehicleRoutingTable>,
    /// Node sets of generalized TSP instances
    pub(crate) clusters: Option<Clusters>,
}

impl ProblemInstance {
    /// Parse an instance from a TSPLIB file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        log::info!("loading instance from {}", path.as_ref().display());
        Self::load(BufReader::new(file))
    }

    /// Parse an instance from any byte stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::load(BufReader::new(reader))
    }

    /// Parse an instance from a buffered stream; the stream is consumed and dropped
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = LineReader::new(reader);
        InstanceBuilder::new().read(&mut lines)
    }

    /// Adds a solution. The tour is not checked against the instance.
    pub fn add_tour(&mut self, tour: Tour) {
        self.tours.push(tour);
    }

    /// Adds every tour of a separate `TYPE : TOUR` file.
    ///
    /// Any other declared type fails with [`ParseError::NotATourFile`] and leaves
    /// the tours of this instance untouched.
    pub fn add_tours_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let source = Self::from_file(path)?;
        self.splice_tours(source)
    }

    /// Like [`ProblemInstance::add_tours_from_file`], reading from a stream
    pub fn add_tours_from_reader<R: Read>(&mut self, reader: R) -> Result<usize> {
        let source = Self::from_reader(reader)?;
        self.splice_tours(source)
    }

    fn splice_tours(&mut self, source: ProblemInstance) -> Result<usize> {
        if source.data_type != Some(DataType::Tour) {
            return Err(ParseError::NotATourFile(source.data_type));
        }

        let count = source.tours.len();
        self.tours.extend(source.tours);
        log::debug!("added {} tour(s) from {}", count, source.name.as_deref().unwrap_or("<unnamed>"));
        Ok(count)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Number of nodes
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Vehicle capacity; only meaningful for `CVRP`
    pub fn capacity(&self) -> Option<u64> {
        self.capacity
    }

    pub fn edge_weight_type(&self) -> Option<EdgeWeightType> {
        self.edge_weight_type
    }

    /// Layout of explicit weights, `None` if weights are not explicit
    pub fn edge_weight_format(&self) -> Option<EdgeWeightFormat> {
        self.edge_weight_format
    }

    pub fn edge_data_format(&self) -> Option<EdgeDataFormat> {
        self.edge_data_format
    }

    pub fn node_coord_type(&self) -> NodeCoordType {
        self.node_coord_type
    }

    pub fn display_data_type(&self) -> DisplayDataType {
        self.display_data_type
    }

    pub fn distance_table(&self) -> Option<&DistanceTable> {
        self.distance_table.as_ref()
    }

    pub fn display_data(&self) -> Option<&NodeCoordinates> {
        self.display_data.as_ref()
    }

    pub fn fixed_edges(&self) -> Option<&EdgeData> {
        self.fixed_edges.as_ref()
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn vehicle_routing_table(&self) -> Option<&VehicleRoutingTable> {
        self.vehicle_routing_table.as_ref()
    }

    pub fn clusters(&self) -> Option<&Clusters> {
        self.clusters.as_ref()
    }

    /// Distance between 1-based nodes `i` and `j`
    pub fn distance(&self, i: usize, j: usize) -> Result<f64> {
        let table = self.distance_table.as_ref().ok_or(ParseError::NoDistanceTable)?;
        let dimension = table.size();
        if i == 0 {
            return Err(ParseError::IndexOutOfBounds { index: i, dimension });
        }
        if j == 0 {
            return Err(ParseError::IndexOutOfBounds { index: j, dimension });
        }
        table.distance_between(i - 1, j - 1)
    }

    /// Get an overview of the instance
    pub fn summary(&self) -> InstanceSummary {
        let (num_depots, total_demand) = match &self.vehicle_routing_table {
            Some(vrp) => (vrp.depots().count(), Some(vrp.total_demand())),
            None => (0, None),
        };

        InstanceSummary {
            name: self.name.clone().unwrap_or_default(),
            data_type: self.data_type,
            dimension: self.dimension,
            edge_weight_type: self.edge_weight_type,
            distance_table: self.distance_table.as_ref().map(|t| t.kind().to_string()),
            has_display_data: self.display_data.is_some(),
            num_fixed_edges: self.fixed_edges.as_ref().map_or(0, EdgeData::len),
            num_tours: self.tours.len(),
            num_clusters: self.clusters.as_ref().map_or(0, Clusters::len),
            capacity: self.capacity,
            num_depots,
            total_demand,
        }
    }
}

impl FromStr for ProblemInstance {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self> {
        Self::load(text.as_bytes())
    }
}

/// Overview of a loaded instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSummary {
    pub name: String,
    pub data_type: Option<DataType>,
    pub dimension: usize,
    pub edge_weight_type: Option<EdgeWeightType>,
    pub distance_table: Option<String>,
    pub has_display_data: bool,
    pub num_fixed_edges: usize,
    pub num_tours: usize,
    pub num_clusters: usize,
    pub capacity: Option<u64>,
    pub num_depots: usize,
    pub total_demand: Option<u64>,
}

impl std::fmt::Display for InstanceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        match self.data_type {
            Some(kind) => writeln!(f, "  Type: {}", kind)?,
            None => writeln!(f, "  Type: unknown")?,
        }
        writeln!(f, "  Nodes: {}", self.dimension)?;
        if let Some(kind) = self.edge_weight_type {
            writeln!(f, "  Edge weights: {}", kind)?;
        }
        writeln!(f, "  Distance table: {}", self.distance_table.as_deref().unwrap_or("none"))?;
        if self.has_display_data {
            writeln!(f, "  Display data: explicit")?;
        }
        if self.num_fixed_edges > 0 {
            writeln!(f, "  Fixed edges: {}", self.num_fixed_edges)?;
        }
        if let Some(capacity) = self.capacity {
            writeln!(f, "  Capacity: {}", capacity)?;
        }
        if let Some(total_demand) = self.total_demand {
            writeln!(f, "  Depots: {}", self.num_depots)?;
            writeln!(f, "  Total demand: {}", total_demand)?;
        }
        if self.num_clusters > 0 {
            writeln!(f, "  Clusters: {}", self.num_clusters)?;
        }
        write!(f, "  Registered tours: {}", self.num_tours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = "DIMENSION: 3\nEDGE_WEIGHT_TYPE: EUC_2D\nNODE_COORD_SECTION\n1 0 0\n2 3 0\n3 0 4\nEOF\n";

    const TOUR_FILE: &str = "\
NAME : minimal.opt.tour
TYPE : TOUR
DIMENSION : 3
TOUR_SECTION
1
3
2
-1
EOF
";

    #[test]
    fn test_distance_calculation() {
        let instance: ProblemInstance = MINIMAL.parse().unwrap();

        assert_eq!(instance.dimension(), 3);
        assert_eq!(instance.distance(1, 2).unwrap(), 3.0);
        assert_eq!(instance.distance(1, 3).unwrap(), 4.0);
        assert_eq!(instance.distance(2, 3).unwrap(), 5.0);
        assert_eq!(instance.distance(3, 2).unwrap(), 5.0);
        assert_eq!(instance.distance(2, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_outside_instance() {
        let instance: ProblemInstance = MINIMAL.parse().unwrap();

        assert!(matches!(instance.distance(0, 1), Err(ParseError::IndexOutOfBounds { index: 0, .. })));
        assert!(matches!(instance.distance(1, 4), Err(ParseError::IndexOutOfBounds { index: 3, dimension: 3 })));

        let tours: ProblemInstance = TOUR_FILE.parse().unwrap();
        assert!(matches!(tours.distance(1, 2), Err(ParseError::NoDistanceTable)));
    }

    #[test]
    fn test_whitespace_variants_give_same_instance() {
        let spaced = "  DIMENSION :   3 \nEDGE_WEIGHT_TYPE\t:EUC_2D\n\n  NODE_COORD_SECTION  \n1 0 0\n 2  3 0\n3 0 4\n EOF \n";

        let a: ProblemInstance = MINIMAL.parse().unwrap();
        let b: ProblemInstance = spaced.parse().unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_reader_and_str_agree() {
        let from_str: ProblemInstance = MINIMAL.parse().unwrap();
        let from_reader = ProblemInstance::from_reader(MINIMAL.as_bytes()).unwrap();
        assert_eq!(from_str, from_reader);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("gtsplib-reader-{}.tsp", std::process::id()));
        File::create(&path).unwrap().write_all(MINIMAL.as_bytes()).unwrap();

        let instance = ProblemInstance::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(instance, MINIMAL.parse::<ProblemInstance>().unwrap());
        assert!(matches!(ProblemInstance::from_file(&path), Err(ParseError::Io(_))));
    }

    #[test]
    fn test_tour_header_and_sentinel_forms_agree() {
        let with_header: ProblemInstance = TOUR_FILE.parse().unwrap();
        let with_sentinel: ProblemInstance = TOUR_FILE.replace("TOUR_SECTION", "-1").parse().unwrap();

        assert_eq!(with_header.tours(), with_sentinel.tours());
        assert_eq!(with_header.tours()[0].nodes(), &[0, 2, 1]);
    }

    #[test]
    fn test_add_tours_from_tour_file() {
        let mut instance: ProblemInstance = MINIMAL.parse().unwrap();
        instance.add_tour(Tour::from_nodes(&[0, 1, 2]));

        let added = instance.add_tours_from_reader(TOUR_FILE.as_bytes()).unwrap();

        assert_eq!(added, 1);
        assert_eq!(instance.tours().len(), 2);
        assert_eq!(instance.tours()[1].nodes(), &[0, 2, 1]);
        assert_eq!(instance.dimension(), 3);
        assert!(instance.name().is_none());
    }

    #[test]
    fn test_rejects_non_tour_source() {
        let mut instance: ProblemInstance = MINIMAL.parse().unwrap();
        instance.add_tour(Tour::from_nodes(&[2, 1, 0]));
        let before = instance.tours().to_vec();

        let source = TOUR_FILE.replace("TYPE : TOUR", "TYPE : TSP");
        let result = instance.add_tours_from_reader(source.as_bytes());

        assert!(matches!(result, Err(ParseError::NotATourFile(Some(DataType::Tsp)))));
        assert_eq!(instance.tours(), &before[..]);

        let untyped = TOUR_FILE.replace("TYPE : TOUR\n", "");
        assert!(matches!(instance.add_tours_from_reader(untyped.as_bytes()), Err(ParseError::NotATourFile(None))));
    }

    #[test]
    fn test_summary() {
        let text = format!("NAME : minimal\nTYPE : TSP\n{}", MINIMAL);
        let instance: ProblemInstance = text.parse().unwrap();

        let summary = instance.summary();
        assert_eq!(summary.name, "minimal");
        assert_eq!(summary.distance_table.as_deref(), Some("node coordinates"));
        assert_eq!(summary.num_tours, 0);

        let printed = summary.to_string();
        assert!(printed.contains("Nodes: 3"));
        assert!(printed.contains("Edge weights: EUC_2D"));
    }

    #[test]
    fn test_json_dump() {
        let instance: ProblemInstance = MINIMAL.parse().unwrap();
        let json = serde_json::to_value(&instance).unwrap();

        assert_eq!(json["dimension"], 3);
        assert_eq!(json["node_coord_type"], "TWOD_COORDS");
        assert_eq!(json["distance_table"]["NodeCoordinates"]["edge_weight_type"], "EUC_2D");
    }
}
