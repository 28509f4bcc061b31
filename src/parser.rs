//! The line-oriented state machine that turns a TSPLIB stream into a [`ProblemInstance`].
//!
//! Header fields and sections are collected into an [`InstanceBuilder`]; the
//! defaults that depend on the whole file are applied once, in
//! [`InstanceBuilder::finish`].

use std::io::BufRead;

use crate::cluster::Clusters;
use crate::distance::{DistanceTable, EdgeData, EdgeWeightMatrix, NodeCoordinates};
use crate::error::{ParseError, Result};
use crate::header::{HeaderKey, Line, Section};
use crate::instance::ProblemInstance;
use crate::reader::LineReader;
use crate::tour::Tour;
use crate::types::*;
use crate::vrp::VehicleRoutingTable;

/// Everything read so far; nothing is shared with the finished instance
#[derive(Debug, Default)]
pub(crate) struct InstanceBuilder {
    name: Option<String>,
    data_type: Option<DataType>,
    comment: Option<String>,
    dimension: Option<usize>,
    /// Set once a node-indexed section has been read
    dimension_fixed: bool,
    cluster_count: Option<usize>,
    capacity: Option<u64>,
    edge_weight_type: Option<EdgeWeightType>,
    edge_weight_format: Option<EdgeWeightFormat>,
    edge_data_format: Option<EdgeDataFormat>,
    node_coord_type: Option<NodeCoordType>,
    display_data_type: Option<DisplayDataType>,
    distance_table: Option<DistanceTable>,
    display_data: Option<NodeCoordinates>,
    fixed_edges: Option<EdgeData>,
    tours: Vec<Tour>,
    vehicle_routing_table: Option<VehicleRoutingTable>,
    clusters: Option<Clusters>,
}

impl InstanceBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scans the whole stream, stopping early at `EOF`
    pub(crate) fn read<R: BufRead>(mut self, reader: &mut LineReader<R>) -> Result<ProblemInstance> {
        while let Some(line) = reader.next_line()? {
            match Line::classify(&line) {
                Line::Blank => {}
                Line::Eof => break,
                Line::Section(section) => self.read_section(section, reader)?,
                Line::Header { key, value } => self.apply_header(key, value, reader.line_number(), &line)?,
                Line::UnknownHeader { key, .. } => {
                    log::debug!("ignoring unknown header key '{}' at line {}", key, reader.line_number());
                }
                Line::Malformed => {
                    return Err(ParseError::MalformedHeaderLine { line: reader.line_number(), content: line.clone() });
                }
            }
        }

        Ok(self.finish())
    }

    fn apply_header(&mut self, key: HeaderKey, value: &str, line: usize, content: &str) -> Result<()> {
        let malformed = || ParseError::MalformedHeaderLine { line, content: content.to_string() };
        if value.is_empty() && key != HeaderKey::Comment {
            return Err(malformed());
        }

        match key {
            HeaderKey::Name => self.name = Some(value.to_string()),
            HeaderKey::Comment => {
                self.comment = Some(match self.comment.take() {
                    Some(comment) => format!("{}\n{}", comment, value),
                    None => value.to_string(),
                })
            }
            HeaderKey::Type => self.data_type = Some(value.parse()?),
            HeaderKey::Dimension => {
                let dimension: usize = value.parse().map_err(|_| malformed())?;
                match self.dimension {
                    Some(fixed) if self.dimension_fixed && fixed != dimension => {
                        log::warn!("line {}: DIMENSION {} ignored, already fixed at {}", line, dimension, fixed);
                    }
                    _ => self.dimension = Some(dimension),
                }
            }
            HeaderKey::Capacity => self.capacity = Some(value.parse().map_err(|_| malformed())?),
            HeaderKey::EdgeWeightType => self.edge_weight_type = Some(value.parse()?),
            HeaderKey::EdgeWeightFormat => self.edge_weight_format = Some(value.parse()?),
            HeaderKey::EdgeDataFormat => self.edge_data_format = Some(value.parse()?),
            HeaderKey::NodeCoordType => self.node_coord_type = Some(value.parse()?),
            HeaderKey::DisplayDataType => self.display_data_type = Some(value.parse()?),
            HeaderKey::GtspSets => self.cluster_count = Some(value.parse().map_err(|_| malformed())?),
        }
        Ok(())
    }

    /// `DIMENSION` as required by a node-indexed section; reading the section fixes it
    fn require_dimension(&mut self, section: Section) -> Result<usize> {
        let dimension = self
            .dimension
            .ok_or(ParseError::MissingPrerequisiteField { section: section.name(), field: "DIMENSION" })?;
        self.dimension_fixed = true;
        Ok(dimension)
    }

    fn read_section<R: BufRead>(&mut self, section: Section, reader: &mut LineReader<R>) -> Result<()> {
        log::debug!("line {}: entering {}", reader.line_number(), section.name());

        match section {
            Section::NodeCoords => {
                let edge_weight_type = self.edge_weight_type.ok_or(ParseError::MissingPrerequisiteField {
                    section: section.name(),
                    field: "EDGE_WEIGHT_TYPE",
                })?;
                let dimension = self.require_dimension(section)?;
                let coord_type = *self.node_coord_type.get_or_insert(edge_weight_type.node_coord_type());

                let coordinates = NodeCoordinates::load(reader, section.name(), dimension, coord_type)?;
                self.set_distance_table(DistanceTable::NodeCoordinates { coordinates, edge_weight_type });
            }
            Section::EdgeWeights => {
                let dimension = self.require_dimension(section)?;
                let format = self.edge_weight_format.ok_or(ParseError::MissingPrerequisiteField {
                    section: section.name(),
                    field: "EDGE_WEIGHT_FORMAT",
                })?;
                if self.data_type == Some(DataType::Sop) {
                    // SOP files repeat the node count on the first line of the section
                    reader.next_data_line(section.name())?;
                }

                let matrix = EdgeWeightMatrix::load(reader, dimension, format)?;
                self.set_distance_table(DistanceTable::EdgeWeightMatrix(matrix));
            }
            Section::EdgeData => {
                let dimension = self.require_dimension(section)?;
                let format = self.edge_data_format.ok_or(ParseError::MissingPrerequisiteField {
                    section: section.name(),
                    field: "EDGE_DATA_FORMAT",
                })?;

                let data = EdgeData::load(reader, section.name(), dimension, format)?;
                self.set_distance_table(DistanceTable::EdgeData(data));
            }
            Section::DisplayData => {
                let dimension = self.require_dimension(section)?;
                let display = NodeCoordinates::load(reader, section.name(), dimension, NodeCoordType::TwodCoords)?;
                self.display_data = Some(display);
            }
            Section::Tour | Section::TourSentinel => {
                let tour = Tour::load(reader, self.dimension)?;
                if tour.is_empty() {
                    log::debug!("line {}: skipping empty tour", reader.line_number());
                } else {
                    self.tours.push(tour);
                }
            }
            Section::FixedEdges => {
                let dimension = self.require_dimension(section)?;
                let edges = EdgeData::load(reader, section.name(), dimension, EdgeDataFormat::EdgeList)?;
                self.fixed_edges = Some(edges);
            }
            Section::Demands => {
                let dimension = self.require_dimension(section)?;
                self.vehicle_routing_table
                    .get_or_insert_with(|| VehicleRoutingTable::new(dimension))
                    .load_demands(reader)?;
            }
            Section::Depots => {
                let dimension = self.require_dimension(section)?;
                self.vehicle_routing_table
                    .get_or_insert_with(|| VehicleRoutingTable::new(dimension))
                    .load_depots(reader)?;
            }
            Section::GtspSets => {
                let count = self
                    .cluster_count
                    .ok_or(ParseError::MissingPrerequisiteField { section: section.name(), field: "GTSP_SETS" })?;
                self.clusters = Some(Clusters::load(reader, count, self.dimension)?);
            }
        }

        Ok(())
    }

    fn set_distance_table(&mut self, table: DistanceTable) {
        if let Some(previous) = &self.distance_table {
            log::warn!("{} replaces the earlier {} distance table", table.kind(), previous.kind());
        }
        self.distance_table = Some(table);
    }

    /// Fills the defaults that depend on the whole file.
    ///
    /// The coordinate type must be settled before the display type is derived from it.
    fn finish(self) -> ProblemInstance {
        let node_coord_type = self.node_coord_type.unwrap_or(NodeCoordType::NoCoords);
        let display_data_type = self.display_data_type.unwrap_or_else(|| {
            if node_coord_type == NodeCoordType::NoCoords {
                DisplayDataType::NoDisplay
            } else if self.display_data.is_some() {
                DisplayDataType::TwodDisplay
            } else {
                DisplayDataType::CoordDisplay
            }
        });

        log::debug!(
            "finished {}: dimension {}, {} tour(s)",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.dimension.unwrap_or(0),
            self.tours.len()
        );

        ProblemInstance {
            name: self.name,
            data_type: self.data_type,
            comment: self.comment,
            dimension: self.dimension.unwrap_or(0),
            cluster_count: self.cluster_count.unwrap_or(0),
            capacity: self.capacity,
            edge_weight_type: self.edge_weight_type,
            edge_weight_format: self.edge_weight_format,
            edge_data_format: self.edge_data_format,
            node_coord_type,
            display_data_type,
            distance_table: self.distance_table,
            display_data: self.display_data,
            fixed_edges: self.fixed_edges,
            tours: self.tours,
            vehicle_routing_table: self.vehicle_routing_table,
            clusters: self.clusters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ProblemInstance> {
        let mut reader = LineReader::new(text.as_bytes());
        InstanceBuilder::new().read(&mut reader)
    }

    const EUC_TRIANGLE: &str = "\
NAME : triangle
COMMENT : first line
TYPE : TSP
COMMENT : second line
DIMENSION : 3
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 3 0
3 0 4
EOF
";

    #[test]
    fn test_header_fields() {
        let instance = parse(EUC_TRIANGLE).unwrap();

        assert_eq!(instance.name(), Some("triangle"));
        assert_eq!(instance.data_type(), Some(DataType::Tsp));
        assert_eq!(instance.comment(), Some("first line\nsecond line"));
        assert_eq!(instance.dimension(), 3);
        assert_eq!(instance.edge_weight_type(), Some(EdgeWeightType::Euc2d));
    }

    #[test]
    fn test_coordinate_defaults() {
        let instance = parse(EUC_TRIANGLE).unwrap();

        assert_eq!(instance.node_coord_type(), NodeCoordType::TwodCoords);
        assert_eq!(instance.display_data_type(), DisplayDataType::CoordDisplay);
    }

    #[test]
    fn test_defaults_without_coordinates() {
        let instance = parse("NAME : t\nTYPE : TOUR\nTOUR_SECTION\n1\n-1\n").unwrap();

        assert_eq!(instance.node_coord_type(), NodeCoordType::NoCoords);
        assert_eq!(instance.display_data_type(), DisplayDataType::NoDisplay);
    }

    #[test]
    fn test_display_section_sets_twod_display() {
        let text = "\
DIMENSION : 2
EDGE_WEIGHT_TYPE : EXPLICIT
EDGE_WEIGHT_FORMAT : UPPER_ROW
NODE_COORD_TYPE : TWOD_COORDS
EDGE_WEIGHT_SECTION
7
DISPLAY_DATA_SECTION
1 1.5 2.5
2 3.5 4.5
";
        let instance = parse(text).unwrap();

        assert_eq!(instance.display_data_type(), DisplayDataType::TwodDisplay);
        assert_eq!(instance.display_data().unwrap().get(1).unwrap().x, 3.5);
        assert_eq!(instance.distance(2, 1).unwrap(), 7.0);
    }

    #[test]
    fn test_explicit_display_type_is_kept() {
        let text = "DIMENSION : 1\nDISPLAY_DATA_TYPE : NO_DISPLAY\nEDGE_WEIGHT_TYPE : EUC_2D\nNODE_COORD_SECTION\n1 0 0\n";
        assert_eq!(parse(text).unwrap().display_data_type(), DisplayDataType::NoDisplay);
    }

    #[test]
    fn test_sop_skips_node_count_line() {
        let text = "\
TYPE : SOP
DIMENSION : 3
EDGE_WEIGHT_TYPE : EXPLICIT
EDGE_WEIGHT_FORMAT : FULL_MATRIX
EDGE_WEIGHT_SECTION
3
0 1 2
-1 0 3
4 -1 0
EOF
";
        let instance = parse(text).unwrap();

        assert_eq!(instance.distance(1, 3).unwrap(), 2.0);
        assert_eq!(instance.distance(2, 1).unwrap(), -1.0);
        assert_eq!(instance.distance(3, 1).unwrap(), 4.0);
    }

    #[test]
    fn test_eof_ignores_trailing_content() {
        let text = format!("{}garbage without colon\n", EUC_TRIANGLE);
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn test_end_of_stream_without_eof() {
        let text = EUC_TRIANGLE.replace("EOF\n", "");
        assert_eq!(parse(&text).unwrap().dimension(), 3);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let text = EUC_TRIANGLE.replace("TYPE : TSP", "TYPE : TSP\nVEHICLES : 3\nSERVICE_TIME:");
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn test_malformed_headers() {
        assert!(matches!(parse("NAME\n"), Err(ParseError::MalformedHeaderLine { line: 1, .. })));
        assert!(matches!(parse("NAME : a\nDIMENSION :\n"), Err(ParseError::MalformedHeaderLine { line: 2, .. })));
        assert!(matches!(parse("DIMENSION : three\n"), Err(ParseError::MalformedHeaderLine { line: 1, .. })));
        assert!(matches!(parse("COMMENT :\n"), Ok(_)));
    }

    #[test]
    fn test_unknown_enum_value() {
        match parse("EDGE_WEIGHT_TYPE : EUC_4D\n") {
            Err(ParseError::UnknownEnumValue { field, value }) => {
                assert_eq!(field, "EDGE_WEIGHT_TYPE");
                assert_eq!(value, "EUC_4D");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_prerequisites() {
        let missing = |text: &str| match parse(text) {
            Err(ParseError::MissingPrerequisiteField { section, field }) => (section, field),
            other => panic!("unexpected result: {:?}", other),
        };

        assert_eq!(missing("DIMENSION : 2\nNODE_COORD_SECTION\n"), ("NODE_COORD_SECTION", "EDGE_WEIGHT_TYPE"));
        assert_eq!(missing("EDGE_WEIGHT_TYPE : GEO\nNODE_COORD_SECTION\n"), ("NODE_COORD_SECTION", "DIMENSION"));
        assert_eq!(missing("DIMENSION : 2\nEDGE_WEIGHT_SECTION\n"), ("EDGE_WEIGHT_SECTION", "EDGE_WEIGHT_FORMAT"));
        assert_eq!(missing("DIMENSION : 2\nEDGE_DATA_SECTION\n"), ("EDGE_DATA_SECTION", "EDGE_DATA_FORMAT"));
        assert_eq!(missing("DEMAND_SECTION\n"), ("DEMAND_SECTION", "DIMENSION"));
        assert_eq!(missing("GTSP_SET_SECTION:\n1 1 -1\n"), ("GTSP_SET_SECTION", "GTSP_SETS"));
    }

    #[test]
    fn test_coordinates_without_canonical_layout() {
        let text = "DIMENSION : 1\nEDGE_WEIGHT_TYPE : SPECIAL\nNODE_COORD_SECTION\n1 0 0\n";
        assert!(matches!(
            parse(text),
            Err(ParseError::MissingPrerequisiteField { section: "NODE_COORD_SECTION", field: "NODE_COORD_TYPE" })
        ));

        let text = "DIMENSION : 1\nEDGE_WEIGHT_TYPE : SPECIAL\nNODE_COORD_TYPE : THREED_COORDS\nNODE_COORD_SECTION\n1 0 0 0\n";
        assert_eq!(parse(text).unwrap().node_coord_type(), NodeCoordType::ThreedCoords);
    }

    #[test]
    fn test_truncated_section_aborts_load() {
        let text = EUC_TRIANGLE.replace("3 0 4\nEOF\n", "");
        assert!(matches!(parse(&text), Err(ParseError::UnexpectedEndOfInput { section: "NODE_COORD_SECTION" })));
    }

    #[test]
    fn test_dimension_is_fixed_after_section() {
        let text = EUC_TRIANGLE.replace("EOF\n", "DIMENSION : 7\n");
        assert_eq!(parse(&text).unwrap().dimension(), 3);
    }

    #[test]
    fn test_oversized_declarations_fail_cleanly() {
        let huge = usize::MAX;
        let cases = [
            (format!("DIMENSION : {}\nDEMAND_SECTION\n1 0\n", huge), "DEMAND_SECTION"),
            (format!("DIMENSION : {}\nEDGE_WEIGHT_TYPE : EUC_2D\nNODE_COORD_SECTION\n1 0 0\n", huge), "NODE_COORD_SECTION"),
            (
                format!("DIMENSION : {}\nEDGE_WEIGHT_FORMAT : FULL_MATRIX\nEDGE_WEIGHT_SECTION\n0 1 2\n", huge),
                "EDGE_WEIGHT_SECTION",
            ),
            (format!("GTSP_SETS : {}\nGTSP_SET_SECTION:\n1 1 -1\n", huge), "GTSP_SET_SECTION"),
        ];

        for (text, expected) in cases {
            match parse(&text) {
                Err(ParseError::UnexpectedEndOfInput { section }) => assert_eq!(section, expected),
                other => panic!("unexpected result for {}: {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_tour_file_without_eof() {
        let instance = parse("NAME : t\nTYPE : TOUR\nDIMENSION : 3\nTOUR_SECTION\n1\n2\n3\n-1\n-1\n").unwrap();

        assert_eq!(instance.tours().len(), 1);
        assert_eq!(instance.tours()[0].nodes(), &[0, 1, 2]);
    }

    #[test]
    fn test_cvrp_sections() {
        let text = "\
NAME : small
TYPE : CVRP
DIMENSION : 3
CAPACITY : 30
EDGE_WEIGHT_TYPE : EUC_2D
DEPOT_SECTION
 1
 -1
NODE_COORD_SECTION
1 0 0
2 0 10
3 10 0
DEMAND_SECTION
1 0
2 12
3 7
EOF
";
        let instance = parse(text).unwrap();
        let vrp = instance.vehicle_routing_table().unwrap();

        assert_eq!(instance.capacity(), Some(30));
        assert_eq!(vrp.demands(), &[0, 12, 7]);
        assert_eq!(vrp.depots().collect::<Vec<_>>(), vec![0]);
        assert_eq!(instance.distance(2, 3).unwrap(), 14.0);
    }

    #[test]
    fn test_edge_data_and_fixed_edges() {
        let text = "\
TYPE : HCP
DIMENSION : 4
EDGE_DATA_FORMAT : EDGE_LIST
EDGE_DATA_SECTION
1 2
2 3
3 4
4 1
-1
FIXED_EDGES :
1 2
-1
EOF
";
        let instance = parse(text).unwrap();
        let table = instance.distance_table().unwrap();

        assert_eq!(table.kind(), "edge data");
        assert_eq!(instance.distance(1, 4).unwrap(), 1.0);
        assert!(matches!(instance.distance(1, 3), Err(ParseError::Unconnected { from: 0, to: 2 })));
        assert_eq!(instance.fixed_edges().unwrap().edges().collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn test_multiple_tours() {
        let text = "\
TYPE : TOUR
DIMENSION : 3
TOUR_SECTION
1 2 3 -1
-1
3 2 1 -1
-1
EOF
";
        let instance = parse(text).unwrap();

        assert_eq!(instance.tours().len(), 2);
        assert_eq!(instance.tours()[0].nodes(), &[0, 1, 2]);
        assert_eq!(instance.tours()[1].nodes(), &[2, 1, 0]);
    }

    #[test]
    fn test_gtsp_clusters() {
        let text = "\
NAME : 5gtsp
TYPE : GTSP
DIMENSION : 5
GTSP_SETS : 2
EDGE_WEIGHT_TYPE : EXPLICIT
EDGE_WEIGHT_FORMAT : LOWER_DIAG_ROW
EDGE_WEIGHT_SECTION
0
1 0
2 3 0
4 5 6 0
7 8 9 10 0
GTSP_SET_SECTION:
1 1 2 3 -1
2 4 5 -1
EOF
";
        let instance = parse(text).unwrap();

        assert_eq!(instance.cluster_count(), 2);
        assert_eq!(instance.clusters().unwrap().sets(), &[vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(instance.distance(5, 2).unwrap(), 8.0);
        assert_eq!(instance.distance(2, 5).unwrap(), 8.0);
    }
}
