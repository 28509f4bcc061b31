//! GTSPLIB Reader Library
//!
//! Reads problem instances in the TSPLIB/GTSPLIB text format (TSP, ATSP, SOP,
//! HCP, CVRP, GTSP and tour files) into a structured, read-only representation.
//!
//! # Features
//!
//! - Coordinate based distances (`EUC_2D`, `EUC_3D`, `MAX_*`, `MAN_*`, `CEIL_2D`, `GEO`, `ATT`)
//! - Explicit weight matrices in every `EDGE_WEIGHT_FORMAT` layout
//! - Sparse edge data given as edge lists or adjacency lists
//! - Tours, fixed edges, display data, CVRP demands and depots, GTSP clusters
//!
//! # Example
//!
//! ```
//! use gtsplib_reader::ProblemInstance;
//!
//! let text = "\
//! NAME : triangle
//! TYPE : TSP
//! DIMENSION : 3
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 0 0
//! 2 3 0
//! 3 0 4
//! EOF
//! ";
//!
//! let instance: ProblemInstance = text.parse().unwrap();
//! assert_eq!(instance.dimension(), 3);
//! assert_eq!(instance.distance(2, 3).unwrap(), 5.0);
//! ```

pub mod cluster;
pub mod distance;
pub mod error;
pub mod instance;
pub mod tour;
pub mod types;
pub mod vrp;

mod header;
mod parser;
mod reader;

pub use cluster::Clusters;
pub use distance::{DistanceTable, EdgeData, EdgeWeightMatrix, Node, NodeCoordinates};
pub use error::{ParseError, Result};
pub use instance::{InstanceSummary, ProblemInstance};
pub use tour::Tour;
pub use types::*;
pub use vrp::VehicleRoutingTable;
