//! Closed vocabularies of the TSPLIB header fields.
//!
//! Every enum parses from and prints as the exact token used in TSPLIB files
//! (`EUC_2D`, `UPPER_DIAG_ROW`, ...), and serializes the same way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

macro_rules! tsplib_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $token)] $variant,)+
        }

        impl $name {
            /// All values, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The token used for this value in TSPLIB files
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($token => Ok($name::$variant),)+
                    other => Err(ParseError::UnknownEnumValue {
                        field: $field.to_string(),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tsplib_enum! {
    /// Kind of problem described by a file (`TYPE`)
    DataType, "TYPE" {
        /// Symmetric traveling salesman problem
        Tsp => "TSP",
        /// Asymmetric traveling salesman problem
        Atsp => "ATSP",
        /// Sequential ordering problem
        Sop => "SOP",
        /// Hamiltonian cycle problem
        Hcp => "HCP",
        /// Capacitated vehicle routing problem
        Cvrp => "CVRP",
        /// A collection of tours
        Tour => "TOUR",
        /// Asymmetric generalized traveling salesman problem
        Agtsp => "AGTSP",
        /// Symmetric generalized traveling salesman problem
        Gtsp => "GTSP",
    }
}

tsplib_enum! {
    /// How edge weights are given (`EDGE_WEIGHT_TYPE`)
    EdgeWeightType, "EDGE_WEIGHT_TYPE" {
        /// Weights are listed in an `EDGE_WEIGHT_SECTION`
        Explicit => "EXPLICIT",
        Euc2d => "EUC_2D",
        Euc3d => "EUC_3D",
        Max2d => "MAX_2D",
        Max3d => "MAX_3D",
        Man2d => "MAN_2D",
        Man3d => "MAN_3D",
        Ceil2d => "CEIL_2D",
        /// Geographical distance, coordinates in DDD.MM format
        Geo => "GEO",
        /// Pseudo-Euclidean distance of the att48/att532 instances
        Att => "ATT",
        /// Crystallography distance (version 1)
        Xray1 => "XRAY1",
        /// Crystallography distance (version 2)
        Xray2 => "XRAY2",
        /// Problem-specific function described in the file's comment
        Special => "SPECIAL",
    }
}

impl EdgeWeightType {
    /// Coordinate layout implied by this weight type when `NODE_COORD_TYPE` is absent
    pub fn node_coord_type(&self) -> NodeCoordType {
        match self {
            EdgeWeightType::Euc2d
            | EdgeWeightType::Max2d
            | EdgeWeightType::Man2d
            | EdgeWeightType::Ceil2d
            | EdgeWeightType::Geo
            | EdgeWeightType::Att => NodeCoordType::TwodCoords,
            EdgeWeightType::Euc3d
            | EdgeWeightType::Max3d
            | EdgeWeightType::Man3d
            | EdgeWeightType::Xray1
            | EdgeWeightType::Xray2 => NodeCoordType::ThreedCoords,
            EdgeWeightType::Explicit | EdgeWeightType::Special => NodeCoordType::NoCoords,
        }
    }
}

tsplib_enum! {
    /// Layout of an explicit weight matrix (`EDGE_WEIGHT_FORMAT`)
    EdgeWeightFormat, "EDGE_WEIGHT_FORMAT" {
        /// Weights are given by a function, not a matrix
        Function => "FUNCTION",
        FullMatrix => "FULL_MATRIX",
        UpperRow => "UPPER_ROW",
        LowerRow => "LOWER_ROW",
        UpperDiagRow => "UPPER_DIAG_ROW",
        LowerDiagRow => "LOWER_DIAG_ROW",
        UpperCol => "UPPER_COL",
        LowerCol => "LOWER_COL",
        UpperDiagCol => "UPPER_DIAG_COL",
        LowerDiagCol => "LOWER_DIAG_COL",
    }
}

tsplib_enum! {
    /// Layout of an `EDGE_DATA_SECTION` (`EDGE_DATA_FORMAT`)
    EdgeDataFormat, "EDGE_DATA_FORMAT" {
        EdgeList => "EDGE_LIST",
        AdjList => "ADJ_LIST",
    }
}

tsplib_enum! {
    /// Number of coordinates per node (`NODE_COORD_TYPE`)
    NodeCoordType, "NODE_COORD_TYPE" {
        TwodCoords => "TWOD_COORDS",
        ThreedCoords => "THREED_COORDS",
        NoCoords => "NO_COORDS",
    }
}

impl NodeCoordType {
    /// Number of values per node, 0 for `NO_COORDS`
    pub fn arity(&self) -> usize {
        match self {
            NodeCoordType::TwodCoords => 2,
            NodeCoordType::ThreedCoords => 3,
            NodeCoordType::NoCoords => 0,
        }
    }
}

tsplib_enum! {
    /// How a graphical display of the nodes is obtained (`DISPLAY_DATA_TYPE`)
    DisplayDataType, "DISPLAY_DATA_TYPE" {
        /// Display is derived from the node coordinates
        CoordDisplay => "COORD_DISPLAY",
        /// Explicit 2D coordinates in a `DISPLAY_DATA_SECTION`
        TwodDisplay => "TWOD_DISPLAY",
        NoDisplay => "NO_DISPLAY",
    }
}
