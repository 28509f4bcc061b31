//! Classification of the lines seen by the instance parser outside of sections.

/// Section markers that hand the stream over to a component
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Section {
    NodeCoords,
    EdgeWeights,
    EdgeData,
    DisplayData,
    /// `TOUR_SECTION`
    Tour,
    /// A bare `-1` line, which starts a tour in some files
    TourSentinel,
    FixedEdges,
    Demands,
    Depots,
    GtspSets,
}

impl Section {
    fn from_token(token: &str) -> Option<Section> {
        let section = match token {
            "NODE_COORD_SECTION" => Section::NodeCoords,
            "EDGE_WEIGHT_SECTION" => Section::EdgeWeights,
            "EDGE_DATA_SECTION" => Section::EdgeData,
            "DISPLAY_DATA_SECTION" => Section::DisplayData,
            "TOUR_SECTION" => Section::Tour,
            "-1" => Section::TourSentinel,
            "FIXED_EDGES_SECTION" => Section::FixedEdges,
            "DEMAND_SECTION" => Section::Demands,
            "DEPOT_SECTION" => Section::Depots,
            "GTSP_SET_SECTION:" => Section::GtspSets,
            _ => return None,
        };
        Some(section)
    }

    /// Sections whose marker may be written as an empty `KEY :` declaration
    fn from_key(key: &str) -> Option<Section> {
        match key {
            "FIXED_EDGES" | "FIXED_EDGES_SECTION" => Some(Section::FixedEdges),
            "GTSP_SET_SECTION" => Some(Section::GtspSets),
            _ => None,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Section::NodeCoords => "NODE_COORD_SECTION",
            Section::EdgeWeights => "EDGE_WEIGHT_SECTION",
            Section::EdgeData => "EDGE_DATA_SECTION",
            Section::DisplayData => "DISPLAY_DATA_SECTION",
            Section::Tour | Section::TourSentinel => "TOUR_SECTION",
            Section::FixedEdges => "FIXED_EDGES_SECTION",
            Section::Demands => "DEMAND_SECTION",
            Section::Depots => "DEPOT_SECTION",
            Section::GtspSets => "GTSP_SET_SECTION",
        }
    }
}

/// Header keys the parser knows about
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum HeaderKey {
    Name,
    Comment,
    Type,
    Dimension,
    Capacity,
    EdgeWeightType,
    EdgeWeightFormat,
    EdgeDataFormat,
    NodeCoordType,
    DisplayDataType,
    GtspSets,
}

impl HeaderKey {
    fn from_key(key: &str) -> Option<HeaderKey> {
        let key = match key {
            "NAME" => HeaderKey::Name,
            "COMMENT" => HeaderKey::Comment,
            "TYPE" => HeaderKey::Type,
            "DIMENSION" => HeaderKey::Dimension,
            "CAPACITY" => HeaderKey::Capacity,
            "EDGE_WEIGHT_TYPE" => HeaderKey::EdgeWeightType,
            "EDGE_WEIGHT_FORMAT" => HeaderKey::EdgeWeightFormat,
            "EDGE_DATA_FORMAT" => HeaderKey::EdgeDataFormat,
            "NODE_COORD_FORMAT" | "NODE_COORD_TYPE" => HeaderKey::NodeCoordType,
            "DISPLAY_DATA_TYPE" => HeaderKey::DisplayDataType,
            "GTSP_SETS" => HeaderKey::GtspSets,
            _ => return None,
        };
        Some(key)
    }
}

/// A classified, already trimmed line
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum Line<'a> {
    Blank,
    Eof,
    Section(Section),
    Header { key: HeaderKey, value: &'a str },
    /// A `KEY : VALUE` line with a key outside the known vocabulary
    UnknownHeader { key: &'a str, value: &'a str },
    /// Neither a section marker nor a `KEY : VALUE` line
    Malformed,
}

impl<'a> Line<'a> {
    pub(crate) fn classify(line: &'a str) -> Line<'a> {
        let line = line.trim();
        if line.is_empty() {
            return Line::Blank;
        }
        if line == "EOF" {
            return Line::Eof;
        }
        if let Some(section) = Section::from_token(line) {
            return Line::Section(section);
        }

        let Some((key, value)) = line.split_once(':') else {
            return Line::Malformed;
        };
        let (key, value) = (key.trim(), value.trim());

        if value.is_empty() {
            if let Some(section) = Section::from_key(key) {
                return Line::Section(section);
            }
        }

        match HeaderKey::from_key(key) {
            Some(key) => Line::Header { key, value },
            None => Line::UnknownHeader { key, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_markers() {
        assert_eq!(Line::classify("NODE_COORD_SECTION"), Line::Section(Section::NodeCoords));
        assert_eq!(Line::classify("  DEPOT_SECTION \t"), Line::Section(Section::Depots));
        assert_eq!(Line::classify("-1"), Line::Section(Section::TourSentinel));
        assert_eq!(Line::classify("GTSP_SET_SECTION:"), Line::Section(Section::GtspSets));
        assert_eq!(Line::classify("GTSP_SET_SECTION :"), Line::Section(Section::GtspSets));
        assert_eq!(Line::classify("FIXED_EDGES :  "), Line::Section(Section::FixedEdges));
        assert_eq!(Line::classify("FIXED_EDGES_SECTION"), Line::Section(Section::FixedEdges));
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert_eq!(Line::classify("node_coord_section"), Line::Malformed);
    }

    #[test]
    fn test_header_split_on_first_colon() {
        assert_eq!(
            Line::classify("COMMENT : solved: by hand"),
            Line::Header { key: HeaderKey::Comment, value: "solved: by hand" }
        );
        assert_eq!(Line::classify("DIMENSION:5"), Line::Header { key: HeaderKey::Dimension, value: "5" });
        assert_eq!(
            Line::classify("NODE_COORD_TYPE : TWOD_COORDS"),
            Line::Header { key: HeaderKey::NodeCoordType, value: "TWOD_COORDS" }
        );
    }

    #[test]
    fn test_unknown_and_malformed_lines() {
        assert_eq!(Line::classify("VEHICLES : 4"), Line::UnknownHeader { key: "VEHICLES", value: "4" });
        assert_eq!(Line::classify("1 2 3"), Line::Malformed);
        assert_eq!(Line::classify(""), Line::Blank);
        assert_eq!(Line::classify(" EOF "), Line::Eof);
    }
}
