//! TSPLIB-style instance files and coordinate-to-graph construction.
//!
//! Accepted format:
//!
//! ```text
//! NAME : berlin52
//! COMMENT : 52 locations in Berlin (Groetschel)
//! TYPE : TSP
//! DIMENSION : 52
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 565.0 575.0
//! 2 25.0 185.0
//! ...
//! EOF
//! ```
//!
//! Header lines are `KEY : VALUE`; unknown keys are ignored. Node ids in the
//! coordinate section must be integers but are otherwise ignored: nodes are
//! numbered `0..n` in file order. The coordinate section ends at `EOF`, at
//! the end of input, or at the next line starting with a letter (such as
//! `DISPLAY_DATA_SECTION`); everything after that is ignored.

use std::path::Path;

use crate::graph::{GraphError, WeightedGraph};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unrounded Euclidean distance.
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A parsed coordinate instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// `NAME` header, or empty if absent.
    pub name: String,
    /// `COMMENT` header, if present.
    pub comment: Option<String>,
    /// Coordinates in file order; index is the node id.
    pub points: Vec<Point>,
}

impl Instance {
    /// Complete Euclidean graph over the instance points.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeight`] if a distance overflows to
    /// infinity.
    pub fn to_graph(&self) -> Result<WeightedGraph, GraphError> {
        euclidean_graph(&self.points)
    }
}

/// Typed failure for instance loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    /// The file could not be read.
    Io { path: String, detail: String },
    /// A header line had no `:` separator or an unparsable value.
    InvalidHeader { line: usize, detail: String },
    /// `EDGE_WEIGHT_TYPE` is something other than `EUC_2D`.
    UnsupportedEdgeWeightType { found: String },
    /// A coordinate line was not `id x y` with finite coordinates.
    MalformedCoordinate { line: usize, text: String },
    /// `DIMENSION` disagrees with the number of coordinate lines.
    DimensionMismatch { declared: usize, found: usize },
    /// No `NODE_COORD_SECTION` or no coordinates in it.
    NoCoordinates,
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "cannot read {path}: {detail}"),
            Self::InvalidHeader { line, detail } => {
                write!(f, "invalid header at line {line}: {detail}")
            }
            Self::UnsupportedEdgeWeightType { found } => {
                write!(f, "unsupported EDGE_WEIGHT_TYPE: {found}")
            }
            Self::MalformedCoordinate { line, text } => {
                write!(f, "malformed coordinate at line {line}: {text:?}")
            }
            Self::DimensionMismatch { declared, found } => {
                write!(f, "DIMENSION is {declared} but {found} coordinates were read")
            }
            Self::NoCoordinates => write!(f, "no node coordinates found"),
        }
    }
}

impl std::error::Error for InstanceError {}

/// Read and parse an instance file.
///
/// # Errors
///
/// Returns [`InstanceError::Io`] if the file cannot be read, or any parse
/// error from [`parse_instance`].
pub fn read_instance(path: &Path) -> Result<Instance, InstanceError> {
    let text = std::fs::read_to_string(path).map_err(|e| InstanceError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    parse_instance(&text)
}

/// Parse instance text.
///
/// # Errors
///
/// See [`InstanceError`] for the failure cases.
pub fn parse_instance(text: &str) -> Result<Instance, InstanceError> {
    let mut name = String::new();
    let mut comment = None;
    let mut dimension: Option<usize> = None;
    let mut points = Vec::new();
    let mut in_coords = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }
        if in_coords {
            // Any keyword line (another section, or a trailer) closes the
            // coordinate block. Nothing after it is read.
            if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
                break;
            }
            points.push(parse_coordinate(line_no, line)?);
            continue;
        }
        if line.starts_with("NODE_COORD_SECTION") {
            in_coords = true;
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(InstanceError::InvalidHeader {
                line: line_no,
                detail: format!("expected KEY : VALUE, got {line:?}"),
            });
        };
        let value = value.trim();
        match key.trim() {
            "NAME" => name = value.to_string(),
            "COMMENT" => comment = Some(value.to_string()),
            "DIMENSION" => {
                let parsed = value.parse().map_err(|_| InstanceError::InvalidHeader {
                    line: line_no,
                    detail: format!("DIMENSION is not an integer: {value:?}"),
                })?;
                dimension = Some(parsed);
            }
            "EDGE_WEIGHT_TYPE" if value != "EUC_2D" => {
                return Err(InstanceError::UnsupportedEdgeWeightType {
                    found: value.to_string(),
                });
            }
            _ => {}
        }
    }

    if points.is_empty() {
        return Err(InstanceError::NoCoordinates);
    }
    if let Some(declared) = dimension {
        if declared != points.len() {
            return Err(InstanceError::DimensionMismatch {
                declared,
                found: points.len(),
            });
        }
    }

    Ok(Instance {
        name,
        comment,
        points,
    })
}

fn parse_coordinate(line_no: usize, line: &str) -> Result<Point, InstanceError> {
    let malformed = || InstanceError::MalformedCoordinate {
        line: line_no,
        text: line.to_string(),
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, x, y] = fields.as_slice() else {
        return Err(malformed());
    };
    id.parse::<u64>().map_err(|_| malformed())?;
    let x: f64 = x.parse().map_err(|_| malformed())?;
    let y: f64 = y.parse().map_err(|_| malformed())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(malformed());
    }
    Ok(Point::new(x, y))
}

/// Complete graph with Euclidean distances between every pair of points.
///
/// # Errors
///
/// Returns [`GraphError::InvalidWeight`] if a distance is not finite.
pub fn euclidean_graph(points: &[Point]) -> Result<WeightedGraph, GraphError> {
    let mut graph = WeightedGraph::new(points.len());
    for (a, pa) in points.iter().enumerate() {
        for (b, pb) in points.iter().enumerate().skip(a + 1) {
            graph.add_edge(a, b, pa.distance(pb))?;
        }
    }
    Ok(graph)
}

/// The 5-node classroom instance. Optimal tour `[0, 1, 2, 4, 3]`, cost 37.
#[must_use]
pub fn classroom_example() -> WeightedGraph {
    const EDGES: [(usize, usize, f64); 10] = [
        (0, 1, 4.0),
        (0, 2, 8.0),
        (0, 3, 9.0),
        (0, 4, 12.0),
        (1, 2, 6.0),
        (1, 3, 8.0),
        (1, 4, 9.0),
        (2, 3, 10.0),
        (2, 4, 11.0),
        (3, 4, 7.0),
    ];
    let mut graph = WeightedGraph::new(5);
    for (a, b, w) in EDGES {
        // Constant edges are in range, distinct and finite.
        let _ = graph.add_edge(a, b, w);
    }
    graph
}
