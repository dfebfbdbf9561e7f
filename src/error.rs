use core::fmt;

/// Errors raised at construction and load boundaries.
///
/// Nothing inside a running tick produces one of these; they all mean a
/// corrupt asset or a bad configuration value.
#[derive(Debug)]
pub enum GameError {
    InvalidSpring { floor: i32, ceiling: i32 },
    SpringStartOutOfRange { start: i32, floor: i32, ceiling: i32 },
    OutOfBounds { x1: f32, y1: f32, x2: f32, y2: f32 },
    InvalidInstant { key: String },
    DuplicateInstant { instant: i32 },
    InstantOutOfRange { instant: i32, total_time: i32 },
    LevelNotFound { level: u32 },
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpring { floor, ceiling } => write!(
                f,
                "spring floor ({floor}) must be lower than its ceiling ({ceiling})"
            ),
            Self::SpringStartOutOfRange {
                start,
                floor,
                ceiling,
            } => write!(
                f,
                "spring start {start} must lie between {floor} and {ceiling} inclusive"
            ),
            Self::OutOfBounds { x1, y1, x2, y2 } => write!(
                f,
                "coordinates ({x1}, {y1}), ({x2}, {y2}) are outside the playable area"
            ),
            Self::InvalidInstant { key } => {
                write!(f, "level script key {key:?} is not a tick instant")
            }
            Self::DuplicateInstant { instant } => {
                write!(f, "level script names instant {instant} more than once")
            }
            Self::InstantOutOfRange {
                instant,
                total_time,
            } => write!(
                f,
                "level script instant {instant} is never reached by a countdown from {total_time} to 0"
            ),
            Self::LevelNotFound { level } => write!(f, "level {level} does not exist"),
            Self::Json(err) => write!(f, "malformed document: {err}"),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
