use core::fmt;

/// Reasons a level cannot be turned into a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    EmptyGrid,
    TileCountMismatch { expected: usize, found: usize },
    StartOutOfBounds { x: i32, y: i32 },
    StartBlocked { x: i32, y: i32 },
    SpawnOutOfBounds { x: i32, y: i32 },
    TooMany(&'static str),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::EmptyGrid => write!(f, "tile grid has no tiles"),
            LevelError::TileCountMismatch { expected, found } => {
                write!(f, "expected {expected} tiles but found {found}")
            }
            LevelError::StartOutOfBounds { x, y } => {
                write!(f, "player start ({x}, {y}) is outside the grid")
            }
            LevelError::StartBlocked { x, y } => {
                write!(f, "player start ({x}, {y}) is inside a blocking tile")
            }
            LevelError::SpawnOutOfBounds { x, y } => {
                write!(f, "spawn at ({x}, {y}) is outside the grid")
            }
            LevelError::TooMany(kind) => write!(f, "too many {kind} for this world"),
        }
    }
}

impl core::error::Error for LevelError {}
