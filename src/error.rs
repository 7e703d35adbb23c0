use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} maze")]
    OutOfRange {
        row: i32,
        col: i32,
        rows: usize,
        cols: usize,
    },

    #[error("maze layout is empty")]
    EmptyLayout,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown tile {tile:?} at ({row}, {col})")]
    UnknownTile { tile: char, row: usize, col: usize },

    #[error("layout has no {0} spawn")]
    MissingSpawn(&'static str),

    #[error("layout needs {expected} ghost spawns, found {found}")]
    GhostSpawnCount { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read session config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session config: {0}")]
    Parse(#[from] serde_json::Error),
}
