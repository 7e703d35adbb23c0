use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// Unit (row, col) delta of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::None => (0, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "easy" | "low" => Some(Self::Easy),
            "medium" | "normal" => Some(Self::Medium),
            "hard" | "high" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostState {
    Hunter,
    Prey,
    Eaten,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    PausedLocked,
    PausedUnlocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Pill,
    Energizer,
    Bonus,
    Ghost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: i32,
    pub col: i32,
}

impl CellPos {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    pub fn manhattan(self, other: CellPos) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Straight direction toward `target` when both cells share a row or column.
    pub fn direction_toward(self, target: CellPos) -> Direction {
        if self.row == target.row {
            if target.col > self.col {
                return Direction::Right;
            }
            if target.col < self.col {
                return Direction::Left;
            }
        } else if self.col == target.col {
            if target.row > self.row {
                return Direction::Down;
            }
            return Direction::Up;
        }
        Direction::None
    }
}

/// Discrete input delivered by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Move { dir: Direction },
    TogglePause,
    DebugExtraLife,
    DebugNextLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    GhostEaten,
    LifeGained,
    EnergizerEaten,
    PillEaten,
    BonusEaten,
    LevelUp,
    /// Played when the player loses a life.
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ScoreChanged {
        score: u64,
    },
    LivesChanged {
        lives: u32,
    },
    LevelChanged {
        level: u32,
    },
    LevelStarted {
        #[serde(rename = "newLevel")]
        new_level: bool,
    },
    PauseChanged {
        paused: bool,
        #[serde(rename = "userInitiated")]
        user_initiated: bool,
    },
    PointsToDisplay {
        points: u64,
        x: f64,
        y: f64,
    },
    ElementEaten {
        x: f64,
        y: f64,
    },
    BonusOn,
    BonusOff,
    GameStarted,
    GameOver {
        #[serde(rename = "restartRequested")]
        restart_requested: bool,
    },
    GhostStateChanged {
        ghost: usize,
        state: GhostState,
    },
    PlaySound {
        sound: SoundEffect,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct CharacterView {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "xSpeed")]
    pub x_speed: f64,
    #[serde(rename = "ySpeed")]
    pub y_speed: f64,
    pub dir: Direction,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub id: usize,
    #[serde(flatten)]
    pub motion: CharacterView,
    pub state: GhostState,
}

#[derive(Clone, Debug, Serialize)]
pub struct BonusView {
    pub x: f64,
    pub y: f64,
    pub points: u64,
    pub visible: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    #[serde(rename = "runState")]
    pub run_state: RunState,
    #[serde(rename = "tickActive")]
    pub tick_active: bool,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub player: CharacterView,
    pub ghosts: Vec<GhostView>,
    pub bonus: BonusView,
    #[serde(rename = "remainingElements")]
    pub remaining_elements: usize,
    #[serde(rename = "totalElements")]
    pub total_elements: usize,
    #[serde(rename = "gameOver")]
    pub game_over: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub ticks: u64,
    #[serde(rename = "gameOver")]
    pub game_over: bool,
    pub cheater: bool,
    pub difficulty: Difficulty,
}
