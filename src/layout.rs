use crate::constants::GHOST_COUNT;
use crate::error::MazeError;
use crate::maze::{Cell, Maze};
use crate::types::{CellPos, ElementKind};

pub const DEFAULT_LAYOUT: [&str; 21] = [
    "###################",
    "#o.......#.......o#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.### # ###.####",
    "####.#   B   #.####",
    "####.# ##G## #.####",
    "#......#GGG#......#",
    "####.# ##### #.####",
    "####.#       #.####",
    "####.# ##### #.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#o.#.....P.....#.o#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];

/// A populated maze together with the spawn points read from its tiles.
#[derive(Clone, Debug)]
pub struct MazeLayout {
    pub maze: Maze,
    pub player_spawn: CellPos,
    pub ghost_spawns: Vec<CellPos>,
    pub bonus_spawn: CellPos,
}

/// The built-in maze. Parsing `DEFAULT_LAYOUT` is checked by the unit tests,
/// so callers may treat an error here as a broken build.
pub fn default_layout() -> Result<MazeLayout, MazeError> {
    parse_layout(&DEFAULT_LAYOUT)
}

/// Builds a layout from tile rows.
///
/// `#` wall, `.` pill, `o` energizer, space empty corridor, `P` player spawn,
/// `G` ghost spawn (exactly four), `B` bonus spawn.
pub fn parse_layout<S: AsRef<str>>(rows: &[S]) -> Result<MazeLayout, MazeError> {
    let Some(first) = rows.first() else {
        return Err(MazeError::EmptyLayout);
    };
    let cols = first.as_ref().chars().count();
    if cols == 0 {
        return Err(MazeError::EmptyLayout);
    }

    let mut cells = Vec::with_capacity(rows.len() * cols);
    let mut player_spawn = None;
    let mut bonus_spawn = None;
    let mut ghost_spawns = Vec::new();

    for (row, line) in rows.iter().enumerate() {
        let line = line.as_ref();
        let found = line.chars().count();
        if found != cols {
            return Err(MazeError::RaggedRow {
                row,
                found,
                expected: cols,
            });
        }
        for (col, tile) in line.chars().enumerate() {
            let pos = CellPos::new(row as i32, col as i32);
            let cell = match tile {
                '#' => Cell::wall(),
                '.' => Cell::corridor(Some(ElementKind::Pill)),
                'o' => Cell::corridor(Some(ElementKind::Energizer)),
                ' ' => Cell::corridor(None),
                'P' => {
                    player_spawn = Some(pos);
                    Cell::corridor(None)
                }
                'G' => {
                    ghost_spawns.push(pos);
                    Cell::corridor(None)
                }
                'B' => {
                    bonus_spawn = Some(pos);
                    Cell::corridor(None)
                }
                _ => return Err(MazeError::UnknownTile { tile, row, col }),
            };
            cells.push(cell);
        }
    }

    let player_spawn = player_spawn.ok_or(MazeError::MissingSpawn("player"))?;
    let bonus_spawn = bonus_spawn.ok_or(MazeError::MissingSpawn("bonus"))?;
    if ghost_spawns.len() != GHOST_COUNT {
        return Err(MazeError::GhostSpawnCount {
            expected: GHOST_COUNT,
            found: ghost_spawns.len(),
        });
    }

    Ok(MazeLayout {
        maze: Maze::new(rows.len(), cols, cells)?,
        player_spawn,
        ghost_spawns,
        bonus_spawn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_fully_connected() {
        let layout = default_layout().expect("default layout parses");
        let reachable = layout.maze.reachable_from(layout.player_spawn);
        for (pos, _) in layout.maze.element_cells() {
            assert!(reachable.contains(&pos), "element at {pos:?} is unreachable");
        }
        for spawn in &layout.ghost_spawns {
            assert!(reachable.contains(spawn), "ghost spawn {spawn:?} is unreachable");
        }
        assert!(reachable.contains(&layout.bonus_spawn));
    }

    #[test]
    fn default_layout_counts_elements() {
        let layout = default_layout().expect("default layout parses");
        assert!(layout.maze.total_elements() > 100);
        assert_eq!(
            layout
                .maze
                .element_cells()
                .filter(|(_, kind)| *kind == ElementKind::Energizer)
                .count(),
            4
        );
        assert_eq!(layout.ghost_spawns.len(), GHOST_COUNT);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_layout(&["####", "#P#"]).expect_err("ragged");
        assert_eq!(
            err,
            MazeError::RaggedRow {
                row: 1,
                found: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn unknown_tiles_and_missing_spawns_are_rejected() {
        assert_eq!(
            parse_layout(&["#x#"]).expect_err("unknown"),
            MazeError::UnknownTile {
                tile: 'x',
                row: 0,
                col: 1
            }
        );
        assert_eq!(
            parse_layout(&["#.B#"]).expect_err("no player"),
            MazeError::MissingSpawn("player")
        );
        assert_eq!(
            parse_layout(&["#PBGG#"]).expect_err("two ghosts"),
            MazeError::GhostSpawnCount {
                expected: GHOST_COUNT,
                found: 2
            }
        );
        let empty: [&str; 0] = [];
        assert_eq!(parse_layout(&empty).expect_err("empty"), MazeError::EmptyLayout);
    }
}
