use std::collections::{HashSet, VecDeque};

use crate::constants::CELL_SIZE;
use crate::error::MazeError;
use crate::types::{CellPos, Direction, ElementKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    Corridor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    kind: CellKind,
    item: Option<ElementKind>,
    eaten: bool,
}

impl Cell {
    pub fn wall() -> Self {
        Self {
            kind: CellKind::Wall,
            item: None,
            eaten: false,
        }
    }

    pub fn corridor(item: Option<ElementKind>) -> Self {
        Self {
            kind: CellKind::Corridor,
            item,
            eaten: false,
        }
    }

    pub fn is_walkable(&self) -> bool {
        self.kind == CellKind::Corridor
    }

    /// The live element on this cell; `None` once it has been eaten.
    pub fn element(&self) -> Option<ElementKind> {
        if self.eaten {
            None
        } else {
            self.item
        }
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten
    }
}

#[derive(Clone, Debug)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    total_elements: usize,
    remaining_elements: usize,
}

impl Maze {
    pub fn new(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::EmptyLayout);
        }
        if cells.len() != rows * cols {
            return Err(MazeError::RaggedRow {
                row: cells.len() / cols,
                found: cells.len() % cols,
                expected: cols,
            });
        }
        let total_elements = cells.iter().filter(|cell| cell.item.is_some()).count();
        Ok(Self {
            rows,
            cols,
            cells,
            total_elements,
            remaining_elements: total_elements,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    pub fn remaining_elements(&self) -> usize {
        self.remaining_elements
    }

    pub fn is_clear(&self) -> bool {
        self.remaining_elements == 0
    }

    pub fn row_from_y(y: f64) -> i32 {
        (y / CELL_SIZE).floor() as i32
    }

    pub fn col_from_x(x: f64) -> i32 {
        (x / CELL_SIZE).floor() as i32
    }

    pub fn cell_center(pos: CellPos) -> (f64, f64) {
        (
            CELL_SIZE * (pos.col as f64 + 0.5),
            CELL_SIZE * (pos.row as f64 + 0.5),
        )
    }

    fn index_of(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell, MazeError> {
        self.index_of(row, col)
            .map(|idx| &self.cells[idx])
            .ok_or(MazeError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
    }

    pub fn is_walkable(&self, pos: CellPos) -> bool {
        self.cell_at(pos.row, pos.col)
            .map(Cell::is_walkable)
            .unwrap_or(false)
    }

    pub fn element_at(&self, pos: CellPos) -> Option<ElementKind> {
        self.cell_at(pos.row, pos.col)
            .ok()
            .and_then(Cell::element)
    }

    /// Consumes the live element at (row, col). No-op when there is nothing to eat.
    pub fn mark_eaten(&mut self, row: i32, col: i32) -> Option<ElementKind> {
        let idx = self.index_of(row, col)?;
        let element = self.cells[idx].element()?;
        self.cells[idx].eaten = true;
        self.remaining_elements = self.remaining_elements.saturating_sub(1);
        Some(element)
    }

    pub fn reset_elements(&mut self) {
        for cell in &mut self.cells {
            cell.eaten = false;
        }
        self.remaining_elements = self.total_elements;
    }

    pub fn open_directions(&self, pos: CellPos) -> Vec<Direction> {
        Direction::CARDINALS
            .into_iter()
            .filter(|dir| self.is_walkable(pos.step(*dir)))
            .collect()
    }

    pub fn has_line_of_sight(&self, from: CellPos, to: CellPos) -> bool {
        if from.row != to.row && from.col != to.col {
            return false;
        }
        let dir = from.direction_toward(to);
        let mut cursor = from;
        while cursor != to {
            if !self.is_walkable(cursor) {
                return false;
            }
            cursor = cursor.step(dir);
        }
        self.is_walkable(to)
    }

    /// First step of a shortest corridor path from `from` to `to`.
    pub fn next_step_toward(&self, from: CellPos, to: CellPos) -> Option<Direction> {
        if from == to || !self.is_walkable(to) {
            return None;
        }
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        for dir in Direction::CARDINALS {
            let next = from.step(dir);
            if self.is_walkable(next) && visited.insert(next) {
                if next == to {
                    return Some(dir);
                }
                queue.push_back((next, dir));
            }
        }

        while let Some((pos, first)) = queue.pop_front() {
            for dir in Direction::CARDINALS {
                let next = pos.step(dir);
                if !self.is_walkable(next) || !visited.insert(next) {
                    continue;
                }
                if next == to {
                    return Some(first);
                }
                queue.push_back((next, first));
            }
        }
        None
    }

    pub fn reachable_from(&self, start: CellPos) -> HashSet<CellPos> {
        let mut out = HashSet::new();
        if !self.is_walkable(start) {
            return out;
        }
        let mut queue = VecDeque::new();
        out.insert(start);
        queue.push_back(start);
        while let Some(pos) = queue.pop_front() {
            for dir in Direction::CARDINALS {
                let next = pos.step(dir);
                if self.is_walkable(next) && out.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        out
    }

    pub fn element_cells(&self) -> impl Iterator<Item = (CellPos, ElementKind)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.element().map(|element| {
                (
                    CellPos::new((idx / self.cols) as i32, (idx % self.cols) as i32),
                    element,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::parse_layout;

    fn corridor_maze() -> Maze {
        parse_layout(&[
            "#########",
            "#P.o..B.#",
            "#.#####.#",
            "#.......#",
            "#########",
            "#G#G#G#G#",
            "#########",
        ])
        .expect("layout parses")
        .maze
    }

    #[test]
    fn cell_at_rejects_out_of_range() {
        let maze = corridor_maze();
        assert!(maze.cell_at(0, 0).is_ok());
        assert_eq!(
            maze.cell_at(-1, 0),
            Err(MazeError::OutOfRange {
                row: -1,
                col: 0,
                rows: 7,
                cols: 9,
            })
        );
        assert!(maze.cell_at(7, 0).is_err());
        assert!(maze.cell_at(0, 9).is_err());
    }

    #[test]
    fn coordinates_convert_by_cell_size() {
        assert_eq!(Maze::row_from_y(0.0), 0);
        assert_eq!(Maze::row_from_y(CELL_SIZE - 0.01), 0);
        assert_eq!(Maze::row_from_y(CELL_SIZE), 1);
        assert_eq!(Maze::col_from_x(CELL_SIZE * 3.5), 3);
        assert_eq!(Maze::cell_center(CellPos::new(1, 2)), (50.0, 30.0));
    }

    #[test]
    fn mark_eaten_decrements_once_and_ignores_empty_cells() {
        let mut maze = corridor_maze();
        let total = maze.total_elements();
        assert_eq!(maze.remaining_elements(), total);

        assert_eq!(maze.mark_eaten(1, 2), Some(ElementKind::Pill));
        assert_eq!(maze.remaining_elements(), total - 1);
        assert!(maze.cell_at(1, 2).expect("in range").is_eaten());
        assert_eq!(maze.cell_at(1, 2).expect("in range").element(), None);

        assert_eq!(maze.mark_eaten(1, 2), None);
        assert_eq!(maze.mark_eaten(0, 0), None);
        assert_eq!(maze.mark_eaten(1, 1), None);
        assert_eq!(maze.mark_eaten(40, 40), None);
        assert_eq!(maze.remaining_elements(), total - 1);
    }

    #[test]
    fn reset_elements_restores_every_item() {
        let mut maze = corridor_maze();
        assert_eq!(maze.mark_eaten(1, 3), Some(ElementKind::Energizer));
        assert_eq!(maze.mark_eaten(3, 4), Some(ElementKind::Pill));
        maze.reset_elements();
        assert_eq!(maze.remaining_elements(), maze.total_elements());
        assert_eq!(maze.element_at(CellPos::new(1, 3)), Some(ElementKind::Energizer));
        assert_eq!(maze.element_at(CellPos::new(3, 4)), Some(ElementKind::Pill));
    }

    #[test]
    fn line_of_sight_requires_shared_axis_and_open_cells() {
        let maze = corridor_maze();
        assert!(maze.has_line_of_sight(CellPos::new(1, 1), CellPos::new(1, 7)));
        assert!(maze.has_line_of_sight(CellPos::new(3, 7), CellPos::new(1, 7)));
        assert!(!maze.has_line_of_sight(CellPos::new(1, 1), CellPos::new(3, 7)));
        assert!(!maze.has_line_of_sight(CellPos::new(1, 3), CellPos::new(3, 3)));
    }

    #[test]
    fn next_step_follows_shortest_corridor() {
        let maze = corridor_maze();
        assert_eq!(
            maze.next_step_toward(CellPos::new(1, 2), CellPos::new(3, 2)),
            Some(Direction::Left)
        );
        assert_eq!(
            maze.next_step_toward(CellPos::new(1, 6), CellPos::new(3, 6)),
            Some(Direction::Right)
        );
        assert_eq!(maze.next_step_toward(CellPos::new(1, 1), CellPos::new(1, 1)), None);
        assert_eq!(maze.next_step_toward(CellPos::new(1, 1), CellPos::new(5, 1)), None);
    }
}
