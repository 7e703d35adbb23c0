use rand::Rng;

use crate::character::Character;
use crate::constants::GHOST_BASE_POINTS;
use crate::maze::Maze;
use crate::types::{CellPos, Direction, GhostState, GhostView};

#[derive(Clone, Debug)]
pub struct Ghost {
    pub id: usize,
    pub character: Character,
    state: GhostState,
}

impl Ghost {
    pub fn new(id: usize, spawn: CellPos, base_speed: f64) -> Self {
        Self {
            id,
            character: Character::new(spawn, base_speed),
            state: GhostState::Hunter,
        }
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn points(&self) -> u64 {
        GHOST_BASE_POINTS
    }

    pub fn set_state(&mut self, state: GhostState) {
        self.state = state;
        self.apply_state_speed();
    }

    /// Re-derives the current speed from the normal speed and the state.
    pub fn apply_state_speed(&mut self) {
        let normal = self.character.normal_speed();
        let speed = match self.state {
            GhostState::Hunter => normal,
            GhostState::Prey => normal / 2.0,
            GhostState::Eaten => normal * 2.0,
        };
        self.character.set_speed(speed);
    }

    pub fn is_in_line_of_sight(&self, maze: &Maze, target: CellPos) -> bool {
        maze.has_line_of_sight(self.character.cell(), target)
    }

    pub fn init_coordinate(&mut self) {
        self.character.respawn();
    }

    /// Advances one tick. Returns true when an eaten ghost got back to its spawn
    /// cell and respawned as a hunter.
    pub fn update_move<R: Rng + ?Sized>(
        &mut self,
        maze: &Maze,
        target: Option<CellPos>,
        rng: &mut R,
        dt: f64,
    ) -> bool {
        let current = self.character.direction();
        let cell = self.character.cell();

        if current != Direction::None && !self.character.is_on_center(dt) {
            if let Some(target) = target {
                let toward = cell.direction_toward(target);
                if toward != Direction::None && toward == current.opposite() {
                    self.character.go(toward);
                }
            }
            self.character.advance(dt);
            return false;
        }

        self.character.move_on_center();
        if self.state == GhostState::Eaten && cell == self.character.spawn() {
            self.set_state(GhostState::Hunter);
            self.character.stop();
            return true;
        }

        let next = match self.state {
            GhostState::Eaten => maze
                .next_step_toward(cell, self.character.spawn())
                .unwrap_or_else(|| patrol_direction(maze, cell, current, rng)),
            _ => match target.map(|target| cell.direction_toward(target)) {
                Some(dir) if dir != Direction::None && maze.is_walkable(cell.step(dir)) => dir,
                _ => patrol_direction(maze, cell, current, rng),
            },
        };
        self.character.go(next);
        self.character.advance(dt);
        false
    }

    pub fn view(&self) -> GhostView {
        GhostView {
            id: self.id,
            motion: self.character.view(),
            state: self.state,
        }
    }
}

/// Random open direction, never reversing unless the ghost is in a dead end.
pub fn patrol_direction<R: Rng + ?Sized>(
    maze: &Maze,
    cell: CellPos,
    current: Direction,
    rng: &mut R,
) -> Direction {
    let options: Vec<Direction> = maze
        .open_directions(cell)
        .into_iter()
        .filter(|dir| current == Direction::None || *dir != current.opposite())
        .collect();
    if options.is_empty() {
        let back = current.opposite();
        if back != Direction::None && maze.is_walkable(cell.step(back)) {
            return back;
        }
        return Direction::None;
    }
    options[rng.random_range(0..options.len())]
}
