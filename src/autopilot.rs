use std::collections::{HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::GameEngine;
use crate::types::{CellPos, Direction, GhostState};

/// Scripted player used by the simulator: walks toward the closest thing worth
/// eating and backs away from hunters.
#[derive(Debug)]
pub struct Autopilot {
    rng: StdRng,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn choose(&mut self, engine: &GameEngine) -> Direction {
        let maze = engine.maze();
        let cell = engine.player().character.cell();
        let hunters = hunter_cells(engine);
        let toward =
            nearest_target(engine, cell).and_then(|target| maze.next_step_toward(cell, target));

        let mut best = Direction::None;
        let mut best_score = f64::NEG_INFINITY;
        for dir in Direction::CARDINALS {
            let next = cell.step(dir);
            if !maze.is_walkable(next) {
                continue;
            }
            let ghost_dist = distance_to_nearest(&hunters, next).unwrap_or(99);
            if ghost_dist <= 1 {
                continue;
            }

            let mut score = 0.0;
            if maze.element_at(next).is_some() {
                score += 14.0;
            }
            if toward == Some(dir) {
                score += 10.0;
            }
            score += ghost_dist.min(8) as f64 * 0.65;
            if ghost_dist <= 2 {
                score -= 7.0;
            }
            score += self.rng.random::<f64>() * 0.25;

            if score > best_score {
                best_score = score;
                best = dir;
            }
        }

        if best == Direction::None {
            self.escape(engine, cell, &hunters)
        } else {
            best
        }
    }

    fn escape(&mut self, engine: &GameEngine, cell: CellPos, hunters: &[CellPos]) -> Direction {
        let maze = engine.maze();
        let mut best = Direction::None;
        let mut best_dist = i32::MIN;
        for dir in Direction::CARDINALS {
            let next = cell.step(dir);
            if !maze.is_walkable(next) {
                continue;
            }
            let dist = distance_to_nearest(hunters, next).unwrap_or(99);
            if dist > best_dist {
                best_dist = dist;
                best = dir;
            }
        }
        if best == Direction::None {
            Direction::CARDINALS[self.rng.random_range(0..Direction::CARDINALS.len())]
        } else {
            best
        }
    }
}

fn hunter_cells(engine: &GameEngine) -> Vec<CellPos> {
    engine
        .ghosts()
        .iter()
        .filter(|ghost| ghost.state() == GhostState::Hunter)
        .map(|ghost| ghost.character.cell())
        .collect()
}

fn distance_to_nearest(cells: &[CellPos], from: CellPos) -> Option<i32> {
    cells.iter().map(|cell| cell.manhattan(from)).min()
}

/// Closest live element, visible bonus or frightened ghost by corridor distance.
fn nearest_target(engine: &GameEngine, start: CellPos) -> Option<CellPos> {
    let maze = engine.maze();
    let bonus = engine.bonus();
    let prey: HashSet<CellPos> = engine
        .ghosts()
        .iter()
        .filter(|ghost| ghost.state() == GhostState::Prey)
        .map(|ghost| ghost.character.cell())
        .collect();

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        if pos != start
            && (maze.element_at(pos).is_some()
                || (bonus.is_visible() && bonus.cell() == pos)
                || prey.contains(&pos))
        {
            return Some(pos);
        }
        for dir in Direction::CARDINALS {
            let next = pos.step(dir);
            if maze.is_walkable(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::layout::parse_layout;

    fn engine(rows: &[&str]) -> GameEngine {
        GameEngine::new(parse_layout(rows).expect("layout parses"), SessionConfig::default())
    }

    #[test]
    fn heads_for_the_nearest_pill() {
        let engine = engine(&[
            "##########",
            "#   P  ..#",
            "#.########",
            "#   B    #",
            "##########",
            "#G#G#G#G##",
            "##########",
        ]);
        let mut pilot = Autopilot::new(1);
        for _ in 0..20 {
            assert_eq!(pilot.choose(&engine), Direction::Right);
        }
    }

    #[test]
    fn never_steps_next_to_a_hunter() {
        let engine = engine(&[
            "##########",
            "#..GP...G#",
            "#.######.#",
            "#G..B..G.#",
            "##########",
        ]);
        let mut pilot = Autopilot::new(5);
        for _ in 0..20 {
            assert_eq!(pilot.choose(&engine), Direction::Right);
        }
    }

    #[test]
    fn nearest_target_walks_around_walls() {
        let engine = engine(&[
            "##########",
            "#P#.     #",
            "# ###### #",
            "#  .B    #",
            "##########",
            "#G#G#G#G##",
            "##########",
        ]);
        assert_eq!(
            nearest_target(&engine, CellPos::new(1, 1)),
            Some(CellPos::new(3, 3))
        );
    }

    #[test]
    fn wanders_the_open_corridor_when_nothing_is_reachable() {
        let engine = engine(&[
            "##########",
            "#P   B   #",
            "##########",
            "#G#G#G#G.#",
            "##########",
        ]);
        assert_eq!(nearest_target(&engine, CellPos::new(1, 1)), None);
        let mut pilot = Autopilot::new(9);
        assert_eq!(pilot.choose(&engine), Direction::Right);
    }
}
