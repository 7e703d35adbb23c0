use super::*;

use crate::character::Character;
use crate::constants::HIT_BOX;
use crate::types::ElementKind;

/// Axis-aligned overlap of two character hit boxes.
pub fn hit_boxes_overlap(a: &Character, b: &Character) -> bool {
    (a.x() - b.x()).abs() < HIT_BOX && (a.y() - b.y()).abs() < HIT_BOX
}

impl GameEngine {
    pub(super) fn resolve_collisions(&mut self) {
        self.resolve_element_collision();
        self.resolve_bonus_collision();
        if self.maze.is_clear() {
            self.next_level();
            return;
        }
        self.resolve_ghost_collisions();
    }

    pub(super) fn resolve_element_collision(&mut self) {
        let cell = self.player.character.cell();
        let Some(kind) = self.maze.mark_eaten(cell.row, cell.col) else {
            return;
        };
        let (x, y) = Maze::cell_center(cell);
        self.win_points(kind, element_points(kind), x, y);
    }

    pub(super) fn resolve_bonus_collision(&mut self) {
        if !self.bonus.is_visible() || self.player.character.cell() != self.bonus.cell() {
            return;
        }
        self.bonus.hide();
        self.scheduler.cancel(TimerAction::HideBonus);
        let (x, y) = self.bonus.position();
        let points = self.bonus.points();
        self.win_points(ElementKind::Bonus, points, x, y);
    }

    pub(super) fn resolve_ghost_collisions(&mut self) {
        for idx in 0..self.ghosts.len() {
            if !hit_boxes_overlap(&self.player.character, &self.ghosts[idx].character) {
                continue;
            }
            match self.ghosts[idx].state() {
                GhostState::Hunter => {
                    self.kill_player();
                    return;
                }
                GhostState::Prey => self.ghost_death(idx),
                GhostState::Eaten => {}
            }
        }
    }
}
