use super::*;

use crate::constants::{ENERGIZER_POINTS, PILL_POINTS};
use crate::types::ElementKind;

pub fn element_points(kind: ElementKind) -> u64 {
    match kind {
        ElementKind::Pill => PILL_POINTS,
        ElementKind::Energizer => ENERGIZER_POINTS,
        ElementKind::Bonus | ElementKind::Ghost => 0,
    }
}

/// Extra lives earned by a gain of `won` that brought the score to `score`:
/// one per threshold multiple crossed.
pub fn lives_awarded(score: u64, won: u64, threshold: u64) -> u32 {
    if threshold == 0 {
        return 0;
    }
    let before = score.saturating_sub(won) / threshold;
    u32::try_from(score / threshold - before).unwrap_or(u32::MAX)
}

impl GameEngine {
    pub(super) fn ghost_death(&mut self, idx: usize) {
        self.eaten_ghosts += 1;
        self.ghosts[idx].set_state(GhostState::Eaten);
        self.emit(GameEvent::GhostStateChanged {
            ghost: idx,
            state: GhostState::Eaten,
        });
        let ghost = &self.ghosts[idx];
        let (x, y) = (ghost.character.x(), ghost.character.y());
        let points = ghost.points();
        self.win_points(ElementKind::Ghost, points, x, y);
    }

    /// Credits `points` for something eaten at (`x`, `y`) and applies its side
    /// effects.
    pub(super) fn win_points(&mut self, kind: ElementKind, points: u64, x: f64, y: f64) {
        let won = match kind {
            ElementKind::Ghost => {
                let won = points * u64::from(self.eaten_ghosts);
                self.play(SoundEffect::GhostEaten);
                self.emit(GameEvent::PointsToDisplay { points: won, x, y });
                won
            }
            _ => points,
        };
        self.score += won;

        let gained = lives_awarded(self.score, won, self.config.life_threshold);
        if gained > 0 {
            self.play(SoundEffect::LifeGained);
            self.lives += gained;
            info!(lives = self.lives, score = self.score, "extra life");
            self.emit(GameEvent::LivesChanged { lives: self.lives });
        }

        match kind {
            ElementKind::Energizer => {
                self.scheduler
                    .start(TimerAction::EndPreyState, self.clock, self.timings.prey_ticks);
                self.play(SoundEffect::EnergizerEaten);
                for idx in 0..self.ghosts.len() {
                    let state = self.ghosts[idx].state();
                    if state == GhostState::Eaten {
                        continue;
                    }
                    self.ghosts[idx].set_state(GhostState::Prey);
                    if state != GhostState::Prey {
                        self.emit(GameEvent::GhostStateChanged {
                            ghost: idx,
                            state: GhostState::Prey,
                        });
                    }
                }
                self.eaten_ghosts = 0;
                debug!(prey_ticks = self.timings.prey_ticks, "ghosts frightened");
                self.emit(GameEvent::ElementEaten { x, y });
            }
            ElementKind::Pill => {
                self.play(SoundEffect::PillEaten);
                self.emit(GameEvent::ElementEaten { x, y });
            }
            ElementKind::Bonus => {
                self.play(SoundEffect::BonusEaten);
                self.emit(GameEvent::PointsToDisplay { points: won, x, y });
                self.emit(GameEvent::BonusOff);
            }
            ElementKind::Ghost => {}
        }

        if matches!(kind, ElementKind::Pill | ElementKind::Energizer) && self.bonus_due() {
            self.bonus.show();
            self.scheduler
                .start(TimerAction::HideBonus, self.clock, self.timings.bonus_ticks);
            debug!(remaining = self.maze.remaining_elements(), "bonus on");
            self.emit(GameEvent::BonusOn);
        }

        self.emit(GameEvent::ScoreChanged { score: self.score });
    }

    fn bonus_due(&self) -> bool {
        let total = self.maze.total_elements();
        let remaining = self.maze.remaining_elements();
        remaining == total / 3 || remaining == total * 2 / 3
    }
}
