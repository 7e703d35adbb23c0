use super::*;

use crate::constants::{get_bonus_points, MEDIUM_SPEED};

impl GameEngine {
    pub(super) fn kill_player(&mut self) {
        self.play(SoundEffect::GameOver);
        self.lives = self.lives.saturating_sub(1);
        self.player.character.stop();
        info!(lives = self.lives, level = self.level, "player caught");
        self.pause(true);
        self.scheduler
            .start(TimerAction::ResumeAfterDeath, self.clock, self.timings.death_ticks);
    }

    pub(super) fn resume_after_death(&mut self) {
        self.emit(GameEvent::LivesChanged { lives: self.lives });
        self.start();
        self.bonus.hide();
        self.scheduler.cancel(TimerAction::HideBonus);
        self.emit(GameEvent::BonusOff);

        if self.lives == 0 {
            self.game_over = true;
            self.tick_active = false;
            self.scheduler = Scheduler::default();
            info!(score = self.score, level = self.level, "game over");
            self.emit(GameEvent::GameOver {
                restart_requested: true,
            });
        } else {
            self.emit(GameEvent::LevelStarted { new_level: false });
            self.init_characters_position();
        }
    }

    /// Puts everyone back on their spawn cell and waits for the next move.
    pub fn init_characters_position(&mut self) {
        self.tick_active = false;
        self.run_state = RunState::Running;
        self.scheduler.cancel(TimerAction::EndPreyState);
        for idx in 0..self.ghosts.len() {
            let previous = self.ghosts[idx].state();
            self.ghosts[idx].init_coordinate();
            self.ghosts[idx].set_state(GhostState::Hunter);
            if previous != GhostState::Hunter {
                self.emit(GameEvent::GhostStateChanged {
                    ghost: idx,
                    state: GhostState::Hunter,
                });
            }
        }
        self.player.init();
    }

    pub fn next_level(&mut self) {
        self.play(SoundEffect::LevelUp);
        self.level += 1;
        info!(level = self.level, score = self.score, "level cleared");
        let was_paused = self.run_state == RunState::PausedUnlocked;
        self.maze.reset_elements();
        self.bonus.set_points(get_bonus_points(self.level));
        self.hide_bonus();
        self.init_characters_position();

        for ghost in &mut self.ghosts {
            ghost.character.increase_speed();
            ghost.apply_state_speed();
        }
        let player = &mut self.player.character;
        player.increase_speed();
        player.set_speed(player.normal_speed());
        self.set_timers_duration();

        if was_paused {
            self.emit(GameEvent::PauseChanged {
                paused: false,
                user_initiated: true,
            });
        }
        self.announce_level();
    }

    /// Jumps straight to `level`, as if every earlier level had been cleared.
    pub fn set_level(&mut self, level: u32) {
        let level = level.max(1);
        self.cheater = true;
        self.level = level;
        info!(level, "level set");
        self.maze.reset_elements();
        self.bonus.set_points(get_bonus_points(level));
        self.hide_bonus();
        self.init_characters_position();

        for ghost in &mut self.ghosts {
            ghost.character.init_speed(level - 1);
            ghost.apply_state_speed();
        }
        self.player.character.init_speed(level - 1);
        self.set_timers_duration();

        self.emit(GameEvent::PauseChanged {
            paused: false,
            user_initiated: true,
        });
        self.announce_level();
    }

    fn announce_level(&mut self) {
        self.emit(GameEvent::ScoreChanged { score: self.score });
        self.emit(GameEvent::LivesChanged { lives: self.lives });
        self.emit(GameEvent::LevelChanged { level: self.level });
        self.emit(GameEvent::LevelStarted { new_level: true });
    }

    pub(super) fn set_timers_duration(&mut self) {
        let ratio = self
            .ghosts
            .first()
            .map(|ghost| MEDIUM_SPEED / ghost.character.normal_speed())
            .unwrap_or_else(|| self.config.duration_ratio());
        self.timings = Timings::new(&self.config, ratio);
        debug!(
            ratio,
            prey_ticks = self.timings.prey_ticks,
            bonus_ticks = self.timings.bonus_ticks,
            "timers rescaled"
        );
    }

    pub(super) fn end_prey_state(&mut self) {
        debug!("prey window over");
        for idx in 0..self.ghosts.len() {
            if self.ghosts[idx].state() != GhostState::Prey {
                continue;
            }
            self.ghosts[idx].set_state(GhostState::Hunter);
            self.emit(GameEvent::GhostStateChanged {
                ghost: idx,
                state: GhostState::Hunter,
            });
        }
    }

    pub(super) fn hide_bonus(&mut self) {
        self.scheduler.cancel(TimerAction::HideBonus);
        if self.bonus.hide() {
            self.emit(GameEvent::BonusOff);
        }
    }
}
