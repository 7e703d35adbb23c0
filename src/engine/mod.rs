use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::bonus::Bonus;
use crate::config::SessionConfig;
use crate::error::MazeError;
use crate::events::{EventBus, GameListener};
use crate::ghost::Ghost;
use crate::layout::{default_layout, MazeLayout};
use crate::maze::Maze;
use crate::player::Player;
use crate::types::{
    Command, Direction, GameEvent, GameSummary, GhostState, RunState, Snapshot, SoundEffect,
};

mod collision;
mod lifecycle;
mod scheduler;
mod scoring;

pub use self::collision::hit_boxes_overlap;
pub use self::scheduler::{Scheduler, TimerAction};
pub use self::scoring::{element_points, lives_awarded};

/// Timer lengths in ticks, scaled by the current duration ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timings {
    pub duration_ratio: f64,
    pub bonus_ticks: u64,
    pub prey_ticks: u64,
    pub death_ticks: u64,
}

impl Timings {
    pub fn new(config: &SessionConfig, duration_ratio: f64) -> Self {
        let scaled = |ms: u64| config.ticks_for((ms as f64 * duration_ratio) as u64);
        Self {
            duration_ratio,
            bonus_ticks: scaled(config.bonus_duration_ms),
            prey_ticks: scaled(config.prey_duration_ms),
            death_ticks: config.ticks_for(config.death_delay_ms),
        }
    }
}

#[derive(Debug)]
pub struct GameEngine {
    pub config: SessionConfig,

    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    bonus: Bonus,
    rng: StdRng,
    scheduler: Scheduler,
    events: EventBus,
    timings: Timings,

    run_state: RunState,
    tick_active: bool,
    game_over: bool,
    cheater: bool,
    sounds_enabled: bool,

    lives: u32,
    score: u64,
    level: u32,
    eaten_ghosts: u32,
    clock: u64,
}

impl GameEngine {
    pub fn new(layout: MazeLayout, config: SessionConfig) -> Self {
        let speed = config.tier_speed();
        let ghosts = layout
            .ghost_spawns
            .iter()
            .enumerate()
            .map(|(id, spawn)| Ghost::new(id, *spawn, speed))
            .collect();
        let timings = Timings::new(&config, config.duration_ratio());

        info!(
            difficulty = ?config.difficulty,
            elements = layout.maze.total_elements(),
            "session created"
        );
        Self {
            maze: layout.maze,
            player: Player::new(layout.player_spawn, speed),
            ghosts,
            bonus: Bonus::new(layout.bonus_spawn, 1),
            rng: StdRng::seed_from_u64(config.seed),
            scheduler: Scheduler::default(),
            events: EventBus::default(),
            timings,
            run_state: RunState::Running,
            tick_active: false,
            game_over: false,
            cheater: false,
            sounds_enabled: config.sounds_enabled,
            lives: config.starting_lives,
            score: 0,
            level: 1,
            eaten_ghosts: 0,
            clock: 0,
            config,
        }
    }

    pub fn with_default_layout(config: SessionConfig) -> Result<Self, MazeError> {
        Ok(Self::new(default_layout()?, config))
    }

    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) {
        self.events.subscribe(listener);
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_paused(&self) -> bool {
        self.run_state != RunState::Running
    }

    pub fn is_tick_active(&self) -> bool {
        self.tick_active
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_cheater(&self) -> bool {
        self.cheater
    }

    pub fn eaten_ghosts(&self) -> u32 {
        self.eaten_ghosts
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn bonus(&self) -> &Bonus {
        &self.bonus
    }

    pub fn sounds_enabled(&self) -> bool {
        self.sounds_enabled
    }

    pub fn set_sounds_enabled(&mut self, enabled: bool) {
        self.sounds_enabled = enabled;
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Advances the session clock by one fixed tick.
    ///
    /// Gameplay only moves while the main tick is active and the session is
    /// running; scheduled timers fire regardless of pause state.
    pub fn step(&mut self) {
        if self.game_over {
            return;
        }
        self.clock += 1;
        if self.tick_active && self.run_state == RunState::Running {
            self.update();
        }
        self.run_timers();
    }

    pub fn handle_command(&mut self, command: Command) {
        if self.game_over {
            return;
        }
        match command {
            Command::Move { dir } => self.key_move(dir),
            Command::TogglePause => self.switch_pause(),
            Command::DebugExtraLife => {
                if self.run_state == RunState::PausedLocked {
                    return;
                }
                self.cheater = true;
                self.lives += 1;
                self.emit(GameEvent::LivesChanged { lives: self.lives });
            }
            Command::DebugNextLevel => {
                if self.run_state == RunState::PausedLocked {
                    return;
                }
                self.cheater = true;
                self.next_level();
            }
        }
    }

    fn key_move(&mut self, dir: Direction) {
        if dir == Direction::None || self.run_state == RunState::PausedLocked {
            return;
        }
        if !self.tick_active {
            match self.run_state {
                RunState::PausedUnlocked => self.switch_pause(),
                RunState::Running => {
                    self.tick_active = true;
                    self.emit(GameEvent::GameStarted);
                }
                RunState::PausedLocked => {}
            }
        }
        if self.run_state == RunState::Running {
            self.player.ask(dir);
        }
    }

    pub fn pause(&mut self, locked: bool) {
        if self.run_state != RunState::Running {
            return;
        }
        self.tick_active = false;
        self.run_state = if locked {
            RunState::PausedLocked
        } else {
            RunState::PausedUnlocked
        };
        debug!(locked, "paused");
        self.emit(GameEvent::PauseChanged {
            paused: true,
            user_initiated: false,
        });
    }

    /// Lifts a player pause. A locked pause only ends through its own timer.
    pub fn resume(&mut self) {
        if self.run_state == RunState::PausedUnlocked {
            self.start();
        }
    }

    pub fn switch_pause(&mut self) {
        match self.run_state {
            RunState::Running => {
                self.pause(false);
                self.emit(GameEvent::PauseChanged {
                    paused: true,
                    user_initiated: true,
                });
            }
            RunState::PausedUnlocked => {
                self.start();
                self.emit(GameEvent::PauseChanged {
                    paused: false,
                    user_initiated: true,
                });
            }
            RunState::PausedLocked => {}
        }
    }

    fn start(&mut self) {
        self.tick_active = true;
        self.run_state = RunState::Running;
        debug!("running");
        self.emit(GameEvent::PauseChanged {
            paused: false,
            user_initiated: false,
        });
    }

    fn update(&mut self) {
        let (substeps, dt) = self.config.motion_substeps();
        for _ in 0..substeps {
            if !self.tick_active || self.run_state != RunState::Running {
                break;
            }
            self.move_characters(dt);
        }
    }

    fn move_characters(&mut self, dt: f64) {
        let player_cell = self.player.character.cell();

        for idx in 0..self.ghosts.len() {
            let ghost = &mut self.ghosts[idx];
            let target = (ghost.state() == GhostState::Hunter
                && ghost.is_in_line_of_sight(&self.maze, player_cell))
            .then_some(player_cell);
            if ghost.update_move(&self.maze, target, &mut self.rng, dt) {
                debug!(ghost = idx, "ghost back home");
                self.emit(GameEvent::GhostStateChanged {
                    ghost: idx,
                    state: GhostState::Hunter,
                });
            }
        }

        self.player.update_move(&self.maze, dt);
        self.resolve_collisions();
    }

    fn run_timers(&mut self) {
        for action in self.scheduler.take_due(self.clock) {
            debug!(?action, clock = self.clock, "timer fired");
            match action {
                TimerAction::HideBonus => self.hide_bonus(),
                TimerAction::EndPreyState => self.end_prey_state(),
                TimerAction::ResumeAfterDeath => self.resume_after_death(),
            }
            if self.game_over {
                break;
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.emit(event);
    }

    fn play(&mut self, sound: SoundEffect) {
        if self.sounds_enabled {
            self.emit(GameEvent::PlaySound { sound });
        }
    }

    pub fn build_snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.clock,
            run_state: self.run_state,
            tick_active: self.tick_active,
            score: self.score,
            lives: self.lives,
            level: self.level,
            player: self.player.character.view(),
            ghosts: self.ghosts.iter().map(Ghost::view).collect(),
            bonus: self.bonus.view(),
            remaining_elements: self.maze.remaining_elements(),
            total_elements: self.maze.total_elements(),
            game_over: self.game_over,
        }
    }

    pub fn build_summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            level: self.level,
            lives: self.lives,
            ticks: self.clock,
            game_over: self.game_over,
            cheater: self.cheater,
            difficulty: self.config.difficulty,
        }
    }
}

#[cfg(test)]
fn test_engine() -> GameEngine {
    let layout = crate::layout::parse_layout(&[
        "##########",
        "#P..o....#",
        "#.######.#",
        "#...B....#",
        "##########",
        "#G#G#G#G##",
        "##########",
    ])
    .expect("layout parses");
    GameEngine::new(layout, SessionConfig::default())
}
