use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use maze_chase_engine::constants::TICK_RATE;
use maze_chase_engine::{
    default_layout, Autopilot, Command, Difficulty, Direction, GameEngine, GameEvent, GhostState,
    MazeLayout, SessionConfig, Snapshot,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    single: bool,
    #[arg(long)]
    difficulty: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_ticks: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct Scenario {
    name: String,
    difficulty: Difficulty,
    seed: u64,
    #[serde(rename = "maxTicks")]
    max_ticks: u64,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioResultLine {
    scenario: String,
    seed: u64,
    difficulty: Difficulty,
    ticks: u64,
    score: u64,
    level: u32,
    lives: u32,
    #[serde(rename = "gameOver")]
    game_over: bool,
    #[serde(rename = "elementsEaten")]
    elements_eaten: u32,
    #[serde(rename = "ghostsEaten")]
    ghosts_eaten: u32,
    #[serde(rename = "bonusShown")]
    bonus_shown: u32,
    #[serde(rename = "livesLost")]
    lives_lost: u32,
    #[serde(rename = "levelsCleared")]
    levels_cleared: u32,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    tick: u64,
    message: String,
}

#[derive(Clone, Debug)]
struct ScenarioRunResult {
    result: ScenarioResultLine,
    anomaly_records: Vec<AnomalyRecord>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "startedAt")]
    started_at: String,
    #[serde(rename = "finishedAt")]
    finished_at: String,
    #[serde(rename = "elapsedMs")]
    elapsed_ms: i64,
    #[serde(rename = "scenarioCount")]
    scenario_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "averageScore")]
    average_score: u64,
    #[serde(rename = "outcomeCounts")]
    outcome_counts: BTreeMap<String, usize>,
    scenarios: Vec<ScenarioResultLine>,
}

#[derive(Default)]
struct AnomalyLog {
    messages: Vec<String>,
    records: Vec<AnomalyRecord>,
    seen: HashSet<String>,
}

impl AnomalyLog {
    fn push(&mut self, tick: u64, message: String) {
        self.records.push(AnomalyRecord {
            tick,
            message: message.clone(),
        });
        if self.seen.insert(message.clone()) {
            self.messages.push(message);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let base_config = match cli.config.as_deref() {
        Some(path) => match SessionConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!(path = %path.display(), %err, "config load failed");
                std::process::exit(2);
            }
        },
        None => SessionConfig::default(),
    };

    let layout = match default_layout() {
        Ok(layout) => layout,
        Err(err) => {
            error!(%err, "maze layout invalid");
            std::process::exit(2);
        }
    };

    let scenarios = resolve_scenarios(&cli, &base_config);
    let started_at = Utc::now();
    let mut has_anomaly = false;
    let mut results = Vec::new();
    let mut outcome_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_anomalies = 0usize;

    for scenario in scenarios {
        info!(
            scenario = %scenario.name,
            seed = scenario.seed,
            difficulty = ?scenario.difficulty,
            max_ticks = scenario.max_ticks,
            "scenario started"
        );
        let run = run_scenario(&scenario, &layout, &base_config);

        for anomaly in &run.anomaly_records {
            warn!(
                scenario = %scenario.name,
                tick = anomaly.tick,
                message = %anomaly.message,
                "anomaly detected"
            );
        }
        if !run.result.anomalies.is_empty() {
            has_anomaly = true;
        }
        total_anomalies += run.anomaly_records.len();
        *outcome_counts
            .entry(outcome_key(&run.result).to_string())
            .or_insert(0) += 1;

        info!(
            scenario = %scenario.name,
            ticks = run.result.ticks,
            score = run.result.score,
            level = run.result.level,
            game_over = run.result.game_over,
            "scenario finished"
        );

        match serde_json::to_string(&run.result) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                error!(%err, "result serialization failed");
                std::process::exit(2);
            }
        }
        results.push(run.result);
    }

    let summary = build_run_summary(
        started_at,
        Utc::now(),
        results,
        outcome_counts,
        total_anomalies,
    );
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(err) = write_summary(path, &summary) {
            error!(path = %path.display(), %err, "summary write failed");
            std::process::exit(2);
        }
    }

    info!(
        scenarios = summary.scenario_count,
        anomalies = summary.anomaly_count,
        average_score = summary.average_score,
        "run finished"
    );

    if has_anomaly {
        std::process::exit(1);
    }
}

fn run_scenario(
    scenario: &Scenario,
    layout: &MazeLayout,
    base: &SessionConfig,
) -> ScenarioRunResult {
    let config = SessionConfig {
        difficulty: scenario.difficulty,
        seed: scenario.seed,
        ..base.clone()
    };
    let (_, dt) = config.motion_substeps();
    let mut engine = GameEngine::new(layout.clone(), config);
    let mut pilot = Autopilot::new(scenario.seed.wrapping_add(1));
    let mut anomalies = AnomalyLog::default();

    let mut elements_eaten = 0;
    let mut ghosts_eaten = 0;
    let mut bonus_shown = 0;
    let mut lives_lost = 0;
    let mut levels_cleared = 0;
    let mut previous = engine.build_snapshot();

    while !engine.is_game_over() && engine.clock() < scenario.max_ticks {
        let character = &engine.player().character;
        if !character.is_moving() || character.is_on_center(dt) {
            let dir = pilot.choose(&engine);
            if dir != Direction::None && engine.player().asked_direction() != Some(dir) {
                engine.handle_command(Command::Move { dir });
            }
        }
        engine.step();

        for event in engine.drain_events() {
            match event {
                GameEvent::ElementEaten { .. } => elements_eaten += 1,
                GameEvent::GhostStateChanged {
                    state: GhostState::Eaten,
                    ..
                } => ghosts_eaten += 1,
                GameEvent::BonusOn => bonus_shown += 1,
                GameEvent::LevelChanged { .. } => levels_cleared += 1,
                _ => {}
            }
        }

        let snapshot = engine.build_snapshot();
        if snapshot.lives < previous.lives {
            lives_lost += previous.lives - snapshot.lives;
        }
        for message in collect_snapshot_anomalies(&previous, &snapshot) {
            anomalies.push(snapshot.tick, message);
        }
        previous = snapshot;
    }

    let summary = engine.build_summary();
    ScenarioRunResult {
        result: ScenarioResultLine {
            scenario: scenario.name.clone(),
            seed: scenario.seed,
            difficulty: scenario.difficulty,
            ticks: summary.ticks,
            score: summary.score,
            level: summary.level,
            lives: summary.lives,
            game_over: summary.game_over,
            elements_eaten,
            ghosts_eaten,
            bonus_shown,
            lives_lost,
            levels_cleared,
            anomalies: anomalies.messages,
        },
        anomaly_records: anomalies.records,
    }
}

fn collect_snapshot_anomalies(previous: &Snapshot, snapshot: &Snapshot) -> Vec<String> {
    let mut anomalies = Vec::new();
    if snapshot.player.x_speed != 0.0 && snapshot.player.y_speed != 0.0 {
        anomalies.push(format!(
            "player moving diagonally: ({}, {})",
            snapshot.player.x_speed, snapshot.player.y_speed
        ));
    }
    for ghost in &snapshot.ghosts {
        if ghost.motion.x_speed != 0.0 && ghost.motion.y_speed != 0.0 {
            anomalies.push(format!("ghost {} moving diagonally", ghost.id));
        }
    }
    if snapshot.score < previous.score {
        anomalies.push(format!(
            "score decreased: {} -> {}",
            previous.score, snapshot.score
        ));
    }
    if snapshot.level < previous.level {
        anomalies.push(format!(
            "level decreased: {} -> {}",
            previous.level, snapshot.level
        ));
    }
    if snapshot.remaining_elements > snapshot.total_elements {
        anomalies.push(format!(
            "remaining elements out of range: {}/{}",
            snapshot.remaining_elements, snapshot.total_elements
        ));
    }
    if snapshot.game_over && snapshot.lives > 0 {
        anomalies.push(format!("game over with {} lives left", snapshot.lives));
    }
    anomalies
}

fn resolve_scenarios(cli: &Cli, base: &SessionConfig) -> Vec<Scenario> {
    let seed = cli.seed.unwrap_or_else(rand::random);
    let max_ticks = cli.max_ticks.unwrap_or(u64::from(TICK_RATE) * 60 * 3).max(1);
    let difficulty = cli
        .difficulty
        .as_deref()
        .and_then(Difficulty::parse)
        .unwrap_or(base.difficulty);

    if cli.single || cli.difficulty.is_some() {
        return vec![Scenario {
            name: format!("custom-{}", difficulty_key(difficulty)),
            difficulty,
            seed,
            max_ticks,
        }];
    }

    vec![
        Scenario {
            name: "quick-check-medium".to_string(),
            difficulty: Difficulty::Medium,
            seed,
            max_ticks,
        },
        Scenario {
            name: "balance-check-easy".to_string(),
            difficulty: Difficulty::Easy,
            seed: seed.wrapping_add(1),
            max_ticks,
        },
        Scenario {
            name: "balance-check-hard".to_string(),
            difficulty: Difficulty::Hard,
            seed: seed.wrapping_add(2),
            max_ticks,
        },
    ]
}

fn difficulty_key(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}

fn outcome_key(result: &ScenarioResultLine) -> &'static str {
    if result.game_over {
        "game_over"
    } else {
        "tick_limit"
    }
}

fn build_run_summary(
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    scenarios: Vec<ScenarioResultLine>,
    outcome_counts: BTreeMap<String, usize>,
    anomaly_count: usize,
) -> RunSummary {
    let scenario_count = scenarios.len();
    let average_score = if scenario_count == 0 {
        0
    } else {
        scenarios.iter().map(|s| s.score).sum::<u64>() / scenario_count as u64
    };
    RunSummary {
        started_at: started_at.to_rfc3339(),
        finished_at: finished_at.to_rfc3339(),
        elapsed_ms: (finished_at - started_at).num_milliseconds(),
        scenario_count,
        anomaly_count,
        average_score,
        outcome_counts,
        scenarios,
    }
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_result(score: u64, game_over: bool) -> ScenarioResultLine {
        ScenarioResultLine {
            scenario: "test".to_string(),
            seed: 42,
            difficulty: Difficulty::Medium,
            ticks: 100,
            score,
            level: 1,
            lives: if game_over { 0 } else { 3 },
            game_over,
            elements_eaten: 0,
            ghosts_eaten: 0,
            bonus_shown: 0,
            lives_lost: 0,
            levels_cleared: 0,
            anomalies: Vec::new(),
        }
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("simulate").chain(args.iter().copied()))
    }

    #[test]
    fn build_run_summary_averages_scores() {
        let started = Utc::now();
        let summary = build_run_summary(
            started,
            started + Duration::milliseconds(1500),
            vec![make_result(1_000, true), make_result(3_000, false)],
            BTreeMap::from([
                ("game_over".to_string(), 1usize),
                ("tick_limit".to_string(), 1usize),
            ]),
            0,
        );
        assert_eq!(summary.average_score, 2_000);
        assert_eq!(summary.scenario_count, 2);
        assert_eq!(summary.elapsed_ms, 1500);
    }

    #[test]
    fn write_summary_returns_error_when_parent_does_not_exist() {
        let target = std::env::temp_dir()
            .join(format!("maze-chase-missing-{}", Utc::now().timestamp_micros()))
            .join("summary.json");
        let started = Utc::now();
        let summary = build_run_summary(started, started, Vec::new(), BTreeMap::new(), 0);
        assert!(write_summary(&target, &summary).is_err());
    }

    #[test]
    fn anomaly_log_deduplicates_messages_but_keeps_records() {
        let mut log = AnomalyLog::default();
        log.push(10, "same anomaly".to_string());
        log.push(11, "same anomaly".to_string());
        assert_eq!(log.messages.len(), 1);
        assert_eq!(log.records.len(), 2);
        assert_eq!(log.records[1].tick, 11);
    }

    #[test]
    fn default_run_covers_every_difficulty() {
        let scenarios = resolve_scenarios(&cli(&["--seed", "7"]), &SessionConfig::default());
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].seed, 7);
        assert_eq!(scenarios[2].difficulty, Difficulty::Hard);

        let single = resolve_scenarios(
            &cli(&["--difficulty", "easy", "--seed", "3", "--max-ticks", "50"]),
            &SessionConfig::default(),
        );
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].name, "custom-easy");
        assert_eq!(single[0].max_ticks, 50);
    }

    #[test]
    fn short_autopilot_run_is_clean() {
        let scenario = Scenario {
            name: "unit".to_string(),
            difficulty: Difficulty::Medium,
            seed: 11,
            max_ticks: 400,
        };
        let layout = default_layout().expect("default layout parses");
        let run = run_scenario(&scenario, &layout, &SessionConfig::default());
        assert!(run.result.anomalies.is_empty(), "{:?}", run.result.anomalies);
        assert!(run.result.score > 0);
        assert!(run.result.elements_eaten > 0);
    }

    #[test]
    fn snapshot_checks_flag_score_regression() {
        let engine = GameEngine::with_default_layout(SessionConfig::default())
            .expect("default layout parses");
        let mut previous = engine.build_snapshot();
        let current = engine.build_snapshot();
        previous.score = 50;
        let found = collect_snapshot_anomalies(&previous, &current);
        assert_eq!(found, vec!["score decreased: 50 -> 0".to_string()]);
    }
}
