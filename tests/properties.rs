use proptest::prelude::*;

use maze_chase_engine::engine::lives_awarded;
use maze_chase_engine::{Command, Direction, GameEngine, GameEvent, GhostState, SessionConfig};

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        8 => prop::sample::select(Direction::CARDINALS.to_vec())
            .prop_map(|dir| Command::Move { dir }),
        1 => Just(Command::TogglePause),
        1 => Just(Command::DebugExtraLife),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn life_award_matches_threshold_crossings(
        before in 0u64..1_000_000,
        won in 0u64..50_000,
        threshold in 1u64..20_000,
    ) {
        let score = before + won;
        let awarded = lives_awarded(score, won, threshold);
        prop_assert_eq!(u64::from(awarded), score / threshold - before / threshold);
        if won < threshold {
            prop_assert!(awarded <= 1);
        }
    }

    #[test]
    fn motion_stays_cardinal_and_score_never_drops(
        seed in any::<u64>(),
        commands in prop::collection::vec((0usize..40, command_strategy()), 1..40),
    ) {
        let config = SessionConfig { seed, ..SessionConfig::default() };
        let mut engine = GameEngine::with_default_layout(config).expect("default layout parses");
        let mut last_score = 0;
        for (wait, command) in commands {
            engine.handle_command(command);
            for _ in 0..wait {
                engine.step();
                let snapshot = engine.build_snapshot();
                prop_assert!(snapshot.player.x_speed == 0.0 || snapshot.player.y_speed == 0.0);
                for ghost in &snapshot.ghosts {
                    prop_assert!(ghost.motion.x_speed == 0.0 || ghost.motion.y_speed == 0.0);
                }
                prop_assert!(snapshot.score >= last_score);
                prop_assert!(snapshot.remaining_elements <= snapshot.total_elements);
                last_score = snapshot.score;
            }
        }
    }

    #[test]
    fn ghost_states_follow_the_state_machine(
        seed in any::<u64>(),
        turns in prop::collection::vec(prop::sample::select(Direction::CARDINALS.to_vec()), 1..30),
    ) {
        let config = SessionConfig { seed, ..SessionConfig::default() };
        let mut engine = GameEngine::with_default_layout(config).expect("default layout parses");
        let mut states = vec![GhostState::Hunter; engine.ghosts().len()];
        for dir in turns {
            engine.handle_command(Command::Move { dir });
            for _ in 0..30 {
                engine.step();
            }
            for event in engine.drain_events() {
                if let GameEvent::GhostStateChanged { ghost, state } = event {
                    let previous = states[ghost];
                    match state {
                        GhostState::Prey => prop_assert_eq!(previous, GhostState::Hunter),
                        GhostState::Eaten => prop_assert_eq!(previous, GhostState::Prey),
                        GhostState::Hunter => prop_assert_ne!(previous, GhostState::Hunter),
                    }
                    states[ghost] = state;
                }
            }
            for (ghost, state) in engine.ghosts().iter().zip(&states) {
                prop_assert_eq!(ghost.state(), *state);
            }
        }
    }
}
