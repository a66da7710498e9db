use super::*;
use crate::{Contest, Direction, MatchConfig, Pos, SnapshotError};

fn log_of(rounds: &[&str]) -> MatchLog {
    let mut log = MatchLog::new(MatchConfig::new(5, 3, 0, 1));
    for field in rounds {
        log.push_round(*field);
    }
    log
}

#[test]
fn each_round_yields_one_decision() {
    let log = log_of(&[
        ".,.,.,.,.,P0,.,C,.,P1,.,.,.,.,.",
        ".,.,.,.,.,.,P0,C,P1,.,.,.,.,.,.",
    ]);
    let result = replay_match(&log).expect("replay");

    assert_eq!(result.steps.len(), 2);
    let first = result.steps[0].decision;
    assert_eq!(first.direction, Direction::Right);
    assert_eq!(first.target, Pos { y: 1, x: 2 });
    assert_eq!(first.contest, Contest::Held);
    assert_eq!(result.steps[1].decision.direction, Direction::Right);
    assert_eq!(result.steps[1].round, 2);
    assert_eq!(result.final_snapshot_hash, result.steps[1].snapshot_hash);
}

#[test]
fn replay_is_repeatable() {
    let log = log_of(&[".,.,.,.,.,P0,.,C,.,P1,.,.,.,.,.", "C,.,.,.,.,.,P0,.,.,P1,E0,.,.,.,."]);
    assert_eq!(replay_match(&log), replay_match(&log));
}

#[test]
fn bad_round_reports_its_number() {
    let log = log_of(&[".,.,.,.,.,P0,.,.,.,.,.,.,.,.,.", ".,.,."]);
    assert_eq!(
        replay_match(&log),
        Err(ReplayError::Round {
            round: 2,
            error: EngineError::MalformedSnapshot(SnapshotError::CellCount {
                expected: 15,
                actual: 3,
            }),
        })
    );
}

#[test]
fn invalid_config_fails_before_any_round() {
    let mut log = log_of(&[]);
    log.config.opponent_id = 0;
    assert!(matches!(replay_match(&log), Err(ReplayError::Setup(_))));
}
