use std::sync::Arc;
use std::time::Duration;

use stratagem::direction::Direction::{self, Down, Left, Right, Up};
use stratagem::drill_core::{
    DrillCore, DrillEvent, DrillTuning, RoundPhase, StepOutcome, TickOutcome,
};
use stratagem::library::{IconRef, SequenceLibrary};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn single_sequence_core() -> DrillCore {
    let library = SequenceLibrary::from_parts(
        vec![vec![Down, Down, Up, Right]],
        vec![IconRef::new("Resupply.png")],
    )
    .expect("valid library");
    DrillCore::new(library, DrillTuning::default(), 0).expect("valid tuning")
}

fn started() -> DrillCore {
    let mut core = single_sequence_core();
    core.start_round();
    core.clear_events();
    core
}

fn match_index(core: &DrillCore) -> usize {
    core.round().map_or(0, |r| r.match_index())
}

#[test]
fn first_round_budget_is_already_decremented() {
    let mut core = single_sequence_core();
    assert_eq!(core.phase(), RoundPhase::Idle);
    core.start_round();

    assert_eq!(core.round_budget(), ms(4_800));
    assert_eq!(core.remaining(), ms(4_800));
    assert_eq!(core.phase(), RoundPhase::Matching);
    match core.events() {
        [DrillEvent::RoundStarted {
            round,
            library_index,
            name,
            sequence,
            icon,
            budget,
        }] => {
            assert_eq!(*round, 1);
            assert_eq!(*library_index, 0);
            assert_eq!(name, "Resupply");
            assert_eq!(sequence, &vec![Down, Down, Up, Right]);
            assert_eq!(icon.as_str(), "Resupply.png");
            assert_eq!(*budget, ms(4_800));
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn full_match_completes_and_starts_next_round() {
    let mut core = started();

    for (i, d) in [Down, Down, Up].into_iter().enumerate() {
        assert_eq!(core.submit_input(d), Some(StepOutcome::Correct));
        assert_eq!(match_index(&core), i + 1);
    }
    assert_eq!(core.submit_input(Right), Some(StepOutcome::Correct));

    let round = core.round().expect("next round");
    assert_eq!(round.number(), 2);
    assert_eq!(round.match_index(), 0);
    assert_eq!(core.round_budget(), ms(4_600));
    assert_eq!(core.remaining(), ms(4_600));
    assert!(core.is_clock_running());

    let events = core.take_events();
    let tail = &events[events.len() - 3..];
    assert_eq!(
        tail[0],
        DrillEvent::StepResult {
            index: 3,
            outcome: StepOutcome::Correct
        }
    );
    assert_eq!(
        tail[1],
        DrillEvent::RoundComplete {
            round: 1,
            remaining: ms(4_800)
        }
    );
    assert!(matches!(
        tail[2],
        DrillEvent::RoundStarted { round: 2, budget, .. } if budget == ms(4_600)
    ));
    assert_eq!(core.stats().rounds_completed, 1);
}

#[test]
fn wrong_input_keeps_position_then_correct_advances() {
    let mut core = started();

    assert_eq!(core.submit_input(Up), Some(StepOutcome::Incorrect));
    assert_eq!(match_index(&core), 0);
    assert_eq!(core.submit_input(Down), Some(StepOutcome::Correct));
    assert_eq!(match_index(&core), 1);

    assert_eq!(
        core.take_events(),
        vec![
            DrillEvent::StepResult {
                index: 0,
                outcome: StepOutcome::Incorrect
            },
            DrillEvent::StepResult {
                index: 0,
                outcome: StepOutcome::Correct
            },
        ]
    );
}

#[test]
fn repeated_wrong_input_only_re_emits_incorrect() {
    let mut core = started();
    core.submit_input(Down);
    core.clear_events();
    let remaining = core.remaining();

    for _ in 0..5 {
        assert_eq!(core.submit_input(Left), Some(StepOutcome::Incorrect));
    }
    assert_eq!(match_index(&core), 1);
    assert_eq!(core.remaining(), remaining);
    assert_eq!(core.round().map(|r| r.number()), Some(1));
    assert_eq!(
        core.take_events(),
        vec![
            DrillEvent::StepResult {
                index: 1,
                outcome: StepOutcome::Incorrect
            };
            5
        ]
    );
}

#[test]
fn each_tick_removes_exactly_one_step() {
    let mut core = started();
    for n in 1..=10u64 {
        assert_eq!(
            core.tick_step(),
            TickOutcome::Running {
                remaining: ms(4_800 - 100 * n)
            }
        );
    }
    assert_eq!(
        core.events().last(),
        Some(&DrillEvent::Tick {
            remaining: ms(3_800)
        })
    );
}

#[test]
fn timeout_fires_once_then_restarts_after_delay() {
    let mut core = started();

    for _ in 0..47 {
        assert!(matches!(core.tick_step(), TickOutcome::Running { .. }));
    }
    assert_eq!(core.tick_step(), TickOutcome::TimedOut);
    assert_eq!(core.remaining(), Duration::ZERO);
    assert!(!core.is_clock_running());

    let timeouts = core
        .events()
        .iter()
        .filter(|e| matches!(e, DrillEvent::RoundTimedOut { round: 1 }))
        .count();
    assert_eq!(timeouts, 1);

    // Input while waiting for the restart is ignored.
    assert_eq!(core.submit_input(Down), None);

    for _ in 0..4 {
        assert!(matches!(core.tick_step(), TickOutcome::Waiting { .. }));
    }
    assert_eq!(core.tick_step(), TickOutcome::Restarted);

    let round_timeouts = core
        .events()
        .iter()
        .filter(|e| matches!(e, DrillEvent::RoundTimedOut { .. }))
        .count();
    assert_eq!(round_timeouts, 1);
    assert_eq!(core.round().map(|r| r.number()), Some(2));
    assert_eq!(core.round_budget(), ms(4_600));
    assert_eq!(core.phase(), RoundPhase::Matching);
    assert_eq!(core.stats().rounds_timed_out, 1);
}

#[test]
fn zero_restart_delay_restarts_on_the_timeout_tick() {
    let library = SequenceLibrary::from_parts(
        vec![vec![Down, Down, Up, Right]],
        vec![IconRef::new("Resupply.png")],
    )
    .expect("valid library");
    let tuning = DrillTuning {
        initial_budget: ms(400),
        min_budget: ms(100),
        timeout_restart_delay: Duration::ZERO,
        ..DrillTuning::default()
    };
    let mut core = DrillCore::new(library, tuning, 0).expect("valid tuning");
    core.start_round();
    assert_eq!(core.round_budget(), ms(200));

    core.tick_step();
    assert_eq!(core.tick_step(), TickOutcome::TimedOut);
    assert_eq!(core.phase(), RoundPhase::Matching);
    assert_eq!(core.round().map(|r| r.number()), Some(2));
}

#[test]
fn budget_never_drops_below_floor() {
    let mut core = started();
    let mut previous = core.round_budget();
    for _ in 0..40 {
        for d in [Down, Down, Up, Right] {
            core.submit_input(d);
        }
        let budget = core.round_budget();
        let round = core.stats().rounds_started;
        assert_eq!(budget, core.tuning().budget_for_round(round));
        assert!(budget <= previous);
        assert!(budget >= ms(1_000));
        previous = budget;
    }
    assert_eq!(core.round_budget(), ms(1_000));
    assert_eq!(core.stats().rounds_started, 41);
}

#[test]
fn match_index_is_monotone_and_bounded() {
    let library = SequenceLibrary::standard();
    let mut core = DrillCore::new(library, DrillTuning::default(), 99).expect("valid tuning");
    core.start_round();

    let inputs = [Up, Down, Left, Right, Right, Up, Down, Down, Left, Up, Right];
    for _ in 0..20 {
        for &d in &inputs {
            let before = core.round().map(|r| (r.number(), r.match_index()));
            core.submit_input(d);
            let round = core.round().expect("live round");
            assert!(round.match_index() <= round.sequence().len());
            if let Some((number, index)) = before {
                if number == round.number() {
                    assert!(round.match_index() >= index);
                }
            }
        }
    }
}

fn three_entry_library() -> Arc<SequenceLibrary> {
    let steps: Vec<Direction> = vec![Right, Right, Up];
    Arc::new(
        SequenceLibrary::from_parts(
            vec![steps.clone(), steps, vec![Left]],
            vec![
                IconRef::new("First.png"),
                IconRef::new("Second.png"),
                IconRef::new("Third.png"),
            ],
        )
        .expect("valid library"),
    )
}

/// `library_index` of each of `rounds` freshly started rounds.
fn drawn_indices(seed: u64, rounds: usize) -> Vec<usize> {
    let mut core =
        DrillCore::new(three_entry_library(), DrillTuning::default(), seed).expect("valid tuning");
    (0..rounds)
        .map(|_| {
            core.start_round();
            core.round().expect("live round").library_index()
        })
        .collect()
}

#[test]
fn duplicate_sequences_keep_their_own_icons() {
    const ICONS: [&str; 3] = ["First.png", "Second.png", "Third.png"];
    let mut core =
        DrillCore::new(three_entry_library(), DrillTuning::default(), 3).expect("valid tuning");

    let mut second_seen = false;
    for _ in 0..300 {
        core.start_round();
        let round = core.round().expect("live round");
        let index = round.library_index();
        assert_eq!(round.icon().as_str(), ICONS[index]);
        second_seen |= index == 1 && round.icon().as_str() == "Second.png";

        match core.take_events().last() {
            Some(DrillEvent::RoundStarted {
                library_index,
                icon,
                ..
            }) => {
                assert_eq!(*library_index, index);
                assert_eq!(icon.as_str(), ICONS[index]);
            }
            other => panic!("expected a round start, got {other:?}"),
        }
    }
    assert!(second_seen, "the second of two identical sequences was never drawn");
}

#[test]
fn every_library_position_gets_drawn() {
    let drawn = drawn_indices(17, 300);
    for index in 0..3 {
        assert!(drawn.contains(&index), "index {index} never drawn");
    }
}

#[test]
fn selection_is_with_replacement() {
    let drawn = drawn_indices(5, 300);
    assert!(
        drawn.windows(2).any(|pair| pair[0] == pair[1]),
        "no round ever repeated the previous entry"
    );
}

#[test]
fn same_seed_draws_the_same_rounds() {
    assert_eq!(drawn_indices(23, 50), drawn_indices(23, 50));
}

#[test]
fn shutdown_stops_everything() {
    let mut core = started();
    core.tick_step();
    core.shutdown();

    assert_eq!(core.phase(), RoundPhase::Idle);
    assert!(core.events().is_empty());
    assert_eq!(core.tick_step(), TickOutcome::Idle);
    assert_eq!(core.submit_input(Down), None);
}

#[test]
fn snapshot_serializes_flat_with_milliseconds() {
    let mut core = started();
    core.submit_input(Down);
    core.tick_step();

    let json = serde_json::to_value(core.snapshot()).expect("snapshot serializes");
    assert_eq!(json["round"], 1);
    assert_eq!(json["sequence"], "⭣⭣⭡⭢");
    assert_eq!(json["match_index"], 1);
    assert_eq!(json["remaining_ms"], 4_700);
    assert_eq!(json["budget_ms"], 4_800);
    assert_eq!(json["phase"], "matching");
    assert_eq!(json["stats"]["correct_inputs"], 1);
}
