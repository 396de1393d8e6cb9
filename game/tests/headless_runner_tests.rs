use engine::{GameLogic, HeadlessRunner};
use stratagem::direction::Direction::{Down, Right, Up};
use stratagem::drill_core::{DrillEvent, DrillTuning, RoundPhase};
use stratagem::library::{IconRef, SequenceLibrary};
use stratagem::logic::{DrillInput, DrillLogic};
use stratagem::script::parse_script;

fn single_sequence_logic() -> DrillLogic {
    let library = SequenceLibrary::from_parts(
        vec![vec![Down, Down, Up, Right]],
        vec![IconRef::new("Resupply.png")],
    )
    .expect("valid library");
    DrillLogic::new(library, DrillTuning::default(), 0).expect("valid tuning")
}

fn run_script(logic: DrillLogic, script: &str) -> HeadlessRunner<DrillLogic> {
    let mut runner = HeadlessRunner::new(logic);
    for step in parse_script(script) {
        let input = step.resolve(runner.state());
        runner.step(input);
    }
    runner
}

#[test]
fn initial_state_is_a_live_first_round() {
    let logic = single_sequence_logic();
    let state = logic.initial_state();
    assert_eq!(state.phase(), RoundPhase::Matching);
    assert_eq!(state.round().map(|r| r.number()), Some(1));
    assert!(matches!(
        state.events(),
        [DrillEvent::RoundStarted { round: 1, .. }]
    ));
}

#[test]
fn each_frame_only_carries_its_own_events() {
    let mut runner = HeadlessRunner::new(single_sequence_logic());
    runner.step(DrillInput::Press(Down));
    runner.step(DrillInput::Noop);

    assert_eq!(runner.history()[1].events().len(), 1);
    assert!(runner.state().events().is_empty());
}

#[test]
fn scripted_completion_reaches_round_two() {
    let runner = run_script(single_sequence_logic(), "ddur");
    assert_eq!(runner.frame(), 4);
    let state = runner.state();
    assert_eq!(state.stats().rounds_completed, 1);
    assert_eq!(state.round().map(|r| r.number()), Some(2));
}

#[test]
fn expected_presses_clear_many_rounds_from_the_standard_set() {
    let runner = run_script(DrillLogic::standard(11), &"*".repeat(200));
    let stats = runner.state().stats();
    assert_eq!(stats.incorrect_inputs, 0);
    assert_eq!(stats.correct_inputs, 200);
    assert!(stats.rounds_completed >= 200 / 5);
}

#[test]
fn same_seed_and_script_replay_identically() {
    let script = "*.*.u*..l**.*";
    let a = run_script(DrillLogic::standard(42), script);
    let b = run_script(DrillLogic::standard(42), script);

    let snaps_a: Vec<_> = a.history().iter().map(|s| s.snapshot()).collect();
    let snaps_b: Vec<_> = b.history().iter().map(|s| s.snapshot()).collect();
    assert_eq!(snaps_a, snaps_b);
}

#[test]
fn rewind_then_new_input_branches_history() {
    let mut runner = run_script(single_sequence_logic(), "dd....");
    assert_eq!(runner.frame(), 6);

    runner.rewind(5);
    assert_eq!(runner.frame(), 1);
    assert_eq!(runner.state().round().map(|r| r.match_index()), Some(1));

    runner.step(DrillInput::Press(Up));
    assert_eq!(runner.frame(), 2);
    assert_eq!(runner.history().len(), 3);
    assert_eq!(runner.state().round().map(|r| r.match_index()), Some(1));
    assert_eq!(runner.state().stats().incorrect_inputs, 1);
}

#[test]
fn ticks_through_the_logic_time_out_and_restart() {
    let runner = run_script(single_sequence_logic(), &".".repeat(48 + 5));
    let timed_out_frames = runner
        .history()
        .iter()
        .filter(|s| {
            s.events()
                .iter()
                .any(|e| matches!(e, DrillEvent::RoundTimedOut { .. }))
        })
        .count();
    assert_eq!(timed_out_frames, 1);
    assert_eq!(runner.state().round().map(|r| r.number()), Some(2));
    assert_eq!(runner.state().phase(), RoundPhase::Matching);
}
