use std::time::Duration;

use strangeloop::{
    ChaosProcess, ChaosSpec, Driver, FrameStack, Process, RecordingSink, Status, StepEvent,
    StepperSpec, TreeProcess, TreeSpec, process::drain,
};

fn tree(max_depth: u32) -> TreeSpec {
    TreeSpec {
        max_depth,
        ..TreeSpec::default()
    }
}

fn tree_events(max_depth: u32) -> Vec<StepEvent> {
    drain(&mut TreeProcess::new(&tree(max_depth)))
}

#[test]
fn independent_instances_produce_identical_event_sequences() {
    assert_eq!(tree_events(4), tree_events(4));

    let chaos = ChaosSpec {
        points: 300,
        seed: 11,
        ..ChaosSpec::default()
    };
    assert_eq!(
        drain(&mut ChaosProcess::new(&chaos)),
        drain(&mut ChaosProcess::new(&chaos))
    );
}

#[test]
fn stack_discipline_holds_at_every_prefix() {
    let events = tree_events(3);
    let mut stack = FrameStack::new();
    let mut open_chronological: Vec<u64> = Vec::new();
    let mut pushes = 0i64;
    let mut pops = 0i64;

    for event in &events {
        stack.apply(event).unwrap();
        match event {
            StepEvent::Push(frame) => {
                open_chronological.push(frame.id);
                pushes += 1;
            }
            StepEvent::Pop => {
                open_chronological.pop();
                pops += 1;
            }
            StepEvent::Emit(_) => {}
        }

        assert_eq!(stack.len() as i64, pushes - pops);

        let top_first: Vec<u64> = stack.frames().iter().map(|f| f.id).collect();
        let reverse_chronological: Vec<u64> =
            open_chronological.iter().rev().copied().collect();
        assert_eq!(top_first, reverse_chronological);
    }
}

#[test]
fn runs_complete_balanced_with_an_empty_stack() {
    let events = tree_events(4);
    let pushes = events
        .iter()
        .filter(|e| matches!(e, StepEvent::Push(_)))
        .count();
    let pops = events.iter().filter(|e| matches!(e, StepEvent::Pop)).count();
    assert_eq!(pushes, pops);

    let mut stack = FrameStack::new();
    for event in &events {
        stack.apply(event).unwrap();
    }
    assert!(stack.is_empty());
}

#[test]
fn pacing_never_changes_the_outcome() {
    let spec = StepperSpec::Tree(tree(2));

    let mut manual = Driver::with_spec(spec.clone()).unwrap();
    while manual.step().unwrap().is_some() {}

    let mut eager = Driver::with_spec(spec.clone()).unwrap();
    let mut sink = RecordingSink::new();
    eager.play(Duration::ZERO, &mut sink).unwrap();

    let mut timed = Driver::with_spec(spec).unwrap();
    let mut sink = RecordingSink::new();
    timed.play(Duration::from_millis(1), &mut sink).unwrap();

    assert_eq!(manual.events_applied(), eager.events_applied());
    assert_eq!(manual.events_applied(), timed.events_applied());
    assert_eq!(manual.snapshot().draw_log, eager.snapshot().draw_log);
    assert_eq!(manual.snapshot().draw_log, timed.snapshot().draw_log);
    assert_eq!(eager.status(), Status::Finished);
    assert_eq!(timed.status(), Status::Finished);
}

#[test]
fn reset_reproduces_the_original_run() {
    let mut driver = Driver::with_spec(StepperSpec::Chaos(ChaosSpec {
        points: 100,
        seed: 5,
        ..ChaosSpec::default()
    }))
    .unwrap();

    let mut first = Vec::new();
    while let Some(event) = driver.step().unwrap() {
        first.push(event);
    }

    driver.reset();
    let mut second = Vec::new();
    while let Some(event) = driver.step().unwrap() {
        second.push(event);
    }

    assert_eq!(first, second);
}

#[test]
fn depth_one_scenario_matches_the_canonical_order() {
    let shape: Vec<(&str, Option<u64>, Option<u32>)> = tree_events(1)
        .iter()
        .map(|e| match e {
            StepEvent::Push(f) => ("push", Some(f.id), Some(f.depth)),
            StepEvent::Emit(_) => ("emit", None, None),
            StepEvent::Pop => ("pop", None, None),
        })
        .collect();

    assert_eq!(
        shape,
        vec![
            ("push", Some(0), Some(0)),
            ("emit", None, None),
            ("push", Some(1), Some(1)),
            ("emit", None, None),
            ("pop", None, None),
            ("push", Some(2), Some(1)),
            ("emit", None, None),
            ("pop", None, None),
            ("pop", None, None),
        ]
    );
}

#[test]
fn depth_zero_scenario_is_a_single_call() {
    let mut process = TreeProcess::new(&tree(0));
    let events = drain(&mut process);
    assert_eq!(events.len(), 3);
    assert!(
        matches!(&events[0], StepEvent::Push(f) if f.id == 0 && f.depth == 0)
    );
    assert!(matches!(events[1], StepEvent::Emit(_)));
    assert_eq!(events[2], StepEvent::Pop);
    assert!(process.advance().is_none());
}

#[test]
fn exhaustion_is_idempotent() {
    let mut process = TreeProcess::new(&tree(1));
    while process.advance().is_some() {}
    for _ in 0..10 {
        assert!(process.advance().is_none());
    }

    let mut driver = Driver::with_spec(StepperSpec::Tree(tree(1))).unwrap();
    while driver.step().unwrap().is_some() {}
    let log_len = driver.snapshot().draw_log.len();
    for _ in 0..10 {
        assert!(driver.step().unwrap().is_none());
    }
    assert_eq!(driver.status(), Status::Finished);
    assert_eq!(driver.snapshot().draw_log.len(), log_len);
    assert!(driver.snapshot().frames.is_empty());
}

#[test]
fn stale_ticks_are_discarded_after_pause_and_reset() {
    let mut driver = Driver::with_spec(StepperSpec::Tree(tree(2))).unwrap();

    let token = driver.start().unwrap();
    assert!(driver.tick(token).unwrap());
    let applied = driver.events_applied();

    driver.pause();
    assert!(!driver.tick(token).unwrap());
    assert_eq!(driver.events_applied(), applied);

    let token = driver.start().unwrap();
    assert!(driver.tick(token).unwrap());

    driver.reset();
    assert!(!driver.tick(token).unwrap());
    assert_eq!(driver.events_applied(), 0);
    assert_eq!(driver.status(), Status::Ready);
}

#[test]
fn chaos_is_the_degenerate_single_frame_case() {
    let points = 50;
    let mut driver = Driver::with_spec(StepperSpec::Chaos(ChaosSpec {
        points,
        seed: 3,
        ..ChaosSpec::default()
    }))
    .unwrap();
    while driver.step().unwrap().is_some() {}

    let snap = driver.snapshot();
    assert_eq!(snap.draw_log.len() as u64, points);
    assert!(snap.draw_log.iter().all(|r| r.frame_id == Some(0)));
    assert!(snap.frames.is_empty());
}
