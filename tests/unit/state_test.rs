//! Tests for the worker state machine

use prometheus_task_scheduler::core::WorkerState;

const ALL: [WorkerState; 4] = [
    WorkerState::Waiting,
    WorkerState::Running,
    WorkerState::Draining,
    WorkerState::Stopped,
];

#[test]
fn test_resolved_states_are_reachable_from_every_live_state() {
    for from in [WorkerState::Waiting, WorkerState::Running] {
        for (empty, stop) in [(true, false), (false, false), (false, true), (true, true)] {
            let next = WorkerState::resolve(empty, stop);
            assert!(from.can_transition_to(next), "{from} -> {next}");
        }
    }
}

#[test]
fn test_draining_only_resolves_to_stop_paths() {
    // Once stop is set it stays set, so a draining worker only ever resolves
    // with stop = true.
    assert!(WorkerState::Draining.can_transition_to(WorkerState::resolve(false, true)));
    assert!(WorkerState::Draining.can_transition_to(WorkerState::resolve(true, true)));
}

#[test]
fn test_only_stopped_is_terminal() {
    let terminal: Vec<_> = ALL.iter().filter(|s| s.is_terminal()).collect();
    assert_eq!(terminal, vec![&WorkerState::Stopped]);
}

#[test]
fn test_idle_states() {
    assert!(WorkerState::Waiting.is_idle());
    assert!(WorkerState::Stopped.is_idle());
    assert!(!WorkerState::Running.is_idle());
    assert!(!WorkerState::Draining.is_idle());
}

#[test]
fn test_state_serde_names() {
    let names: Vec<String> = ALL
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
    assert_eq!(names, vec!["\"waiting\"", "\"running\"", "\"draining\"", "\"stopped\""]);
    for state in ALL {
        assert_eq!(format!("\"{state}\""), serde_json::to_string(&state).unwrap());
    }
}
