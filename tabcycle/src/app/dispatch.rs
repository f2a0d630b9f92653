use std::cell::RefCell;

use crate::core::State;
use crate::platform::{TabManipulator, TabSystem};
use crate::store::MruPersistence;
use tabcycle_ipc::{Command, Response};

use super::command::process_command;
use super::effects::execute_effects;

/// Unified command dispatcher: process command -> execute effects -> respond.
/// `system` must already reflect a `Command::HostEvent` being dispatched.
pub fn dispatch_command<S: TabSystem, M: TabManipulator, P: MruPersistence>(
    cmd: &Command,
    state: &RefCell<State>,
    system: &S,
    manipulator: &M,
    persistence: &P,
) -> Response {
    let result = process_command(&mut state.borrow_mut(), system, cmd);
    execute_effects(result.effects, state, system, manipulator, persistence);
    result.response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, MruStore};
    use crate::platform::mock::{
        create_test_tab, ManipulatorCall, MockTabManipulator, MockTabSystem,
    };
    use crate::store::mock::MemoryStore;
    use std::collections::HashMap;
    use tabcycle_ipc::HostEvent;

    fn setup_test_context() -> (RefCell<State>, MockTabSystem, MockTabManipulator, MemoryStore) {
        let ws = MockTabSystem::new()
            .with_tabs(vec![
                create_test_tab(1, 1, true),
                create_test_tab(2, 1, false),
                create_test_tab(3, 1, false),
            ])
            .with_focused(Some(1));
        let mru = MruStore::from_lists(HashMap::from([(1, vec![1, 2, 3])]));
        let state = RefCell::new(State::new(Config::default(), mru));
        (state, ws, MockTabManipulator::new(), MemoryStore::new())
    }

    #[test]
    fn test_cycle_then_commit_switches_tab() {
        let (state, ws, manipulator, store) = setup_test_context();

        dispatch_command(&Command::CycleForward, &state, &ws, &manipulator, &store);
        dispatch_command(&Command::CycleForward, &state, &ws, &manipulator, &store);
        manipulator.clear_calls();

        let response = dispatch_command(&Command::Commit, &state, &ws, &manipulator, &store);

        assert!(matches!(response, Response::Ok));
        assert_eq!(
            manipulator.calls(),
            vec![
                ManipulatorCall::ActivateTab { tab_id: 3 },
                ManipulatorCall::HideOverlay { tab_id: 1 },
            ]
        );
        assert!(!state.borrow().session.is_active());
    }

    #[test]
    fn test_quick_switch_round_trip() {
        let (state, mut ws, manipulator, store) = setup_test_context();

        dispatch_command(&Command::CycleForward, &state, &ws, &manipulator, &store);
        dispatch_command(&Command::Commit, &state, &ws, &manipulator, &store);

        // The browser reports the switch back
        ws.activate(2);
        let event = HostEvent::TabActivated {
            tab_id: 2,
            window_id: 1,
        };
        dispatch_command(
            &Command::HostEvent { event },
            &state,
            &ws,
            &manipulator,
            &store,
        );

        assert_eq!(state.borrow().mru.list(1), &[2, 1, 3]);
        assert_eq!(store.saved().unwrap().list(1), &[2, 1, 3]);

        // Next quick switch lands back on the original tab
        manipulator.clear_calls();
        dispatch_command(&Command::CycleForward, &state, &ws, &manipulator, &store);
        dispatch_command(&Command::Commit, &state, &ws, &manipulator, &store);
        assert!(manipulator
            .calls()
            .contains(&ManipulatorCall::ActivateTab { tab_id: 1 }));
    }

    #[test]
    fn test_cancel_leaves_tab_unchanged() {
        let (state, ws, manipulator, store) = setup_test_context();

        dispatch_command(&Command::CycleReverse, &state, &ws, &manipulator, &store);
        manipulator.clear_calls();
        dispatch_command(&Command::Cancel, &state, &ws, &manipulator, &store);

        assert_eq!(
            manipulator.calls(),
            vec![ManipulatorCall::HideOverlay { tab_id: 1 }]
        );
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_pick_from_overlay() {
        let (state, ws, manipulator, store) = setup_test_context();

        dispatch_command(&Command::CycleForward, &state, &ws, &manipulator, &store);
        manipulator.clear_calls();
        dispatch_command(
            &Command::ActivateTab { tab_id: 3 },
            &state,
            &ws,
            &manipulator,
            &store,
        );

        assert_eq!(
            manipulator.calls(),
            vec![
                ManipulatorCall::ActivateTab { tab_id: 3 },
                ManipulatorCall::HideOverlay { tab_id: 1 },
            ]
        );
    }

    #[test]
    fn test_restricted_page_never_starts_session() {
        let (state, ws, _, store) = setup_test_context();
        let manipulator = MockTabManipulator::new().with_unavailable_tab(1);

        dispatch_command(&Command::CycleForward, &state, &ws, &manipulator, &store);
        assert!(!state.borrow().session.is_active());

        // Commit afterwards has nothing to do
        manipulator.clear_calls();
        dispatch_command(&Command::Commit, &state, &ws, &manipulator, &store);
        assert!(manipulator.calls().is_empty());
    }
}
