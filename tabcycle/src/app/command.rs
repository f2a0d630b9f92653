use crate::core::{CycleDirection, State};
use crate::effect::CommandResult;
use crate::platform::TabSystem;
use tabcycle_ipc::{Command, Response};

/// Pure function: processes a command and returns a response with effects.
/// This function does not perform any side effects - it only mutates state and computes effects.
pub fn process_command<S: TabSystem>(state: &mut State, system: &S, cmd: &Command) -> CommandResult {
    match cmd {
        // Query commands - no effects
        Command::GetState => CommandResult::with_response(Response::State {
            state: state.session.info(),
        }),
        Command::ListMru { window_id } => CommandResult::with_response(Response::Mru {
            windows: state.mru_info(*window_id),
        }),

        // Cycling
        Command::CycleForward => {
            CommandResult::ok_with_effects(state.cycle(system, CycleDirection::Forward))
        }
        Command::CycleReverse => {
            CommandResult::ok_with_effects(state.cycle(system, CycleDirection::Reverse))
        }
        Command::Commit => CommandResult::ok_with_effects(state.commit()),
        Command::Cancel => CommandResult::ok_with_effects(state.cancel()),
        Command::ActivateTab { tab_id } => CommandResult::ok_with_effects(state.pick(*tab_id)),

        // Browser notifications
        Command::HostEvent { event } => {
            tracing::debug!("Host event: {:?}", event);
            CommandResult::ok_with_effects(state.handle_host_event(system, event))
        }

        // Quit is handled by the main loop after the response is sent
        Command::Quit => CommandResult::ok(),
    }
}
