mod app;
mod browser;
mod core;
mod effect;
mod error;
mod ipc;
mod platform;
mod store;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use ipc::IpcClient;
use tabcycle_ipc::{Command, HostEvent, RequestFilter, Response};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// tabcycle - most-recently-used browser tab switcher
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Start(StartCmd),
    Version(VersionCmd),
    Cycle(CycleCmd),
    CycleReverse(CycleReverseCmd),
    Commit(CommitCmd),
    Cancel(CancelCmd),
    ActivateTab(ActivateTabCmd),
    GetState(GetStateCmd),
    ListMru(ListMruCmd),
    Notify(NotifyCmd),
    Subscribe(SubscribeCmd),
    Quit(QuitCmd),
}

/// Start the tabcycle daemon
#[derive(FromArgs)]
#[argh(subcommand, name = "start")]
struct StartCmd {
    /// file the MRU lists are persisted to
    #[argh(option)]
    store: Option<PathBuf>,
    /// only offer tabs with recorded activity
    #[argh(switch)]
    mru_only: bool,
    /// title shown for tabs without one
    #[argh(option)]
    untitled: Option<String>,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

/// Start cycling, or move the highlight to the next tab
#[derive(FromArgs)]
#[argh(subcommand, name = "cycle")]
struct CycleCmd {}

/// Start cycling backwards, or move the highlight to the previous tab
#[derive(FromArgs)]
#[argh(subcommand, name = "cycle-reverse")]
struct CycleReverseCmd {}

/// Switch to the highlighted tab and close the overlay
#[derive(FromArgs)]
#[argh(subcommand, name = "commit")]
struct CommitCmd {}

/// Close the overlay without switching
#[derive(FromArgs)]
#[argh(subcommand, name = "cancel")]
struct CancelCmd {}

/// Switch to a specific tab and close the overlay
#[derive(FromArgs)]
#[argh(subcommand, name = "activate-tab")]
struct ActivateTabCmd {
    /// tab id
    #[argh(positional)]
    tab_id: u32,
}

/// Show the cycling session
#[derive(FromArgs)]
#[argh(subcommand, name = "get-state")]
struct GetStateCmd {}

/// List recorded tab order per window
#[derive(FromArgs)]
#[argh(subcommand, name = "list-mru")]
struct ListMruCmd {
    /// only this window
    #[argh(option)]
    window: Option<u32>,
}

/// Deliver a browser event (JSON) to the daemon
#[derive(FromArgs)]
#[argh(subcommand, name = "notify")]
struct NotifyCmd {
    /// host event, e.g. '{"type":"tab_activated","tab_id":3,"window_id":1}'
    #[argh(positional)]
    event: String,
}

/// Print requests the daemon sends to the browser
#[derive(FromArgs)]
#[argh(subcommand, name = "subscribe")]
struct SubscribeCmd {
    /// overlay requests (show, hide, render)
    #[argh(switch)]
    overlay: bool,
    /// tab activation requests
    #[argh(switch)]
    activation: bool,
}

/// Quit the tabcycle daemon
#[derive(FromArgs)]
#[argh(subcommand, name = "quit")]
struct QuitCmd {}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None => {
            // No subcommand - show help (simulate --help)
            let args: Vec<&str> = vec!["tabcycle", "--help"];
            if let Err(e) = Cli::from_args(&args[..1], &args[1..]) {
                println!("{}", e.output);
            }
            Ok(())
        }
        Some(SubCommand::Start(cmd)) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .init();

            let config = start_config(cmd);
            tracing::info!("tabcycle starting (store: {:?})", config.store_path);
            app::App::new(config).run()
        }
        Some(SubCommand::Version(_)) => {
            println!("tabcycle {}", VERSION);
            Ok(())
        }
        Some(SubCommand::Subscribe(cmd)) => ipc::subscribe_and_print(RequestFilter {
            overlay: cmd.overlay,
            activation: cmd.activation,
        }),
        Some(subcmd) => run_cli(subcmd),
    }
}

fn start_config(cmd: StartCmd) -> crate::core::Config {
    let mut config = crate::core::Config::new();
    if let Some(store) = cmd.store {
        config.store_path = store;
    }
    if cmd.mru_only {
        config.append_untracked_tabs = false;
    }
    if let Some(untitled) = cmd.untitled {
        config.untitled_title = untitled;
    }
    config
}

fn run_cli(subcmd: SubCommand) -> Result<()> {
    let cmd = to_command(subcmd)?;
    let mut client = IpcClient::connect()?;
    let response = client.send(&cmd)?;

    match response {
        Response::Ok => {}
        Response::Error { message } => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
        Response::State { state } => {
            if !state.active {
                println!("Idle");
                return Ok(());
            }
            println!(
                "Cycling in window {} (anchor tab {})",
                state.window_id.unwrap_or_default(),
                state.anchor_tab_id.unwrap_or_default()
            );
            for (i, tab) in state.snapshot.iter().enumerate() {
                println!(
                    "{} {}: {} - {}",
                    if i == state.highlight_index { ">" } else { " " },
                    tab.id,
                    tab.title,
                    tab.url
                );
            }
        }
        Response::Mru { windows } => {
            for w in windows {
                let tabs: Vec<String> = w.tabs.iter().map(|id| id.to_string()).collect();
                println!("{}: {}", w.window_id, tabs.join(" "));
            }
        }
    }

    Ok(())
}

fn to_command(subcmd: SubCommand) -> Result<Command> {
    match subcmd {
        SubCommand::Start(_) | SubCommand::Version(_) | SubCommand::Subscribe(_) => {
            bail!("not a daemon command")
        }
        SubCommand::Cycle(_) => Ok(Command::CycleForward),
        SubCommand::CycleReverse(_) => Ok(Command::CycleReverse),
        SubCommand::Commit(_) => Ok(Command::Commit),
        SubCommand::Cancel(_) => Ok(Command::Cancel),
        SubCommand::ActivateTab(cmd) => Ok(Command::ActivateTab { tab_id: cmd.tab_id }),
        SubCommand::GetState(_) => Ok(Command::GetState),
        SubCommand::ListMru(cmd) => Ok(Command::ListMru {
            window_id: cmd.window,
        }),
        SubCommand::Notify(cmd) => {
            let event: HostEvent =
                serde_json::from_str(&cmd.event).context("Invalid host event JSON")?;
            Ok(Command::HostEvent { event })
        }
        SubCommand::Quit(_) => Ok(Command::Quit),
    }
}
