//! Interactive ordering session.
//!
//! Stdin lines are parsed into commands on a reader task; the controller
//! runs on the current task and owns all session state.
//!
//! Rendered views always go to stdout. Replies to typed input (help, the
//! menu listing, parse errors) go to stdout in text mode and to stderr in
//! JSON mode, so stdout stays one JSON object per line.

use std::path::Path;

use makcik_core::Menu;
use makcik_ordering::{Command, OrderController, OrderingConfig, TokioTimer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::menu;
use crate::input::{self, HELP, Input};
use crate::terminal::{Mode, TerminalRenderer};

/// Run an ordering session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the configuration or menu cannot be loaded.
pub async fn run(menu_path: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = OrderingConfig::from_env()?;
    let menu = menu::load(menu_path).await?;
    info!(items = menu.len(), "Starting ordering session");

    let mode = if json { Mode::Json } else { Mode::Text };
    let listing = menu::listing(&menu, &config.currency_symbol);
    let (timer, timer_rx) = TokioTimer::channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let reader = tokio::spawn(read_commands(menu.clone(), listing, mode, command_tx));

    let controller = OrderController::new(config, menu, TerminalRenderer::new(mode), timer);
    let controller = controller.run(command_rx, timer_rx).await;

    // The reader may still be blocked on stdin after the controller quits
    reader.abort();
    let items = controller.session().cart().len();
    info!(items, "Ordering session ended");
    Ok(())
}

/// Stream that replies to typed input are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replies {
    Stdout,
    Stderr,
}

impl Replies {
    const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Text => Self::Stdout,
            Mode::Json => Self::Stderr,
        }
    }

    fn say(self, text: &str) {
        let result = match self {
            Self::Stdout => write_flush(&mut std::io::stdout().lock(), text),
            Self::Stderr => write_flush(&mut std::io::stderr().lock(), text),
        };
        if let Err(e) = result {
            debug!("Failed to write reply: {e}");
        }
    }
}

fn write_flush(out: &mut impl std::io::Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// What to do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Send(Command),
    Reply(String),
    Skip,
}

fn step(line: &str, menu: &Menu, listing: &str) -> Step {
    match input::parse(line, menu) {
        Ok(Input::Command(command)) => Step::Send(command),
        Ok(Input::Help) => Step::Reply(HELP.to_string()),
        Ok(Input::ShowMenu) => Step::Reply(listing.to_string()),
        Ok(Input::Blank) => Step::Skip,
        Err(e) => Step::Reply(format!("{e}\n")),
    }
}

async fn read_commands(
    menu: Menu,
    listing: String,
    mode: Mode,
    commands: mpsc::UnboundedSender<Command>,
) {
    let replies = Replies::for_mode(mode);
    if mode == Mode::Text {
        replies.say(HELP);
        replies.say(&listing);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {e}");
                break;
            }
        };

        let command = match step(&line, &menu, &listing) {
            Step::Send(command) => command,
            Step::Reply(text) => {
                replies.say(&text);
                continue;
            }
            Step::Skip => continue,
        };

        let quit = command == Command::Quit;
        if commands.send(command).is_err() || quit {
            break;
        }
    }
    debug!("Input closed");
}
