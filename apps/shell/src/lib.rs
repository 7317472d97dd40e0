//! # tally-shell: Interactive Cart Host
//!
//! Thin host around `tally-core`. It collects input, dispatches commands,
//! and renders views. All cart rules live in the core.
//!
//! ## Module Structure
//! ```text
//! tally-shell/src/
//! ├── lib.rs          ← You are here (CLI, startup, input loop)
//! ├── main.rs         ← Binary entry point
//! ├── error.rs        ← ApiError (code + message)
//! ├── render.rs       ← Cart / Checkout text views
//! ├── state/
//! │   ├── config.rs   ← ShellConfig (defaults, TALLY_* env)
//! │   └── session.rs  ← CartSession (store + session id)
//! └── commands/
//!     ├── mod.rs      ← Line parser
//!     └── cart.rs     ← Cart command handlers
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::cart::{self as cart_cmd, CartResponse};
use commands::{Command, HELP};
use error::ApiError;
use state::{CartSession, PricingMode, ShellConfig};

/// Tally - an in-memory shopping cart driven from standard input
#[derive(Debug, Parser)]
#[command(name = "tally-shell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pricing rules (overrides TALLY_PRICING)
    #[arg(long, value_enum)]
    pub pricing: Option<PricingMode>,

    /// Emit one JSON object per response instead of text views
    #[arg(long)]
    pub json: bool,

    /// Refuse checkout while the cart is empty
    #[arg(long)]
    pub require_items: bool,
}

impl ShellConfig {
    /// Applies command line flags on top of env/default values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(pricing) = cli.pricing {
            self.pricing = pricing;
        }
        if cli.json {
            self.json_output = true;
        }
        if cli.require_items {
            self.require_items_for_checkout = true;
        }
    }
}

/// What the input loop should do after a line.
#[derive(Debug)]
pub enum Outcome {
    /// Redraw with this cart state.
    Render(CartResponse),
    /// Show an error; the cart is unchanged.
    Failed(ApiError),
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

/// Runs the shell against the process's stdin/stdout.
///
/// ## Startup Sequence
/// 1. Parse flags
/// 2. Initialize logging (stderr)
/// 3. Load and validate configuration
/// 4. Create the cart session
/// 5. Read commands until EOF or `quit`
pub fn run() -> Result<(), ApiError> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ShellConfig::from_env();
    config.apply_cli(&cli);
    config.validate()?;

    let mut session = CartSession::new(&config);
    info!(
        session = %session.id(),
        pricing = ?config.pricing,
        json = config.json_output,
        "cart session started"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &mut session,
        stdin.lock(),
        stdout.lock(),
        config.json_output,
    )?;

    info!(session = %session.id(), "cart session ended");
    Ok(())
}

/// Drives a session from `input` until EOF or `quit`, writing views to `output`.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut CartSession,
    input: R,
    mut output: W,
    json: bool,
) -> Result<(), ApiError> {
    if !json {
        write!(output, "{}", render::view(&cart_cmd::get_cart(session)))?;
    }

    for line in input.lines() {
        let outcome = execute(session, &line?);
        let text = match &outcome {
            Outcome::Nothing => continue,
            Outcome::Quit => break,
            Outcome::Help if json => format!("{}\n", serde_json::json!({ "help": HELP })),
            Outcome::Help => format!("{HELP}\n"),
            Outcome::Render(response) if json => format!("{}\n", serde_json::to_string(response)?),
            Outcome::Render(response) => render::view(response),
            Outcome::Failed(err) if json => format!("{}\n", serde_json::to_string(err)?),
            Outcome::Failed(err) => render::error(err),
        };
        output.write_all(text.as_bytes())?;
        output.flush()?;
    }

    Ok(())
}

/// Parses and executes one input line.
pub fn execute(session: &mut CartSession, line: &str) -> Outcome {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Outcome::Nothing,
        Err(err) => {
            warn!(line, error = %err, "could not parse command");
            return Outcome::Failed(err);
        }
    };

    let result = match command {
        Command::Add {
            name,
            price,
            quantity,
            description,
        } => cart_cmd::add_to_cart(session, &name, &price, &quantity, &description),
        Command::Set { field, value } => cart_cmd::set_draft_field(session, field, value),
        Command::Submit => cart_cmd::submit_draft(session),
        Command::Clear => cart_cmd::clear_draft(session),
        Command::Remove { id } => cart_cmd::remove_from_cart(session, id),
        Command::Checkout => cart_cmd::enter_checkout(session),
        Command::Back => Ok(cart_cmd::exit_checkout(session)),
        Command::Show => Ok(cart_cmd::get_cart(session)),
        Command::Help => return Outcome::Help,
        Command::Quit => return Outcome::Quit,
    };

    match result {
        Ok(response) => Outcome::Render(response),
        Err(err) => Outcome::Failed(err),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_core=trace` - Show trace for the core only
/// - Default: INFO, DEBUG for tally crates
///
/// Logs go to stderr so stdout carries only views.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally_core=debug,tally_shell=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
