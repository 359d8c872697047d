use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use chrono::Local;
use writer_core::{update, AppState, Effect, Msg, Session, APP_DISPLAY_NAME};
use writer_engine::{load_or_default, RonSettingsStore};
use writer_logging::{writer_debug, writer_info};

use super::commands::{self, Command};
use super::effects::EffectRunner;
use super::source::SharedDocument;
use super::{battery, logging, render};
use crate::Args;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let settings_dir = args.settings_dir.clone().unwrap_or_else(default_settings_dir);
    logging::initialize(
        args.log,
        writer_logging::parse_level(&args.log_level),
        &settings_dir,
    );
    writer_info!("starting {}", APP_DISPLAY_NAME);

    let store = RonSettingsStore::new(settings_dir);
    let settings = load_or_default(&store);
    let session = settings.session();

    let shared = Arc::new(Mutex::new(SharedState::default()));
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let source = Arc::new(SharedDocument::new(shared.clone(), msg_tx.clone()));
    let mut runner = EffectRunner::new(source, store, settings, msg_tx.clone())?;

    let _ = msg_tx.send(startup_msg(session, args.file));
    if args.power_saver {
        let _ = msg_tx.send(Msg::PowerSaverToggled {
            enabled: true,
            battery: battery::read_battery(),
        });
    }

    spawn_input_reader(msg_tx.clone());

    // Background tick to coalesce rendering.
    thread::spawn(move || {
        while msg_tx.send(Msg::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let mut stdout = io::stdout();
    let mut render_pending = true;
    for msg in msg_rx {
        let is_tick = matches!(msg, Msg::Tick);
        let (effects, view_changed) = dispatch_msg(&shared, msg);
        render_pending |= view_changed;

        if runner.run(effects).is_break() {
            write_view(&mut stdout, &shared, args.json)?;
            break;
        }
        if is_tick && render_pending {
            write_view(&mut stdout, &shared, args.json)?;
            render_pending = false;
        }
    }

    writer_info!("{} exiting", APP_DISPLAY_NAME);
    Ok(())
}

#[derive(Default)]
pub(super) struct SharedState {
    pub(super) state: AppState,
}

/// Restore message for startup. A file named on the command line replaces
/// the remembered one; a remembered file that no longer exists is forgotten.
fn startup_msg(mut session: Session, open: Option<PathBuf>) -> Msg {
    if let Some(file) = session.file.take() {
        if file.exists() {
            session.file = Some(file);
        } else {
            writer_info!("last file {:?} no longer exists", file);
        }
    }
    Msg::RestoreSettings { session, open }
}

/// Apply one message; returns the effects and whether the view needs redrawing.
fn dispatch_msg(shared: &Mutex<SharedState>, msg: Msg) -> (Vec<Effect>, bool) {
    let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
    let state = std::mem::take(&mut guard.state);
    let (mut state, effects) = update(state, msg);
    let view_changed = state.consume_view_changed();
    guard.state = state;
    (effects, view_changed)
}

fn write_view(out: &mut impl Write, shared: &Mutex<SharedState>, json: bool) -> io::Result<()> {
    let view = shared
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .state
        .view();
    writeln!(out, "{}", render::render(&view, json, Local::now()))?;
    out.flush()
}

/// Each stdin line becomes a message; end of input quits.
fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_lines(stdin.lock(), &msg_tx);
        let _ = msg_tx.send(Msg::QuitRequested);
    });
}

/// Parse lines into messages until input ends or the receiver goes away.
fn forward_lines(input: impl BufRead, msg_tx: &mpsc::Sender<Msg>) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        let command = commands::parse(&line);
        if let Command::Invalid(reason) = &command {
            eprintln!("? {reason}");
            continue;
        }
        let Some(msg) = command.into_msg() else {
            continue;
        };
        writer_debug!("input -> {:?}", msg);
        if msg_tx.send(msg).is_err() {
            return;
        }
    }
}

/// `$XDG_CONFIG_HOME/solidwriting`, falling back to `~/.config/solidwriting`.
fn default_settings_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("solidwriting")
}
