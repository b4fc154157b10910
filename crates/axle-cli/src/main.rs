//! Command-line demos for the axle accessibility layer.

use std::collections::BTreeMap;
use std::error::Error;
use std::process::ExitCode;

use axle::a11y::{attribute, notification};
use axle::{Element, ProcessId, Value};
use clap::{Parser, Subcommand};
use serde::Serialize;

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "axle", about = "Inspect and drive applications through the accessibility service")]
struct Args {
  /// Compact JSON output (no pretty-printing)
  #[arg(long, global = true)]
  compact: bool,

  /// Messaging timeout in seconds for requests to the application (0 = service default)
  #[arg(long, global = true)]
  timeout: Option<f32>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the application's name and its windows' geometry
  Info { pid: i32 },
  /// Dump every attribute of the application element as JSON
  Dump {
    pid: i32,
    /// Only dump these attributes
    #[arg(long = "attribute")]
    attributes: Vec<String>,
  },
  /// Toggle whether the application is hidden
  Hide { pid: i32 },
  /// Print window move/resize notifications until interrupted
  Watch {
    pid: i32,
    /// Notification names to watch
    #[arg(long = "notification", default_values_t = [notification::MOVED.to_owned(), notification::WINDOW_RESIZED.to_owned()])]
    notifications: Vec<String>,
  },
  /// Perform the first available action on each of the application's windows
  Switch { pid: i32 },
  /// Report whether this process may use the accessibility service
  Trust {
    /// Ask the user to grant access if it has not been granted
    #[arg(long)]
    prompt: bool,
  },
}

#[derive(Serialize)]
#[serde(untagged)]
enum Entry {
  Value(Value),
  Error { error: String },
}

#[derive(Serialize)]
struct Dump {
  pid: ProcessId,
  attributes: BTreeMap<String, Entry>,
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  let args = Args::parse();

  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("{err}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: &Args) -> CliResult {
  match &args.command {
    Command::Info { pid } => info(&open(args, *pid)?),
    Command::Dump { pid, attributes } => dump(&open(args, *pid)?, attributes, args.compact),
    Command::Hide { pid } => hide(&open(args, *pid)?),
    Command::Watch { pid, notifications } => watch(&open(args, *pid)?, notifications),
    Command::Switch { pid } => switch(&open(args, *pid)?),
    Command::Trust { prompt } => {
      println!("enabled: {}", axle::is_enabled(*prompt));
      println!("trusted: {}", axle::is_trusted());
      Ok(())
    }
  }
}

/// Application element for `pid`, checked to really be an application.
fn open(args: &Args, pid: i32) -> Result<Element, Box<dyn Error>> {
  let app = axle::application(pid)?;
  if let Some(seconds) = args.timeout {
    app.set_timeout(seconds)?;
  }
  if app.get(attribute::ROLE)?.as_str() != Some("AXApplication") {
    return Err("This PID is not associated with an application.".into());
  }
  log::debug!("Opened application {pid}");
  Ok(app)
}

fn windows(app: &Element) -> Vec<Element> {
  if !app.contains(attribute::WINDOWS) {
    return Vec::new();
  }
  app
    .get(attribute::WINDOWS)
    .map(|windows| windows.elements().into_iter().cloned().collect())
    .unwrap_or_default()
}

fn info(app: &Element) -> CliResult {
  if app.contains(attribute::TITLE) {
    println!("Application name: {}", app.get(attribute::TITLE)?.as_str().unwrap_or_default());
  }

  let windows = windows(app);
  if windows.is_empty() {
    println!("No windows found for the application.");
    return Ok(());
  }
  println!("Windows found: {}", windows.len());
  for window in &windows {
    let Ok(values) = window.get_many([attribute::TITLE, attribute::SIZE, attribute::POSITION]) else {
      continue;
    };
    if let [title, Value::Size(size), Value::Point(position)] = values.as_slice() {
      println!(
        "    <{}> of size ({},{}) at position ({},{})",
        title.as_str().unwrap_or_default(),
        size.width,
        size.height,
        position.x,
        position.y
      );
    }
  }
  Ok(())
}

fn dump(app: &Element, only: &[String], compact: bool) -> CliResult {
  let names = if only.is_empty() { app.keys()? } else { only.to_vec() };
  let attributes = names
    .into_iter()
    .map(|name| {
      let entry = match app.get(&name) {
        Ok(value) => Entry::Value(value),
        Err(err) => Entry::Error {
          error: err.to_string(),
        },
      };
      (name, entry)
    })
    .collect();
  let dump = Dump {
    pid: app.pid().unwrap_or(ProcessId(0)),
    attributes,
  };

  let json = if compact {
    serde_json::to_string(&dump)?
  } else {
    serde_json::to_string_pretty(&dump)?
  };
  println!("{json}");
  Ok(())
}

fn hide(app: &Element) -> CliResult {
  if !app.contains(attribute::HIDDEN) || !app.can_set(attribute::HIDDEN)? {
    return Err("The application does not seem to be hide-able.".into());
  }
  let hidden = app.get(attribute::HIDDEN)?.as_bool().unwrap_or(false);
  app.set(attribute::HIDDEN, !hidden)?;
  log::info!("{} application", if hidden { "Unhid" } else { "Hid" });
  Ok(())
}

fn watch(app: &Element, notifications: &[String]) -> CliResult {
  app.set_callback(|element, name| {
    let title = element.get(attribute::TITLE)?;
    println!(
      "Notification <{}> for application <{}>.",
      name.unwrap_or("?"),
      title.as_str().unwrap_or_default()
    );
    Ok(())
  });
  app.watch(notifications)?;
  log::info!("Watching {}; press Ctrl-C to stop", notifications.join(", "));
  axle::run_event_loop();
  Ok(())
}

fn switch(app: &Element) -> CliResult {
  let windows = windows(app);
  let Some(first) = windows.first() else {
    return Err("The application does not seem to have any windows.".into());
  };

  let actions = first.actions()?;
  if actions.is_empty() {
    println!("No actions available.");
    return Ok(());
  }
  println!("Available actions for the windows: {actions:?}");
  for window in &windows {
    if let Some(action) = window.actions()?.first() {
      window.perform_action(action)?;
    }
  }
  Ok(())
}
