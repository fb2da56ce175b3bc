//! Console command handling
//!
//! Commands are shlex-split and parsed with clap, so quoting and `--help`
//! behave like a regular CLI. The trigger commands apply held-key repeat
//! suppression: a second `press` without an intervening `release` is
//! dropped.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::debug;

use depmelody_core::api::{MockApiHandle, TelemetryApi};
use depmelody_core::audio::AudioPlayer;
use depmelody_core::modes::ModeManager;
use depmelody_core::state::GameStatus;
use depmelody_types::Settings;

#[derive(Parser)]
#[command(version, about = "depmelody console", no_binary_name = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Press the trigger.
    Press,
    /// Release the trigger.
    Release,
    /// Show the current application state.
    Status,
    /// Set the master volume (0.0 to 1.0).
    Volume { value: f64 },
    /// Reload the audio profile from the configured file.
    ReloadProfile,
    /// Stage a train number for the next telemetry tick.
    Train { number: String },
    /// Stage the occupied track circuits for the next telemetry tick.
    Tracks { ids: Vec<String> },
    /// Stage the game status: running, paused or stopped.
    Game { status: String },
    /// Quit.
    Exit,
}

pub struct Repl {
    telemetry: MockApiHandle,
    settings: Settings,
    trigger_down: bool,
}

impl Repl {
    pub fn new(telemetry: MockApiHandle, settings: Settings) -> Self {
        Self {
            telemetry,
            settings,
            trigger_down: false,
        }
    }

    /// Handle one console line. Returns `Ok(true)` when the user quits.
    pub fn respond<P, A>(
        &mut self,
        line: &str,
        manager: &mut ModeManager<P, A>,
    ) -> Result<bool, String>
    where
        P: AudioPlayer,
        A: TelemetryApi,
    {
        let args = shlex::split(line).ok_or("error: invalid quoting")?;
        let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

        match cli.command {
            Commands::Press => {
                if self.trigger_down {
                    debug!("Suppressed repeated press from held trigger");
                } else {
                    self.trigger_down = true;
                    manager.on_button_pressed();
                }
            }
            Commands::Release => {
                if self.trigger_down {
                    self.trigger_down = false;
                    manager.on_button_released();
                }
            }
            Commands::Status => print_status(manager),
            Commands::Volume { value } => manager.set_volume(value),
            Commands::ReloadProfile => {
                match manager.reload_profile(Path::new(&self.settings.profile_file)) {
                    Ok(()) => println!("Profile reloaded"),
                    // The previous profile stays active on failure.
                    Err(e) => println!("{e}"),
                }
            }
            Commands::Train { number } => self.telemetry.set_train_number(&number),
            Commands::Tracks { ids } => self.telemetry.set_track_circuits(ids),
            Commands::Game { status } => match parse_game_status(&status) {
                Some(status) => self.telemetry.set_game_status(status),
                None => println!("unknown game status: {status}"),
            },
            Commands::Exit => {
                println!("quitting...");
                return Ok(true);
            }
        }

        Ok(false)
    }
}

fn parse_game_status(label: &str) -> Option<GameStatus> {
    match label {
        "running" => Some(GameStatus::Running),
        "paused" => Some(GameStatus::Paused),
        "stopped" => Some(GameStatus::Stopped),
        _ => None,
    }
}

fn print_status<P, A>(manager: &ModeManager<P, A>)
where
    P: AudioPlayer,
    A: TelemetryApi,
{
    let state = manager.state();

    println!("Mode:        {}", state.current_mode);
    println!("Game:        {:?}", state.game_status);
    println!("Train:       {}", state.train_number);
    println!("Direction:   {}", state.direction);
    match &state.current_station {
        Some(station) => println!("Station:     {station}"),
        None => println!("Station:     -"),
    }
    println!("Tracks:      {}", state.occupied_tracks.join(", "));
    match &state.current_audio_file {
        Some(file) => println!("Playing:     {}", file.display()),
        None => println!("Playing:     -"),
    }
}
