mod commands;
mod logging;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::info;

use depmelody_core::api::{ApiClient, MockApi};
use depmelody_core::audio::{AudioPlayer, AudioRepository, RodioPlayer};
use depmelody_core::modes::ModeManager;
use depmelody_core::settings::SettingsExt;
use depmelody_core::stations::StationTable;
use depmelody_types::Settings;

use commands::Repl;

const UPDATE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(version, about = "Traincrew departure melody companion")]
struct Args {
    /// Settings file override; defaults to the platform config location.
    #[arg(long)]
    settings: Option<PathBuf>,
}

// Single-threaded runtime on purpose: the audio output stream and the mode
// manager both live in this task for the whole session.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let _log_guard = logging::init(&settings.log_level);

    info!(
        profile = %settings.profile_file,
        stations = %settings.station_file,
        "Starting depmelody"
    );
    if settings.enable_keyboard {
        info!(key = %settings.input_key, topmost = ?settings.topmost, "Trigger configured");
    }

    // Startup failures here are fatal and surfaced to the operator.
    let stations =
        StationTable::load(Path::new(&settings.station_file)).map_err(|e| e.to_string())?;

    let mut audio = AudioRepository::new();
    audio
        .load_profile(Path::new(&settings.profile_file))
        .map_err(|e| e.to_string())?;

    let mut player = RodioPlayer::new().map_err(|e| e.to_string())?;
    player.set_volume(settings.volume);

    // The game endpoint is driven through the console (`train`, `tracks`,
    // `game`) via the scripted provider.
    let (api, telemetry) = MockApi::new();
    let mut client = ApiClient::new(api);
    if !client.connect() {
        return Err("failed to connect to telemetry".to_string());
    }

    let mut manager = ModeManager::new(player, audio, client, stations);
    let mut repl = Repl::new(telemetry, settings);

    let mut interval = tokio::time::interval(UPDATE_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                manager.update().await;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match repl.respond(line, &mut manager) {
                            Ok(true) => break,
                            Ok(false) => {}
                            Err(err) => println!("{err}"),
                        }
                    }
                    Ok(None) => break,
                    Err(e) => return Err(e.to_string()),
                }
            }
        }
    }

    Ok(())
}
