use std::path::{Path, PathBuf};

use anyhow::Result;
use canvas_game::config::{self, AppConfig};
use canvas_game::host::HeadlessHost;
use canvas_game::script::ScriptPlayer;
use canvas_game::session::Session;

/// Walks through the whole loop: new canvas, build, pause, save, load back.
const DEMO_SCRIPT: &str = r#"{ "steps": [
    { "menu": "new canvas" },
    { "dt": 0.016, "player": [4.0, 1.0, 4.0] },
    { "input": "5" },
    { "input": "right mouse down", "hover": { "position": [8, 0, 8], "normal": [0, 1, 0] } },
    { "input": "scroll up" },
    { "input": "right mouse down", "hover": { "position": [8, 1, 8], "normal": [0, 1, 0] } },
    { "input": "right mouse down", "hover": { "position": [4, 0, 4], "normal": [0, 1, 0] } },
    { "input": "left mouse down", "hover": { "position": [4, 0, 5], "normal": [0, 1, 0] } },
    { "input": "escape" },
    { "menu": "save canvas" },
    { "dt": 2.5 },
    { "menu": "new canvas" },
    { "input": "escape" },
    { "menu": "load canvas" }
] }"#;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(&args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config_path = config::flag_value(args, "--config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    let config = AppConfig::load_from_path(&config_path).apply_args(args);

    tracing::info!("Voxel canvas (headless)");
    tracing::debug!(
        "Window {}x{}, fullscreen: {}",
        config.window_size[0],
        config.window_size[1],
        config.fullscreen
    );

    let script = match config::flag_value(args, "--script") {
        Some(path) => ScriptPlayer::from_path(Path::new(path))?,
        None => {
            tracing::info!("No --script given, running the built-in demo");
            DEMO_SCRIPT.parse::<ScriptPlayer>()?
        }
    };

    tracing::info!("Running script with {} steps", script.step_count());

    let mut session = Session::new(&config);
    let mut host = HeadlessHost::new();
    session.attach(&mut host);

    let steps = script.run(&mut session, &mut host);

    let world = session.world();
    tracing::info!(
        "Script finished after {} steps: mode {}, {} player blocks, {} ground blocks",
        steps,
        session.mode(),
        world.player_block_count(),
        world.ground_count(),
    );
    if session.unsaved_changes() > 0 {
        tracing::warn!(
            "{} unsaved changes (save file: {})",
            session.unsaved_changes(),
            session.save_path().display()
        );
    }
    Ok(())
}
