// Kommandozeilen-Einstieg: führt genau ein LED-Kommando aus und beendet sich
//
// Beispiele:
//   lighter on "b=4&c=FF2222"
//   lighter flash "c=FF2222"
//   lighter --script quick-flash flash "c=FF2222"
//   lighter --stub off

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use lighter::config::ScriptPreset;
use lighter::web::{CommandKind, LightQuery};
use lighter::{LighterConfig, build_controller, select_transport};

#[derive(Parser)]
#[command(name = "lighter")]
#[command(about = "Drive an SPI LED strip: static color or flash animation", long_about = None)]
struct Cli {
    /// JSON config file (strip length, SPI bus, flash script)
    #[arg(short, long, value_name = "FILE", env = "LIGHTER_CONFIG")]
    config: Option<PathBuf>,

    /// Only log frames instead of talking to the SPI device
    #[arg(long)]
    stub: bool,

    /// Built-in flash script, overrides the one from the config file
    #[arg(long, value_enum, value_name = "PRESET")]
    script: Option<ScriptPreset>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set every LED to one color, e.g. "b=4&c=FF2222"
    On {
        #[arg(default_value = "")]
        query: String,
    },
    /// Turn every LED off
    Off,
    /// Play the flash animation, e.g. "c=FF2222" (b= overrides start brightness)
    Flash {
        #[arg(default_value = "")]
        query: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LighterConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LighterConfig::default(),
    };
    if let Some(preset) = cli.script {
        config.flash.script = preset.script();
    }

    let transport = select_transport(&config, cli.stub);
    let mut controller = build_controller(&config, transport);

    let (kind, raw_query) = match &cli.command {
        Commands::On { query } => (CommandKind::On, query.as_str()),
        Commands::Off => (CommandKind::Off, ""),
        Commands::Flash { query } => (CommandKind::Flash, query.as_str()),
    };

    let query = LightQuery::parse(raw_query);
    if kind == CommandKind::On {
        print!("{}", query.describe(raw_query));
    }

    // LED-Fehler sind nicht fatal: loggen und normal beenden
    if let Err(e) = controller.execute(query.into_command(kind)) {
        error!("Command failed: {}", e);
    }

    // Animation zu Ende laufen lassen, bevor der Prozess endet
    controller.wait();
    info!("Done");
    Ok(())
}
