//! SketchCAM CLI
//!
//! Compile sketches to G-code and hand programs to a LinuxCNC controller.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sketchcam::commands;
use sketchcam::designer::save_program;
use sketchcam_core::Axis;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sketchcam")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
#[command(about = "Compile sketches of simple shapes into envelope-fitted G-code", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a sketch file to G-code
    Generate {
        /// Sketch JSON file
        sketch: PathBuf,

        /// Write the program here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a program to the hand-off path and start it on the controller
    Send {
        /// Sketch JSON file, or an existing .ngc/.nc/.gcode program
        input: PathBuf,

        /// Log controller requests instead of connecting
        #[arg(long)]
        dry_run: bool,
    },

    /// Machine power and status
    Machine {
        #[command(subcommand)]
        command: MachineCommands,
    },

    /// Start a continuous jog
    Jog {
        /// Axis to jog (x, y or z)
        axis: Axis,

        /// Jog in the negative direction
        #[arg(short, long)]
        negative: bool,

        /// Jog speed; defaults to the configured speed
        #[arg(short, long)]
        speed: Option<f64>,

        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum MachineCommands {
    /// Reset the emergency stop and power on
    On {
        #[arg(long)]
        dry_run: bool,
    },
    /// Power off
    Off {
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the machine state
    Status {
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    sketchcam::init_logging(cli.verbose)?;

    if let Commands::Config {
        command: ConfigCommands::Init { force },
    } = cli.command
    {
        let path = commands::resolve_config_path(cli.config.as_deref())?;
        commands::init_config(&path, force)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let (config, config_path) = commands::load_config(cli.config.as_deref())?;
    tracing::debug!("Using config {}", config_path.display());

    match cli.command {
        Commands::Generate { sketch, output } => {
            let generation = commands::generate_from_sketch(&sketch, &config)?;
            match output {
                Some(path) => save_program(&path, &generation.program)?,
                None => println!("{}", generation.gcode()),
            }
        }
        Commands::Send { input, dry_run } => {
            let program = commands::program_text(&input, &config)?;
            let mut controller = commands::connect(&config, dry_run).await?;
            let result = commands::send_program(controller.as_mut(), &program, &config).await;
            let closed = controller.disconnect().await;
            result?;
            closed?;
        }
        Commands::Machine { command } => {
            let (dry_run, power) = match command {
                MachineCommands::On { dry_run } => (dry_run, Some(true)),
                MachineCommands::Off { dry_run } => (dry_run, Some(false)),
                MachineCommands::Status { dry_run } => (dry_run, None),
            };
            let mut controller = commands::connect(&config, dry_run).await?;
            let state = match power {
                Some(on) => commands::set_power(controller.as_mut(), on).await,
                None => controller.query_state().await.map_err(Into::into),
            };
            let closed = controller.disconnect().await;
            println!("LinuxCNC Status: {}", state?);
            closed?;
        }
        Commands::Jog {
            axis,
            negative,
            speed,
            dry_run,
        } => {
            let mut controller = commands::connect(&config, dry_run).await?;
            let speed = speed.unwrap_or(config.jog.speed);
            let result = commands::jog(controller.as_mut(), axis, negative, speed).await;
            let closed = controller.disconnect().await;
            result?;
            closed?;
        }
        Commands::Config { .. } => {
            let text = toml::to_string_pretty(&config).context("Failed to render config")?;
            print!("{}", text);
        }
    }

    Ok(())
}
