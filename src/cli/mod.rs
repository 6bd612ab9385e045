pub mod adjust;
pub mod schedule;
pub mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    storage::{hours::HoursStore, kv::FileKeyValueStore},
    utils::{
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

use adjust::{process_adjust_command, AdjustCommand};
use schedule::{process_schedule_command, ScheduleCommand};
use view::{process_view_command, ViewCommand};

#[derive(Parser, Debug)]
#[command(name = "Workhours", version, long_about = None)]
#[command(about = "Track daily worked hours against a configurable schedule", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show worked and projected hours for the current and previous month")]
    View {
        #[command(flatten)]
        command: ViewCommand,
    },
    #[command(about = "Record the hours actually worked on a specific day")]
    Adjust {
        #[command(flatten)]
        command: AdjustCommand,
    },
    #[command(about = "Show or change the default hours per workday")]
    Schedule {
        #[command(flatten)]
        command: ScheduleCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        CLI_PREFIX,
        &create_application_default_path()?,
        logging_level,
        args.log,
    )?;

    match args.commands {
        Commands::View { command } => process_view_command(command).await,
        Commands::Adjust { command } => process_adjust_command(command).await,
        Commands::Schedule { command } => process_schedule_command(command).await,
    }
}

fn open_hours_store() -> Result<HoursStore<FileKeyValueStore>> {
    let store = FileKeyValueStore::new(create_application_default_path()?)?;
    Ok(HoursStore::new(store))
}
