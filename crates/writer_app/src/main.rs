use std::path::PathBuf;

use clap::Parser;

mod platform;

use platform::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "writer")]
#[command(version)]
#[command(about = "Terminal front end for the SolidWriting document buffer")]
pub struct Args {
    /// Document to open at startup
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory holding settings.ron
    #[arg(long, value_name = "DIR")]
    pub settings_dir: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Start with the power saver enabled
    #[arg(long)]
    pub power_saver: bool,

    /// Render the view as one JSON object per line
    #[arg(long)]
    pub json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    platform::run_app(args)
}
