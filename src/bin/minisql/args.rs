use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Run a single query and exit instead of starting the prompt.
    pub query: Option<String>,

    /// Directory table names resolve against. Remembered as the default
    /// for later runs.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}
