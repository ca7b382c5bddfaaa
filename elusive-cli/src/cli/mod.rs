pub mod output;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "elusive",
    version,
    about = "Find abundant taxa in reads that were missed by assembly and binning",
    long_about = "Elusive compares observation databases built from raw reads, assemblies, \
                  and genome bins, and reports taxa that are well-supported by reads yet \
                  absent from bins, prioritising them for targeted re-assembly and binning."
)]
pub struct Cli {
    /// Reads corpus database (file or .sdb bundle directory)
    #[arg(long, value_name = "PATH")]
    pub reads_db: PathBuf,

    /// Bins corpus database (file or .sdb bundle directory)
    #[arg(long, value_name = "PATH")]
    pub bins_db: PathBuf,

    /// Assemblies corpus database
    #[arg(long, value_name = "PATH")]
    pub assemblies_db: Option<PathBuf>,

    /// Workspace database kept for later inspection (defaults to in-memory)
    #[arg(long, value_name = "PATH")]
    pub output_db: Option<PathBuf>,

    /// Output report (CSV)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Overwrite a pre-existing non-empty output workspace
    #[arg(long)]
    pub force: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
