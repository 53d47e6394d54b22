use clap::Parser;
use std::path::PathBuf;

/// Uploads finished capture clips to the liveness service, one at a time.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Finished video clips, in capture order.
    #[arg(required = true, value_name = "CLIP")]
    pub clips: Vec<PathBuf>,
}
