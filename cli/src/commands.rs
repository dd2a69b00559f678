pub mod scan;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "netsweep")]
#[command(about = "Probe every host of the local IPv4 networks for open TCP ports 1-1024.")]
pub struct CommandLine {
    /// Prefix reachable targets with "open" so they stand apart from banner lines
    #[arg(short, long)]
    pub mark: bool,
    /// Only print reachable targets
    #[arg(short, long)]
    pub quiet: bool,
    /// More diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
