use colored::*;
use tracing::info;

use netsweep_common::network::target::ScanResult;
use netsweep_core::scanner::ScanEvent;

use crate::terminal::logging::PRINT_TARGET;

pub const RESULT_MARKER: &str = "open";

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

/// Turns scan events into stdout lines.
///
/// Result lines are `<address>:<port>`, optionally prefixed with
/// [`RESULT_MARKER`]. Banner lines carry the scan's progress and can be silenced.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    mark: bool,
    quiet: bool,
}

impl Printer {
    pub fn new(mark: bool, quiet: bool) -> Self {
        Self { mark, quiet }
    }

    pub fn banner(&self, msg: &str) {
        if let Some(line) = self.banner_line(msg) {
            print(&line);
        }
    }

    pub fn event(&self, event: &ScanEvent) {
        if let Some(line) = self.line(event) {
            print(&line);
        }
    }

    /// The stdout line for `event`, if it produces one.
    pub fn line(&self, event: &ScanEvent) -> Option<String> {
        match event {
            ScanEvent::InterfacesFound(count) => {
                self.banner_line(&format!("Found {count} interface(s)"))
            }
            ScanEvent::NetworkStarted(block) => self.banner_line(&format!("Scan {block} network")),
            ScanEvent::Reachable(result) => Some(self.result_line(result)),
        }
    }

    pub fn banner_line(&self, msg: &str) -> Option<String> {
        if self.quiet {
            return None;
        }
        Some(format!("{}", msg.bold()))
    }

    fn result_line(&self, result: &ScanResult) -> String {
        if self.mark {
            format!("{} {result}", RESULT_MARKER.green().bold())
        } else {
            result.to_string()
        }
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
