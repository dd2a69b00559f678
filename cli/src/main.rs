mod commands;
mod terminal;

use commands::{CommandLine, scan};
use terminal::{logging, print::Printer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose)?;
    let printer = Printer::new(commands.mark, commands.quiet);

    scan::scan(&printer).await
}
