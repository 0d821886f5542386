//! Command-line interface handling

mod args;

pub use args::Cli;

use clap::error::ErrorKind;
use clap::Parser;

/// Outcome of reading the command line
pub enum Invocation {
    /// Arguments parsed; run the pipeline
    Run(Cli),
    /// Help, version or a usage error was printed; exit with this code
    Exit(u8),
}

/// Parse process arguments.
///
/// `--help`/`--version` exit 0, any usage error exits 1.
pub fn parse_args() -> Invocation {
    match Cli::try_parse() {
        Ok(cli) => Invocation::Run(cli),
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            Invocation::Exit(code)
        }
    }
}
