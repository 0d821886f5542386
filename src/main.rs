use std::process::ExitCode;
use tracing::error;
use fontpack::cli::{parse_args, Invocation};
use fontpack::utils::init_logging;
use fontpack::{BatchPipeline, Toolchain};

fn main() -> ExitCode {
    let cli = match parse_args() {
        Invocation::Run(cli) => cli,
        Invocation::Exit(code) => return ExitCode::from(code),
    };

    let config = cli.into_config();
    let log_file = init_logging(config.verbose);
    let toolchain = Toolchain::system(&config);

    let mut pipeline = BatchPipeline::new(config, toolchain).with_log_file(log_file);
    match pipeline.run() {
        // Individual font failures still count as a completed run
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(1)
        }
    }
}
