use resfetch_core::logging;

mod cli;

fn main() {
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = cli::run_from_args() {
        eprintln!("resfetch error: {:#}", err);
        std::process::exit(1);
    }
}
