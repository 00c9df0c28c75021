use mdlocal_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // A read-only state dir must not stop a clone.
    logging::init();

    if let Err(err) = Cli::run_from_args() {
        tracing::error!("{:#}", err);
        eprintln!("[error] {:#}", err);
        std::process::exit(1);
    }
}
