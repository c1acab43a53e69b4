mod cli;

use cli::commands::Command;
use cli::Hive;
use structopt::StructOpt;

#[cfg(feature = "instrumentation")]
fn with_instrumentation(run: impl FnOnce()) {
    if let Err(error) = hive::instrumentation::init() {
        eprintln!("failed to install span timing: {}", error);
    }
    run();
    hive::instrumentation::report();
}

#[cfg(not(feature = "instrumentation"))]
fn with_instrumentation(run: impl FnOnce()) {
    run();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    with_instrumentation(|| Hive::from_args().execute());
}
