use std::env;
use std::process;

use acme_synth::{cli, logging};

fn main() {
    let args: Vec<String> = env::args().collect();
    logging::init(cli::wants_verbose(&args));
    process::exit(cli::run_with_args(&args));
}
