use std::io;

use showdown_cli::logging::init_logging;

fn main() {
    init_logging();
    let code = showdown_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
