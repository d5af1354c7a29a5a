use recovery_plot::plot::parse_cli;
use tracing_subscriber::EnvFilter;

/// logs go to stderr; RUST_LOG wins over the default level, -v forces debug
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = parse_cli();
    init_tracing(args.verbose);
    if let Err(e) = recovery_plot::run(&args.csvin, &args.pngout) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
