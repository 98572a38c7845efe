use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the stderr log subscriber. `-q` keeps only errors; each `-v`
/// raises the level one step from the default of warnings.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // A subscriber may already be installed when embedded in a test harness.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
