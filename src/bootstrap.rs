//! Process start-up shared by both binaries: logging, panic reporting and config.

use log::LevelFilter;

use crate::config::{self, Config};

/// Initializes logging, then loads the config from the platform config directory.
///
/// Logging starts at `Info` so config creation is reported, and is narrowed to the
/// configured level once the file is parsed.
pub fn start() -> Result<Config, String> {
    init_logging();
    log::set_max_level(LevelFilter::Info);

    let config_file = config::default_config_path()
        .ok_or_else(|| "no config directory available on this platform".to_string())?;
    let config = config::load_or_create_config(&config_file)?;
    log::set_max_level(config.logging.level_filter());
    log::debug!("Using config {}", config_file.display());
    Ok(config)
}

fn init_logging() {
    let mut clog = colog::default_builder();
    clog.filter(None, LevelFilter::Trace);
    clog.init();

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));
}
