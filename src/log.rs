use log::LevelFilter;

/// Initialize logging to stderr for the command-line tools.
///
/// # Behavior
/// - Logs at `level` unless `RUST_LOG` is set, which takes precedence.
/// - Safe to call more than once: returns `false` if a logger was already installed.
pub fn init_logger(level: LevelFilter) -> bool {
    use std::env;

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    let installed = builder.try_init().is_ok();
    if installed {
        log::debug!("logger initialized at {level:?} level");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_logger(LevelFilter::Warn);
        assert!(!init_logger(LevelFilter::Debug));
    }
}
