//! Opens a non-resizable Vulkan window and logs its input events until it is
//! closed.
//!
//! Usage: `window_app [config.toml|config.ron]`. Set `RUST_LOG` to change the
//! log level (default `info`).

use vk_window::prelude::*;

fn load_config() -> Result<WindowConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading window configuration from {}", path);
            WindowConfig::load_from_file(&path)
        }
        None => Ok(WindowConfig::default()),
    }
}

fn run(config: WindowConfig) -> WindowResult<()> {
    let mut context = WindowContext::with_glfw(config);
    context.init()?;

    log::info!(
        "'{}' ready with {} physical device(s)",
        context.application_name(),
        context.physical_devices().len()
    );

    context.main_loop()?;
    context.cleanup()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {:?}", panic_info);

        if let Some(location) = panic_info.location() {
            eprintln!("Panic location: {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = load_config().map_err(|e| {
        log::error!("Configuration error: {}", e);
        e
    })?;

    log::info!(
        "Starting {}x{} window '{}'",
        config.width,
        config.height,
        config.title
    );

    match run(config) {
        Ok(()) => {
            log::info!("Window closed cleanly");
            Ok(())
        }
        Err(e) => {
            log::error!("Application error: {}", e);
            Err(e.into())
        }
    }
}
