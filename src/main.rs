#[cfg(not(target_arch = "wasm32"))]
use quote_board::BoardConfig;

/// Environment variable naming an optional JSON configuration file.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "QUOTE_BOARD_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> BoardConfig {
    let mut config = match std::env::var(CONFIG_ENV) {
        Ok(path) => match BoardConfig::from_file(std::path::Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring config file {path}: {err}");
                BoardConfig::default()
            }
        },
        Err(_) => BoardConfig::default(),
    };

    // First argument overrides the quotes file location
    if let Some(source) = std::env::args().nth(1) {
        config.quotes_source = source;
    }
    config
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Run the quote board
    quote_board::run_app(load_config())
}

// The browser build starts from `quote_board::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
