mod settings;

pub use settings::{Config, CONFIG_FILE_NAME};
