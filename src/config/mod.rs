pub mod settings;

pub use settings::{AppConfig, default_katas};
