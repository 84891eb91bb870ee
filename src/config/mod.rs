//! Configuration management

mod settings;

pub use settings::Settings;
