//! 配置管理

pub mod settings;

pub use settings::Settings;
