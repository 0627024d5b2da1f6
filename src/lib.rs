// Library for tests to access modules

pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod overlay;
pub mod sampler;
pub mod settings;
pub mod sysinfo_repo;
pub mod version;
