//! Configuration: project settings and the secret loader used by host
//! processes.

pub mod loader;
pub mod settings;

pub use loader::{ConfigLoader, MASTER_PASSWORD_ENV};
pub use settings::Settings;
