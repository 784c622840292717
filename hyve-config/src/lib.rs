//! Shared configuration library for the HYVE client.
//!
//! Resolves where the recommendation service lives, how long a submission may
//! wait, and which decorative images the card renderer uses. Sources are
//! layered (defaults, TOML file, `.env`, process environment, explicit
//! overrides) and the result passes through guard rails before use.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{ClientConfig, ConfigMetadata, ImageConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
