//! Data-driven scene content and loaders.
//!
//! This crate houses the loaders that turn data files into simulation
//! state:
//! - Scene layouts (data-driven via RON)
//! - Gameplay tuning (data-driven via TOML)
//!
//! Content is consumed at setup time and never appears in game state
//! afterwards. Loaders validate hard errors (duplicate ids, dangling
//! references) but deliberately let suspicious-but-legal portal
//! configurations through with warnings, matching the permissive link
//! model of the core.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{LevelLoader, LevelWarning, LoadedLevel, TuningLoader};
