//! Interfaces to the backend services the engine loads entities from.

mod insight_loader;

pub use insight_loader::{InsightLoader, LoadError};
