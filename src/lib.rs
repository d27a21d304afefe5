//! Glance - Dashboard Command/Event Engine
//!
//! An embeddable state-management engine for BI dashboards: typed commands
//! validated against a normalized entity store, at most one async backend
//! load per command, atomic undoable mutation batches, and exactly one
//! correlated terminal event per command.

pub mod commands;
pub mod config;
pub mod context;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod events;
mod handlers;
pub mod interfaces;
pub mod logging;
pub mod model;
pub mod retry;
pub mod selectors;
pub mod store;
pub mod test_utils;
