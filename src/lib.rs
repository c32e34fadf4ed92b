//! padwatch: gamepad/joystick change events.
//!
//! Polls input devices into per-tick [`Snapshot`]s and reports the channels
//! that changed between two consecutive snapshots as [`ChangeEvent`]s.
//!
//! - [`diff`]: the pure snapshot differ.
//! - [`ChangeTracker`]: the caller-owned one-slot baseline threaded between ticks.
//! - [`Manager`]: polls several sources, one tracker each, and feeds a [`ChangeBus`].

pub mod app;
pub mod backends;
pub mod config;
pub mod device;
pub mod diff;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod manager;
pub mod metadata;
pub mod snapshot;
pub mod tracker;

pub use config::Config;
pub use device::*;
pub use diff::{diff, Reading};
pub use error::{Error, Result};
pub use event::*;
pub use eventbus::*;
pub use manager::*;
pub use snapshot::*;
pub use tracker::*;
