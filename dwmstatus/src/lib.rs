//! Status line generator for the dwm status bar.
//!
//! Every tick the daemon reads the network byte counters, turns them into
//! receive/transmit rates, adds battery, volume and clock fields and sets
//! the result as the X root window name (and prints it to stdout):
//!
//! ```text
//! ↓1,5kB ↑ 12kB  -  ↓Discharging 87%  -  ♫55%  -  Mon 02 Jan 2006 15:04
//! ```
//!
//! # Modules
//!
//! - [`counters`] - reads and aggregates `/proc/net/dev`
//! - [`tracker`] - turns cumulative counters into per-tick deltas
//! - [`rate`] - fixed-width unit-scaled rate rendering
//! - [`providers`] - power, volume and clock fields
//! - [`sink`] - title and stdout publishing
//! - [`scheduler`] - the tick loop

pub mod config;
pub mod counters;
pub mod providers;
pub mod rate;
pub mod scheduler;
pub mod sink;
pub mod tracker;
