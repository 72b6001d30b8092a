//! Seatbelt - a belt switch client for the Raspberry Pi
//!
//! Watches the belt switch, mirrors its state to an LED and a terminal
//! dashboard, and keeps a remote seatbelt service in step.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod gpio;
pub mod logging;
pub mod remote;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
