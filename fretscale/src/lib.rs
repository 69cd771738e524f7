//! fretscale: guitar scale explorer
//!
//! Layers, innermost first:
//! - `domain`: pitch classes, scale formulas, fretboard and resolver (pure)
//! - `application`: diagram layout and the scale/diagram/export services
//! - `infrastructure`: filesystem, image encoding, selector and DI container
//! - `cli`: argument parsing and command handlers

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
