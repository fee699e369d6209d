//! Tick-driven grid snake: a body list, a heading buffer, and the
//! menu/play/crash/dismantle cycle, kept apart from terminal I/O.

pub mod body;
pub mod config;
pub mod coord;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
