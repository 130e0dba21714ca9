//! Torus Snake - a real-time Snake game on a wraparound grid
//!
//! This library provides:
//! - Core game logic (game module): snake, food, toroidal grid, per-tick engine
//! - Keyboard mapping (input module)
//! - Cell canvas and TUI rendering (render module)
//! - Session counters (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
