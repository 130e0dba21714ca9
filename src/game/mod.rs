//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The grid is toroidal: a snake leaving one edge reappears on the opposite one.

pub mod config;
pub mod direction;
pub mod engine;
pub mod entity;
pub mod food;
pub mod grid;
pub mod snake;

// Re-export commonly used types
pub use config::{GameConfig, Palette, Rgb};
pub use direction::Direction;
pub use engine::{GameEngine, ResetReason, StepResult};
pub use entity::{Entity, EntityKind};
pub use food::Food;
pub use grid::{Grid, Position};
pub use snake::Snake;
