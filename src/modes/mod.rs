pub mod human;

pub use human::{Control, HumanMode};
