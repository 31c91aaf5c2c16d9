//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod odds;
pub mod player;
pub mod round;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use odds::*;
pub use player::*;
pub use round::*;
