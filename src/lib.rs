//! Sliding-tile number puzzle played with mouse drags.
//!
//! [`puzzle`] holds the board and move rules, [`gesture`] turns pointer drags
//! into moves, and [`game::Game`] ties them together behind the calls a host
//! makes. [`terminal`] is the crossterm host used by the binary.

pub mod config;
pub mod error;
pub mod game;
pub mod gesture;
pub mod puzzle;
pub mod terminal;

pub use config::Config;
pub use error::{PuzzleError, Result};
pub use game::Game;
pub use gesture::{DragSession, Gesture, GestureTranslator, Point};
pub use puzzle::{Direction, Grid, Position};
