//! Controllers turn player input and game events into world changes

mod game;
mod input;
mod ship;

pub use game::{GameController, GameTask};
pub use input::{InputAction, InputMode};
pub use ship::ShipController;
