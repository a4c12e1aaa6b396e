//! Platform abstraction layer
//!
//! Raw key state from whatever windowing layer drives the game is reduced
//! here to the two shapes the core understands: held-key control intent
//! for the simulation and discrete key presses for the state machine.

pub mod input;

pub use input::{Key, KeyboardState};
