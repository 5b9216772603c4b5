pub mod error;
pub mod game;
pub mod model;

pub use error::GameError;
