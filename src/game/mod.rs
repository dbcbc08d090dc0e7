// Game engine modules

pub mod engine;
pub mod grid;
pub mod path;
pub mod scheduler;
pub mod scorer;
pub mod validator;

pub use engine::{GameEngine, RejectReason, SubmitOutcome};
pub use validator::WordValidator;
