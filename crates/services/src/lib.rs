#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod pacing;
pub mod runtime;

pub use quiz_core::Clock;

pub use controller::{QuizController, Screen, Step};
pub use error::{PacingError, RuntimeError};
pub use pacing::Pacing;
pub use runtime::{Presenter, QuizRuntime};
