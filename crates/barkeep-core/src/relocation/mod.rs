pub mod engine;
pub mod errors;
pub mod types;

pub use engine::{RelocationEngine, drop_point};
pub use errors::MoveError;
pub use types::{
    DEFAULT_DRAG_DELAY, Destination, MoveOutcome, MoveRequest, RelocationSettings,
};
