pub mod errors;
pub mod source;
pub mod types;

pub use errors::WindowError;
pub use source::{WindowSource, restrict_to_display};
pub use types::{DisplayInfo, ProcessIdentity, SnapshotScope, WindowId, WindowRecord};
