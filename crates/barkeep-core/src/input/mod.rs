pub mod backend;
pub mod channel;
pub mod completion;
pub mod errors;
pub mod registry;
pub mod types;

pub use backend::{CursorControl, InputBackend};
pub use channel::{DEFAULT_EVENT_TIMEOUT, SyntheticInputChannel};
pub use completion::{Resolution, Resolver, Waiter, completion};
pub use errors::InputError;
pub use registry::{MonitorId, MonitorRegistry};
pub use types::{EventFilter, ModifierFlags, MouseEventKind, SyntheticEvent, TapLocation};
