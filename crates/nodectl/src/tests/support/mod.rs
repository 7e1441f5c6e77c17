//! Test doubles shared by unit and behaviour tests.

mod backend;
mod buffer;
mod reporter;
mod service;

pub use backend::RecordingBackend;
pub use buffer::SharedBuffer;
pub use reporter::{LifecycleEvent, RecordingLifecycleReporter};
pub use service::RecordingService;
