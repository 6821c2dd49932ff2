//! REST clients for the dashboard backend.

pub mod notes;
pub mod queue;

pub use notes::{Note, NotePayload, NotesClient};
pub use queue::QueueClient;
