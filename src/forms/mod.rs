//! Form engine: the live session, secret masking, per-slot panels, and the
//! dual-slot orchestrator.

pub mod dual;
pub mod error;
pub mod panel;
pub mod secrets;
pub mod session;

pub use dual::DualSlotForm;
pub use error::{FieldErrorKind, FormError};
pub use panel::SlotPanel;
pub use secrets::{apply_secret_input, serialize_secret, ExistingSecrets, SecretCipher};
pub use session::FormSession;
