//! Async collaborator services consulted by the configuration forms.
//!
//! Every service degrades on failure (logged, empty or absent result); a dead
//! collaborator never blocks the rest of the form.

pub mod crypto;
pub mod debounce;
pub mod geocoding;
pub mod system;
pub mod timezone;

pub use crypto::AesGcmCipher;
pub use debounce::{DebounceTicket, Debouncer, SEARCH_DEBOUNCE};
pub use geocoding::GeocodingClient;
pub use system::{available_disks, network_interfaces, spawn_poller, SystemMonitor, SystemSnapshot};
pub use timezone::{is_valid_timezone, TimezoneClient};
