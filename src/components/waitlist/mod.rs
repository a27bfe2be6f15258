//! Waitlist sign-up: form, submission, and device-local de-duplication.
//!
//! A join is checked against the device's store before any request is made,
//! posted to the configured endpoint as URL-encoded form fields, and
//! remembered locally only once the endpoint accepts it.

mod error;
mod form;
pub mod store;
mod submission;
mod transport;

pub use error::{StorageError, WaitlistError};
pub use form::WaitlistForm;
pub use store::{BrowserStorage, DeviceStore, KeyValueStore, MemoryStore};
pub use submission::{JoinResult, Submission, Transport, Waitlist, parse_response};
pub use transport::FetchTransport;
