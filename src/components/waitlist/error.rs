//! Error types for the waitlist join flow.

use thiserror::Error;

/// Why a join attempt did not succeed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WaitlistError {
	/// No submission endpoint was configured at build time or in the page.
	#[error("waitlist endpoint is not configured")]
	MissingEndpoint,

	/// The email field was blank after trimming.
	#[error("email address is empty")]
	MissingEmail,

	/// This device already joined with the same email.
	#[error("{0} has already joined on this device")]
	AlreadyJoined(String),

	/// The request failed or the response could not be read.
	#[error("request failed: {0}")]
	Request(String),

	/// The endpoint answered with a result other than an accepted one.
	#[error("endpoint rejected submission: {0}")]
	Rejected(String),
}

/// The device's store refused a write.
///
/// Only ever logged: a join the endpoint accepted stays accepted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("local storage error: {0}")]
pub struct StorageError(pub String);

impl WaitlistError {
	/// One sentence suitable for showing under the form.
	pub fn user_message(&self) -> String {
		match self {
			Self::MissingEndpoint => {
				"Sign-ups are not open yet. Please check back soon.".to_string()
			}
			Self::MissingEmail => "Please enter your email address.".to_string(),
			Self::AlreadyJoined(email) => format!("{email} is already on the waitlist."),
			Self::Request(_) => {
				"We couldn't reach the waitlist right now. Please try again.".to_string()
			}
			Self::Rejected(_) => {
				"The waitlist didn't accept that submission. Please try again.".to_string()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_messages_name_the_duplicate() {
		let msg = WaitlistError::AlreadyJoined("a@b.co".into()).user_message();
		assert_eq!(msg, "a@b.co is already on the waitlist.");
	}

	#[test]
	fn display_keeps_detail_for_logs() {
		let err = WaitlistError::Rejected("error".into());
		assert_eq!(err.to_string(), "endpoint rejected submission: error");
		assert_ne!(err.user_message(), err.to_string());
	}
}
