//! Waitlist join flow: local de-duplication, POST, response interpretation.

use log::{info, warn};
use serde::Deserialize;

use super::error::WaitlistError;
use super::store::{KeyValueStore, LAST_JOINED_KEY, joined_key, normalize_email};

/// Form fields sent to the endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
	pub email: String,
	pub name: Option<String>,
	/// ISO-8601 time of the attempt.
	pub timestamp: String,
}

impl Submission {
	/// URL-encoded form fields in send order. `name` is omitted when blank.
	pub fn fields(&self) -> Vec<(&'static str, &str)> {
		let mut fields = vec![("email", self.email.as_str())];
		if let Some(name) = self.name.as_deref() {
			fields.push(("name", name));
		}
		fields.push(("timestamp", self.timestamp.as_str()));
		fields
	}
}

/// Accepted `result` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinResult {
	/// Newly added to the list.
	Success,
	/// The endpoint already had this email.
	Exists,
	/// The endpoint flagged a duplicate row.
	Duplicate,
}

impl JoinResult {
	fn from_result(result: &str) -> Option<Self> {
		match result {
			"success" => Some(Self::Success),
			"exists" => Some(Self::Exists),
			"duplicate" => Some(Self::Duplicate),
			_ => None,
		}
	}
}

#[derive(Debug, Deserialize)]
struct ScriptResponse {
	result: String,
	#[serde(default)]
	message: Option<String>,
}

/// Interpret the endpoint's JSON body.
pub fn parse_response(body: &str) -> Result<JoinResult, WaitlistError> {
	let response: ScriptResponse = serde_json::from_str(body)
		.map_err(|e| WaitlistError::Request(format!("unexpected response: {e}")))?;
	JoinResult::from_result(&response.result).ok_or_else(|| {
		WaitlistError::Rejected(match response.message {
			Some(message) => format!("{} ({message})", response.result),
			None => response.result,
		})
	})
}

/// Sends form fields to an endpoint and returns the raw response body.
#[allow(
	async_fn_in_trait,
	reason = "single-threaded browser futures; callers never need Send"
)]
pub trait Transport {
	async fn post_form(
		&self,
		endpoint: &str,
		fields: &[(&str, &str)],
	) -> Result<String, WaitlistError>;
}

/// Join flow bound to a device-local store.
pub struct Waitlist<S> {
	store: S,
}

impl<S: KeyValueStore> Waitlist<S> {
	pub fn new(store: S) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	/// Whether this device already joined with `email`.
	pub fn has_joined(&self, email: &str) -> bool {
		self.store.get(&joined_key(&normalize_email(email))).is_some()
	}

	/// Most recent email this device joined with.
	pub fn last_joined(&self) -> Option<String> {
		self.store.get(LAST_JOINED_KEY)
	}

	/// Check locally, submit, and remember a successful join.
	///
	/// No network call is made when configuration is missing, the email is
	/// blank, or this device already joined with the same email.
	pub async fn join<T: Transport>(
		&self,
		transport: &T,
		endpoint: &str,
		name: &str,
		email: &str,
		timestamp: &str,
	) -> Result<JoinResult, WaitlistError> {
		if endpoint.trim().is_empty() {
			return Err(WaitlistError::MissingEndpoint);
		}
		let email = normalize_email(email);
		if email.is_empty() {
			return Err(WaitlistError::MissingEmail);
		}
		if self.has_joined(&email) {
			return Err(WaitlistError::AlreadyJoined(email));
		}

		let name = name.trim();
		let submission = Submission {
			email,
			name: (!name.is_empty()).then(|| name.to_string()),
			timestamp: timestamp.to_string(),
		};

		let body = transport.post_form(endpoint, &submission.fields()).await?;
		let result = parse_response(&body)?;
		info!("peerly: waitlist join accepted ({:?})", result);

		self.remember(&submission);
		Ok(result)
	}

	fn remember(&self, submission: &Submission) {
		let writes = [
			(joined_key(&submission.email), submission.timestamp.as_str()),
			(LAST_JOINED_KEY.to_string(), submission.email.as_str()),
		];
		for (key, value) in writes {
			if let Err(e) = self.store.set(&key, value) {
				warn!("peerly: could not remember join: {}", e);
			}
		}
	}
}
