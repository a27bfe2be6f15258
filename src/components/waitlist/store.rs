//! Device-local record of waitlist sign-ups.
//!
//! Entries never expire. Keys:
//! - `peerly:joined:<normalized email>` → ISO-8601 timestamp of the join
//! - `peerly:last-joined-email` → the most recent normalized email

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;
use web_sys::Storage;

use super::error::StorageError;

const JOINED_PREFIX: &str = "peerly:joined:";
/// Key holding the most recently joined email.
pub const LAST_JOINED_KEY: &str = "peerly:last-joined-email";

/// Key for a normalized email's join record.
pub fn joined_key(normalized_email: &str) -> String {
	format!("{JOINED_PREFIX}{normalized_email}")
}

/// Trim and lowercase an email so repeat sign-ups match.
pub fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

/// A narrow string key-value store.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> Option<String>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
pub struct BrowserStorage {
	storage: Storage,
}

impl BrowserStorage {
	/// `None` when the page has no window or storage is blocked.
	pub fn open() -> Option<Self> {
		let window = web_sys::window()?;
		match window.local_storage() {
			Ok(Some(storage)) => Some(Self { storage }),
			Ok(None) => None,
			Err(e) => {
				warn!("peerly: localStorage unavailable: {:?}", e);
				None
			}
		}
	}
}

impl KeyValueStore for BrowserStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.storage
			.set_item(key, value)
			.map_err(|e| StorageError(format!("{:?}", e)))
	}
}

/// In-memory store, used when `localStorage` is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.entries
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// Whichever store the page could open.
pub enum DeviceStore {
	Browser(BrowserStorage),
	Memory(MemoryStore),
}

impl DeviceStore {
	/// Prefer `localStorage`, fall back to memory for the page's lifetime.
	pub fn open() -> Self {
		match BrowserStorage::open() {
			Some(storage) => Self::Browser(storage),
			None => {
				warn!("peerly: sign-ups will only be remembered until reload");
				Self::Memory(MemoryStore::default())
			}
		}
	}
}

impl KeyValueStore for DeviceStore {
	fn get(&self, key: &str) -> Option<String> {
		match self {
			Self::Browser(s) => s.get(key),
			Self::Memory(s) => s.get(key),
		}
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		match self {
			Self::Browser(s) => s.set(key, value),
			Self::Memory(s) => s.set(key, value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_case_and_whitespace() {
		assert_eq!(normalize_email("  Ada@Example.COM \n"), "ada@example.com");
		assert_eq!(joined_key("ada@example.com"), "peerly:joined:ada@example.com");
	}

	#[test]
	fn memory_store_round_trips() {
		let store = MemoryStore::default();
		assert_eq!(store.get(LAST_JOINED_KEY), None);
		store.set(LAST_JOINED_KEY, "ada@example.com").unwrap();
		assert_eq!(store.get(LAST_JOINED_KEY).as_deref(), Some("ada@example.com"));
	}
}
