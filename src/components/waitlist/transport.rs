//! `fetch`-based transport for the waitlist endpoint.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, UrlSearchParams};

use super::error::WaitlistError;
use super::submission::Transport;

/// POSTs a `URLSearchParams` body with the browser's `fetch`.
///
/// The browser sets `Content-Type: application/x-www-form-urlencoded` from the
/// body type, which keeps the request "simple" for CORS purposes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

fn js_err(context: &str, e: JsValue) -> WaitlistError {
	WaitlistError::Request(format!("{context}: {e:?}"))
}

impl Transport for FetchTransport {
	async fn post_form(
		&self,
		endpoint: &str,
		fields: &[(&str, &str)],
	) -> Result<String, WaitlistError> {
		let window =
			web_sys::window().ok_or_else(|| WaitlistError::Request("missing window".into()))?;

		let params = UrlSearchParams::new().map_err(|e| js_err("building form body", e))?;
		for (key, value) in fields {
			params.append(key, value);
		}

		let init = RequestInit::new();
		init.set_method("POST");
		init.set_mode(RequestMode::Cors);
		init.set_body(&params.into());

		let request = Request::new_with_str_and_init(endpoint, &init)
			.map_err(|e| js_err("building request", e))?;
		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(|e| js_err("fetch", e))?
			.dyn_into()
			.map_err(|e| js_err("fetch returned a non-response", e))?;

		if !response.ok() {
			return Err(WaitlistError::Request(format!(
				"HTTP {} {}",
				response.status(),
				response.status_text()
			)));
		}

		let text = response.text().map_err(|e| js_err("reading body", e))?;
		JsFuture::from(text)
			.await
			.map_err(|e| js_err("reading body", e))?
			.as_string()
			.ok_or_else(|| WaitlistError::Request("response body was not text".into()))
	}
}
