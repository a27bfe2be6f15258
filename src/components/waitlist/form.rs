//! Leptos form for joining the waitlist.

use std::rc::Rc;
use std::time::Duration;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::store::DeviceStore;
use super::submission::Waitlist;
use super::transport::FetchTransport;

/// How long the "Submitted!" state stays before the form resets.
const RESET_AFTER: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq)]
enum FormStatus {
	Idle,
	Submitting,
	Submitted,
	Failed(String),
}

/// Name + email sign-up form.
///
/// Submissions go to `endpoint`; a `None` or empty endpoint shows a
/// "not open yet" message instead of sending anything.
#[component]
pub fn WaitlistForm(#[prop(default = None)] endpoint: Option<String>) -> impl IntoView {
	let (name, set_name) = signal(String::new());
	let (email, set_email) = signal(String::new());
	let (status, set_status) = signal(FormStatus::Idle);

	let waitlist = Rc::new(Waitlist::new(DeviceStore::open()));
	let returning = waitlist.last_joined();
	let endpoint = endpoint.unwrap_or_default();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if matches!(
			status.get_untracked(),
			FormStatus::Submitting | FormStatus::Submitted
		) {
			return;
		}
		set_status.set(FormStatus::Submitting);

		let (waitlist, endpoint) = (waitlist.clone(), endpoint.clone());
		let (name_value, email_value) = (name.get_untracked(), email.get_untracked());
		spawn_local(async move {
			let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
			let outcome = waitlist
				.join(&FetchTransport, &endpoint, &name_value, &email_value, &timestamp)
				.await;
			match outcome {
				Ok(_) => {
					set_status.set(FormStatus::Submitted);
					set_timeout(
						move || {
							set_status.set(FormStatus::Idle);
							set_name.set(String::new());
							set_email.set(String::new());
						},
						RESET_AFTER,
					);
				}
				Err(e) => {
					warn!("peerly: waitlist join failed: {}", e);
					set_status.set(FormStatus::Failed(e.user_message()));
				}
			}
		});
	};

	let button_label = move || match status.get() {
		FormStatus::Submitting => "Submitting…",
		FormStatus::Submitted => "Submitted!",
		_ => "Submit",
	};
	let message = move || match status.get() {
		FormStatus::Submitted => Some("You're on the list. We'll be in touch.".to_string()),
		FormStatus::Failed(msg) => Some(msg),
		_ => None,
	};

	view! {
		<form class="waitlist-form" on:submit=on_submit>
			<div class="field">
				<label for="name">"Name"</label>
				<input
					type="text"
					id="name"
					name="name"
					autocomplete="name"
					prop:value=move || name.get()
					on:input=move |ev| set_name.set(event_target_value(&ev))
				/>
			</div>
			<div class="field">
				<label for="email">"Email"</label>
				<input
					type="email"
					id="email"
					name="email"
					autocomplete="email"
					required=true
					prop:value=move || email.get()
					on:input=move |ev| set_email.set(event_target_value(&ev))
				/>
			</div>
			<button
				type="submit"
				disabled=move || matches!(status.get(), FormStatus::Submitting | FormStatus::Submitted)
			>
				{button_label}
			</button>
			<p class="waitlist-status" role="status">{message}</p>
			{returning.map(|email| view! {
				<p class="waitlist-returning">{format!("{email} is already on the list.")}</p>
			})}
		</form>
	}
}
