//! Leptos component wrapping the particle canvas.
//!
//! The component creates a canvas element, sizes its backing store to the
//! rendered size times the clamped device pixel ratio, and drives
//! [`FieldState`] from a `requestAnimationFrame` loop. A `ResizeObserver` on
//! the canvas itself reseeds the field whenever its rendered size changes.
//!
//! Browser handles (closures, observer, frame id) are not `Send`, while Leptos
//! cleanup callbacks must be. Mounted fields therefore live in a thread-local
//! registry keyed by a plain id, and the cleanup callback only carries the id.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ResizeObserver, Window};

use super::render::Painter;
use super::scale::SurfaceMetrics;
use super::state::{FieldState, FrameOutcome};
use super::types::ParticleOptions;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Rendered size follows the container, never the backing store.
const CANVAS_STYLE: &str = "display: block; width: 100%; height: 100%; pointer-events: none;";

/// Browser resources held by one mounted field.
struct MountedField {
	state: Rc<RefCell<FieldState>>,
	frame_handle: Rc<Cell<Option<i32>>>,
	animate: FrameCallback,
	observer: Option<ResizeObserver>,
	_on_resize: Closure<dyn FnMut()>,
}

impl MountedField {
	fn teardown(self) {
		self.state.borrow_mut().unmount();
		if let Some(handle) = self.frame_handle.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
		}
		if let Some(observer) = &self.observer {
			observer.disconnect();
		}
		// The frame closure holds a reference to its own slot; drop it to free the cycle.
		self.animate.borrow_mut().take();
	}
}

thread_local! {
	static MOUNTED: RefCell<HashMap<u32, MountedField>> = RefCell::new(HashMap::new());
	static NEXT_ID: Cell<u32> = const { Cell::new(0) };
}

fn next_field_id() -> u32 {
	NEXT_ID.with(|id| {
		let current = id.get();
		id.set(current.wrapping_add(1));
		current
	})
}

/// Renders a continuously animating field of drifting, pulsing points.
///
/// Purely decorative: the field never surfaces errors. If the canvas cannot
/// provide a 2D context, nothing is drawn and no loop is started.
#[component]
pub fn ParticleField(
	/// CSS classes for the canvas; the canvas must get its size from CSS.
	#[prop(into, optional)]
	class: String,
	/// Color, speed, density and sway configuration.
	#[prop(optional)]
	options: ParticleOptions,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let id = next_field_id();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		mount_field(id, canvas.into(), options.clone());
	});

	on_cleanup(move || unmount_field(id));

	view! {
		<canvas
			node_ref=canvas_ref
			class=class
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn measure(window: &Window, canvas: &HtmlCanvasElement) -> SurfaceMetrics {
	SurfaceMetrics::new(
		canvas.client_width() as f64,
		canvas.client_height() as f64,
		window.device_pixel_ratio(),
	)
}

/// Size the backing store. Resetting the size also resets the context
/// transform, so the pixel ratio must be applied afterwards.
fn apply_backing_size(canvas: &HtmlCanvasElement, metrics: &SurfaceMetrics) {
	canvas.set_width(metrics.backing_width);
	canvas.set_height(metrics.backing_height);
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
	let slot = callback.borrow();
	let cb = slot.as_ref()?;
	window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

fn mount_field(id: u32, canvas: HtmlCanvasElement, options: ParticleOptions) {
	unmount_field(id);

	let Some(window) = web_sys::window() else {
		warn!("peerly: no window, particle field disabled");
		return;
	};
	let Some(ctx) = context_2d(&canvas) else {
		warn!("peerly: 2d context unavailable, particle field disabled");
		return;
	};

	let metrics = measure(&window, &canvas);
	apply_backing_size(&canvas, &metrics);
	ctx.set_pixel_ratio(metrics.ratio);

	let state = Rc::new(RefCell::new(FieldState::mount(options, metrics)));
	let frame_handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));

	let (state_anim, ctx_anim, handle_anim, animate_inner) = (
		state.clone(),
		ctx.clone(),
		frame_handle.clone(),
		animate.clone(),
	);
	*animate.borrow_mut() = Some(Closure::new(move || {
		handle_anim.set(None);
		if state_anim.borrow_mut().tick(&ctx_anim) == FrameOutcome::Stop {
			return;
		}
		if let Some(win) = web_sys::window() {
			handle_anim.set(request_frame(&win, &animate_inner));
		}
	}));

	let (state_resize, ctx_resize, canvas_resize) = (state.clone(), ctx.clone(), canvas.clone());
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let mut state = state_resize.borrow_mut();
		if !state.is_active() {
			return;
		}
		let metrics = measure(&win, &canvas_resize);
		apply_backing_size(&canvas_resize, &metrics);
		state.resize(metrics, &ctx_resize);
	});

	let observer = match ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
		Ok(observer) => {
			observer.observe(&canvas);
			Some(observer)
		}
		Err(e) => {
			warn!("peerly: ResizeObserver unavailable, particle field will not reflow: {:?}", e);
			None
		}
	};

	// First frame runs synchronously so the field is visible immediately.
	state.borrow_mut().tick(&ctx);
	frame_handle.set(request_frame(&window, &animate));

	debug!("peerly: particle field {} started", id);
	MOUNTED.with(|mounted| {
		mounted.borrow_mut().insert(
			id,
			MountedField {
				state,
				frame_handle,
				animate,
				observer,
				_on_resize: on_resize,
			},
		);
	});
}

fn unmount_field(id: u32) {
	let Some(field) = MOUNTED.with(|mounted| mounted.borrow_mut().remove(&id)) else {
		return;
	};
	field.teardown();
	debug!("peerly: particle field {} stopped", id);
}
