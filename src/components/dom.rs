//! Browser plumbing shared by the animated components: the
//! `requestAnimationFrame` loop, event listeners and viewport queries.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

/// Stop switch for a frame loop and the listeners feeding it.
///
/// Cloneable and `Send`, so it can be flipped from a Leptos `on_cleanup`.
#[derive(Clone, Debug)]
pub struct FrameHandle {
	running: Arc<AtomicBool>,
}

impl FrameHandle {
	pub fn new() -> Self {
		Self {
			running: Arc::new(AtomicBool::new(true)),
		}
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::Relaxed)
	}

	pub fn stop(&self) {
		self.running.store(false, Ordering::Relaxed);
	}
}

impl Default for FrameHandle {
	fn default() -> Self {
		Self::new()
	}
}

/// Calls `step` once per display frame until `handle` is stopped.
///
/// The step runs to completion before the next frame is requested; once the
/// handle is stopped no further frame is requested.
pub fn run_frames(window: &Window, handle: FrameHandle, mut step: impl FnMut() + 'static) {
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let animate_inner = animate.clone();

	*animate.borrow_mut() = Some(Closure::new(move || {
		if !handle.is_running() {
			debug!("portfolio-particles: frame loop stopped");
			return;
		}
		step();
		if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));

	if let Some(ref cb) = *animate.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Register `handler` for `event` on `target` for the rest of the page's life.
///
/// Handlers outlive the component that registered them, so they should check a
/// [`FrameHandle`] and do nothing once it is stopped. Returns `None`, after
/// logging a warning, if the browser refused the listener.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Option<()> {
	let cb = Closure::<dyn FnMut(Event)>::new(handler);
	if target
		.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
		.is_err()
	{
		warn!("portfolio-particles: failed to listen for '{}' events", event);
		return None;
	}
	cb.forget();
	Some(())
}

/// Stops `handle` when the page is being hidden for navigation or unload.
pub fn stop_on_pagehide(window: &Window, handle: &FrameHandle) -> Option<()> {
	let handle = handle.clone();
	listen(window, "pagehide", move |_| handle.stop())
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

#[cfg(test)]
mod tests {
	use super::FrameHandle;

	#[test]
	fn handle_clones_share_state() {
		let handle = FrameHandle::new();
		let other = handle.clone();
		assert!(other.is_running());
		handle.stop();
		assert!(!other.is_running());
	}
}
