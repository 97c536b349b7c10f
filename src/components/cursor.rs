//! Custom cursor: a dot pinned to the pointer and a follower that eases after it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MouseEvent};

use super::dom::{FrameHandle, listen, run_frames, stop_on_pagehide, viewport_size};

/// Elements that enlarge the cursor while hovered.
pub const INTERACTIVE_SELECTOR: &str = "a, button, .btn, .project-card, .cert-card, .qual-card";

/// Fraction of the remaining distance the follower covers each frame.
pub const FOLLOW_SPEED: f64 = 0.15;

/// Scale applied to both cursor elements over interactive elements.
const HOVER_SCALE: f64 = 1.5;

/// Eased position chasing a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFollower {
	pub x: f64,
	pub y: f64,
	speed: f64,
}

impl CursorFollower {
	pub fn new(speed: f64) -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			speed: speed.clamp(0.0, 1.0),
		}
	}

	/// Move a fixed fraction of the way toward the target.
	pub fn step(&mut self, target_x: f64, target_y: f64) {
		self.x += (target_x - self.x) * self.speed;
		self.y += (target_y - self.y) * self.speed;
	}
}

impl Default for CursorFollower {
	fn default() -> Self {
		Self::new(FOLLOW_SPEED)
	}
}

fn place(el: &HtmlElement, x: f64, y: f64) {
	let style = el.style();
	let _ = style.set_property("left", &format!("{x}px"));
	let _ = style.set_property("top", &format!("{y}px"));
}

fn scale_css(scale: f64) -> String {
	format!("translate(-50%, -50%) scale({scale})")
}

#[derive(Default)]
struct CursorState {
	target: (f64, f64),
	follower: CursorFollower,
}

/// Renders `.cursor` and `.cursor-follower`.
///
/// Hidden on viewports narrower than `min_viewport_width`, where no loop runs.
#[component]
pub fn CustomCursor(#[prop(default = 768.0)] min_viewport_width: f64) -> impl IntoView {
	let dot_ref = NodeRef::<leptos::html::Div>::new();
	let follower_ref = NodeRef::<leptos::html::Div>::new();
	let handle = FrameHandle::new();
	let started = Rc::new(RefCell::new(false));

	let handle_cleanup = handle.clone();
	on_cleanup(move || handle_cleanup.stop());

	Effect::new(move |_| {
		let (Some(dot), Some(follower)) = (dot_ref.get(), follower_ref.get()) else {
			return;
		};
		if *started.borrow() {
			return;
		}
		let (dot, follower): (HtmlElement, HtmlElement) = (dot.into(), follower.into());
		*started.borrow_mut() = start(dot, follower, min_viewport_width, handle.clone()).is_some();
	});

	view! {
		<div node_ref=dot_ref class="cursor"></div>
		<div node_ref=follower_ref class="cursor-follower"></div>
	}
}

fn start(
	dot: HtmlElement,
	follower: HtmlElement,
	min_viewport_width: f64,
	handle: FrameHandle,
) -> Option<()> {
	let window = web_sys::window()?;
	let (width, _) = viewport_size(&window)?;

	if width < min_viewport_width {
		info!("portfolio-particles: viewport {}px, custom cursor disabled", width);
		let _ = dot.style().set_property("display", "none");
		let _ = follower.style().set_property("display", "none");
		return None;
	}

	let state = Rc::new(RefCell::new(CursorState::default()));

	let (state_move, dot_move, handle_move) = (state.clone(), dot.clone(), handle.clone());
	listen(&window, "mousemove", move |ev| {
		if !handle_move.is_running() {
			return;
		}
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
		state_move.borrow_mut().target = (x, y);
		place(&dot_move, x, y);
	});

	let (dot_hover, follower_hover, handle_hover) = (dot.clone(), follower.clone(), handle.clone());
	listen(&window, "mouseover", move |ev| {
		if !handle_hover.is_running() {
			return;
		}
		let interactive = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
			.is_some();
		let transform = scale_css(if interactive { HOVER_SCALE } else { 1.0 });
		let _ = dot_hover.style().set_property("transform", &transform);
		let _ = follower_hover.style().set_property("transform", &transform);
	});

	stop_on_pagehide(&window, &handle);

	run_frames(&window, handle, move || {
		let mut s = state.borrow_mut();
		let (tx, ty) = s.target;
		s.follower.step(tx, ty);
		place(&follower, s.follower.x, s.follower.y);
	});

	Some(())
}

#[cfg(test)]
mod tests {
	use super::{CursorFollower, scale_css};

	#[test]
	fn follower_closes_fixed_fraction() {
		let mut follower = CursorFollower::new(0.15);
		follower.step(100.0, -200.0);
		assert!((follower.x - 15.0).abs() < 1e-9);
		assert!((follower.y + 30.0).abs() < 1e-9);
		follower.step(100.0, -200.0);
		assert!((follower.x - 27.75).abs() < 1e-9);
	}

	#[test]
	fn follower_converges_on_target() {
		let mut follower = CursorFollower::default();
		for _ in 0..200 {
			follower.step(640.0, 360.0);
		}
		assert!((follower.x - 640.0).abs() < 1e-6);
		assert!((follower.y - 360.0).abs() < 1e-6);
	}

	#[test]
	fn speed_is_clamped() {
		let mut follower = CursorFollower::new(3.0);
		follower.step(10.0, 10.0);
		assert_eq!((follower.x, follower.y), (10.0, 10.0));
	}

	#[test]
	fn hover_transform() {
		assert_eq!(scale_css(1.5), "translate(-50%, -50%) scale(1.5)");
	}
}
