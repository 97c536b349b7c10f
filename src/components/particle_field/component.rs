//! Leptos component hosting the particle field canvas.
//!
//! The canvas covers the viewport behind the page content. Pointer and resize
//! events are taken from the window (the canvas itself ignores pointer events
//! so the page stays clickable). An animation loop runs via
//! `requestAnimationFrame`, updating and rendering the field each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::super::dom::{FrameHandle, listen, run_frames, stop_on_pagehide, viewport_size};
use super::config::FieldConfig;
use super::particles::{ParticleField, Pointer};
use super::render;
use super::theme;

/// One display frame, in seconds.
const FRAME_DT: f64 = 1.0 / 60.0;

/// Everything the frame step and the event handlers share.
struct FieldContext {
	field: ParticleField,
	pointer: Pointer,
	ctx: CanvasRenderingContext2d,
}

/// Animated particle background.
///
/// Fills the viewport and follows window resizes, re-seeding the field each
/// time. Viewports narrower than `config.min_viewport_width` get no canvas
/// and no animation loop. Colors follow the page theme frame by frame.
#[component]
pub fn ParticleBackground(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default().sanitized();
	let handle = FrameHandle::new();
	let started = Rc::new(RefCell::new(false));

	let handle_cleanup = handle.clone();
	on_cleanup(move || handle_cleanup.stop());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if *started.borrow() {
			return;
		}
		*started.borrow_mut() = start(&canvas, config.clone(), handle.clone()).is_some();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="particles-canvas"
			class="particle-background"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Size the canvas, seed the field, wire input and start the frame loop.
/// Returns `None` when the effect is disabled or the canvas is unusable.
fn start(canvas: &HtmlCanvasElement, config: FieldConfig, handle: FrameHandle) -> Option<()> {
	let window = web_sys::window()?;
	let (width, height) = viewport_size(&window)?;

	if width < config.min_viewport_width {
		info!(
			"portfolio-particles: viewport {}px below {}px, particle background disabled",
			width, config.min_viewport_width
		);
		let _ = web_sys::HtmlElement::style(canvas).set_property("display", "none");
		return None;
	}

	canvas.set_width(width as u32);
	canvas.set_height(height as u32);

	let Some(ctx) = canvas_context(canvas) else {
		warn!("portfolio-particles: no 2d context, particle background disabled");
		return None;
	};

	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	let field = ParticleField::new(config, width, height, seed);
	info!(
		"portfolio-particles: {} particles on {}x{}",
		field.particles.len(),
		width,
		height
	);

	let state = Rc::new(RefCell::new(FieldContext {
		field,
		pointer: Pointer::ABSENT,
		ctx,
	}));

	let (state_resize, canvas_resize, handle_resize) =
		(state.clone(), canvas.clone(), handle.clone());
	listen(&window, "resize", move |_| {
		if !handle_resize.is_running() {
			return;
		}
		let Some((w, h)) = web_sys::window().as_ref().and_then(viewport_size) else {
			return;
		};
		canvas_resize.set_width(w as u32);
		canvas_resize.set_height(h as u32);
		state_resize.borrow_mut().field.resize(w, h);
		debug!("portfolio-particles: resized to {}x{}", w, h);
	});

	let (state_move, canvas_move, handle_move) = (state.clone(), canvas.clone(), handle.clone());
	listen(&window, "mousemove", move |ev| {
		if !handle_move.is_running() {
			return;
		}
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let rect = canvas_move.get_bounding_client_rect();
		state_move.borrow_mut().pointer = Pointer::at(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
	});

	if let Some(root) = window.document().and_then(|d| d.document_element()) {
		let state_leave = state.clone();
		listen(&root, "mouseleave", move |_| {
			state_leave.borrow_mut().pointer = Pointer::ABSENT;
		});
	}

	stop_on_pagehide(&window, &handle);

	run_frames(&window, handle, move || {
		let mut guard = state.borrow_mut();
		let c = &mut *guard;
		c.field.update(c.pointer, FRAME_DT);
		let palette = theme::current_mode().palette();
		render::render(&mut c.ctx, &c.field, &palette);
	});

	Some(())
}
