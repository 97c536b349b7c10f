//! Dark/light toggle button with a persisted preference.

use leptos::prelude::*;
use log::debug;
use web_sys::MouseEvent;

use super::particle_field::theme;

/// `#theme-toggle` button.
///
/// On mount it applies the preference saved by an earlier visit. Each click
/// flips dark and light, sets or clears `light-mode` on the body (which the
/// particle field picks up on its next frame) and saves the choice. A page
/// that sets `monochrome` keeps it.
#[component]
pub fn ThemeToggle() -> impl IntoView {
	let (mode, set_mode) = signal(theme::saved_mode().unwrap_or_else(theme::current_mode));

	Effect::new(move |_| {
		theme::apply_mode(mode.get());
	});

	let on_click = move |_: MouseEvent| {
		let next = mode.get_untracked().toggled();
		debug!("portfolio-particles: theme -> {}", next.storage_value());
		set_mode.set(next);
		theme::save_mode(next);
	};

	view! {
		<button
			id="theme-toggle"
			class="theme-toggle"
			aria-label="Toggle theme"
			on:click=on_click
		>
			<i class=move || mode.get().icon_class()></i>
		</button>
	}
}

