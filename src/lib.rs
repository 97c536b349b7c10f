//! portfolio-particles: interactive background effects for a portfolio site.
//!
//! This crate provides a WASM particle-field background that reacts to the
//! pointer and follows the page theme, plus the custom cursor and the theme
//! toggle it shares page state with.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::cursor::CustomCursor;
pub use components::particle_field::{FieldConfig, ParticleBackground, ParticleField, Pointer};
pub use components::theme_toggle::ThemeToggle;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-particles: logging initialized");
}

/// Parse field settings, logging and falling back to defaults on bad input.
pub fn parse_field_config(json_text: &str) -> FieldConfig {
	match serde_json::from_str::<FieldConfig>(json_text) {
		Ok(config) => config.sanitized(),
		Err(e) => {
			warn!("portfolio-particles: failed to parse particle config: {}", e);
			FieldConfig::default()
		}
	}
}

/// Load field settings from a script element with id="particle-config".
/// Expected format: JSON with optional camelCase keys, e.g. { "particleCount": 60 }
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	let config = parse_field_config(&json_text);
	info!(
		"portfolio-particles: loaded config, {} particles",
		config.particle_count
	);
	Some(config)
}

/// Main application component.
/// Mounts the particle background, custom cursor and theme toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="color-scheme" content="dark light" />

		<ParticleBackground config=config />
		<CustomCursor />
		<ThemeToggle />
	}
}

#[cfg(test)]
mod tests {
	use super::{FieldConfig, parse_field_config};

	#[test]
	fn malformed_config_falls_back_to_defaults() {
		assert_eq!(parse_field_config("{ particleCount: "), FieldConfig::default());
	}

	#[test]
	fn config_is_sanitized_on_load() {
		let config = parse_field_config(r#"{ "radiusMin": 5, "radiusMax": 1, "lineOpacity": 2 }"#);
		assert_eq!((config.radius_min, config.radius_max), (1.0, 5.0));
		assert_eq!(config.line_opacity, 1.0);
	}
}
