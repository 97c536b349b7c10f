//! Theme resolution for the particle field.
//!
//! The page owns the theme: it lives as classes on `<body>`, and the dark/light
//! preference is persisted under the `theme` key in `localStorage`. The field
//! re-reads it every frame so a toggle mid-animation takes effect immediately.

use log::warn;

/// Body class that selects the light theme.
pub const LIGHT_CLASS: &str = "light-mode";
/// Body class that selects the monochrome theme.
pub const MONOCHROME_CLASS: &str = "monochrome";
/// `localStorage` key for the saved preference.
pub const STORAGE_KEY: &str = "theme";

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors the field draws with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	pub dot: Color,
	pub line: Color,
}

/// The page's theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	#[default]
	Dark,
	Light,
	Monochrome,
}

impl ThemeMode {
	/// Resolve from a whitespace-separated class list. Monochrome wins over light.
	pub fn from_class_list(classes: &str) -> Self {
		let mut mode = Self::Dark;
		for class in classes.split_whitespace() {
			match class {
				MONOCHROME_CLASS => return Self::Monochrome,
				LIGHT_CLASS => mode = Self::Light,
				_ => {}
			}
		}
		mode
	}

	pub fn from_storage_value(value: &str) -> Option<Self> {
		match value {
			"dark" => Some(Self::Dark),
			"light" => Some(Self::Light),
			"monochrome" => Some(Self::Monochrome),
			_ => None,
		}
	}

	pub fn storage_value(self) -> &'static str {
		match self {
			Self::Dark => "dark",
			Self::Light => "light",
			Self::Monochrome => "monochrome",
		}
	}

	/// The toggle button flips dark and light; monochrome falls back to dark.
	pub fn toggled(self) -> Self {
		match self {
			Self::Dark => Self::Light,
			Self::Light | Self::Monochrome => Self::Dark,
		}
	}

	/// Font Awesome icon shown on the toggle.
	pub fn icon_class(self) -> &'static str {
		match self {
			Self::Light => "fas fa-sun",
			Self::Dark | Self::Monochrome => "fas fa-moon",
		}
	}

	pub fn palette(self) -> Palette {
		match self {
			Self::Dark => Palette {
				dot: Color::rgb(0, 245, 255),
				line: Color::rgb(123, 47, 247),
			},
			Self::Light => Palette {
				dot: Color::rgb(37, 99, 235),
				line: Color::rgb(99, 102, 241),
			},
			Self::Monochrome => Palette {
				dot: Color::rgb(220, 220, 220),
				line: Color::rgb(160, 160, 160),
			},
		}
	}
}

fn body() -> Option<web_sys::HtmlElement> {
	web_sys::window()?.document()?.body()
}

/// Current theme as set on `<body>`; dark when there is no body to read.
pub fn current_mode() -> ThemeMode {
	body()
		.map(|b| ThemeMode::from_class_list(&b.class_name()))
		.unwrap_or_default()
}

/// Class list with `light-mode` set or cleared for `mode`.
///
/// Only the light class is touched: `monochrome` and every other class belong
/// to the page and pass through unchanged.
pub fn theme_classes(classes: &str, mode: ThemeMode) -> String {
	let mut kept: Vec<&str> = classes
		.split_whitespace()
		.filter(|class| *class != LIGHT_CLASS)
		.collect();
	if mode == ThemeMode::Light {
		kept.push(LIGHT_CLASS);
	}
	kept.join(" ")
}

/// Set or clear `light-mode` on `<body>`, leaving other classes alone.
pub fn apply_mode(mode: ThemeMode) {
	let Some(body) = body() else {
		return;
	};
	let current = body.class_name();
	let next = theme_classes(&current, mode);
	if next != current {
		body.set_class_name(&next);
	}
}

fn local_storage() -> Option<web_sys::Storage> {
	web_sys::window()?.local_storage().ok()?
}

/// Preference saved by a previous visit, if any.
pub fn saved_mode() -> Option<ThemeMode> {
	let value = local_storage()?.get_item(STORAGE_KEY).ok()??;
	ThemeMode::from_storage_value(&value)
}

pub fn save_mode(mode: ThemeMode) {
	let Some(storage) = local_storage() else {
		warn!("portfolio-particles: localStorage unavailable, theme not saved");
		return;
	};
	if storage.set_item(STORAGE_KEY, mode.storage_value()).is_err() {
		warn!("portfolio-particles: failed to save theme preference");
	}
}

#[cfg(test)]
mod tests {
	use super::{Color, ThemeMode, theme_classes};

	#[test]
	fn class_list_resolution() {
		assert_eq!(ThemeMode::from_class_list(""), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_class_list("nav-open light-mode"), ThemeMode::Light);
		assert_eq!(
			ThemeMode::from_class_list("light-mode monochrome"),
			ThemeMode::Monochrome
		);
		assert_eq!(ThemeMode::from_class_list("light-modeish"), ThemeMode::Dark);
	}

	#[test]
	fn toggle_flips_dark_and_light() {
		assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
		assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
		assert_eq!(ThemeMode::Monochrome.toggled(), ThemeMode::Dark);
	}

	#[test]
	fn storage_values_match_the_site() {
		for mode in [ThemeMode::Dark, ThemeMode::Light, ThemeMode::Monochrome] {
			assert_eq!(ThemeMode::from_storage_value(mode.storage_value()), Some(mode));
		}
		assert_eq!(ThemeMode::from_storage_value("sepia"), None);
		assert_eq!(ThemeMode::Light.storage_value(), "light");
	}

	#[test]
	fn light_class_is_the_only_one_touched() {
		assert_eq!(theme_classes("monochrome", ThemeMode::Light), "monochrome light-mode");
		assert_eq!(theme_classes("monochrome light-mode", ThemeMode::Dark), "monochrome");
		assert_eq!(theme_classes("monochrome", ThemeMode::Monochrome), "monochrome");
		assert_eq!(theme_classes("nav-open  light-mode", ThemeMode::Light), "nav-open light-mode");
		assert_eq!(theme_classes("", ThemeMode::Dark), "");
	}

	#[test]
	fn monochrome_page_survives_saved_preference() {
		for saved in [ThemeMode::Light, ThemeMode::Dark] {
			let classes = theme_classes("monochrome", saved);
			assert_eq!(ThemeMode::from_class_list(&classes), ThemeMode::Monochrome);
		}
	}

	#[test]
	fn icon_follows_mode() {
		assert_eq!(ThemeMode::Dark.icon_class(), "fas fa-moon");
		assert_eq!(ThemeMode::Dark.toggled().icon_class(), "fas fa-sun");
		assert_eq!(ThemeMode::Monochrome.icon_class(), "fas fa-moon");
	}

	#[test]
	fn palettes_differ_per_mode() {
		assert_ne!(ThemeMode::Dark.palette(), ThemeMode::Light.palette());
		assert_ne!(ThemeMode::Light.palette(), ThemeMode::Monochrome.palette());
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(0, 245, 255).to_css(), "#00f5ff");
		assert_eq!(
			Color::rgb(1, 2, 3).with_alpha(0.5).to_css(),
			"rgba(1, 2, 3, 0.5)"
		);
	}
}
