//! Theme palettes. One is picked per field instance and never changes.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	Dark,
	Light,
}

impl Theme {
	pub fn toggled(self) -> Self {
		match self {
			Theme::Dark => Theme::Light,
			Theme::Light => Theme::Dark,
		}
	}

	pub fn palette(self) -> &'static Palette {
		match self {
			Theme::Dark => &DARK,
			Theme::Light => &LIGHT,
		}
	}

	/// Value for the page's `data-theme` attribute.
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Dark => "dark",
			Theme::Light => "light",
		}
	}
}

/// Straight sRGB color with alpha, formatted as a CSS `rgba()` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha replaced, clamped to [0, 1].
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub background_start: Rgba,
	pub background_end: Rgba,
	/// Base for node glow, core and highlight; alpha is set per draw.
	pub node: Rgba,
	pub edge: Rgba,
	pub grid: Rgba,
	pub pointer_glow_start: Rgba,
	pub pointer_glow_end: Rgba,
	pub pointer_link: Rgba,
}

pub const DARK: Palette = Palette {
	background_start: Rgba::rgb(0x0a, 0x0a, 0x0a),
	background_end: Rgba::rgb(0, 0, 0),
	node: Rgba::rgb(255, 255, 255),
	edge: Rgba::rgb(255, 255, 255),
	grid: Rgba::rgba(255, 255, 255, 0.05),
	pointer_glow_start: Rgba::rgba(255, 255, 255, 0.15),
	pointer_glow_end: Rgba::rgba(255, 255, 255, 0.0),
	pointer_link: Rgba::rgb(255, 255, 255),
};

pub const LIGHT: Palette = Palette {
	background_start: Rgba::rgb(0xf0, 0xf0, 0xf0),
	background_end: Rgba::rgb(255, 255, 255),
	node: Rgba::rgb(0, 0, 0),
	edge: Rgba::rgb(0, 0, 0),
	grid: Rgba::rgba(0, 0, 0, 0.05),
	pointer_glow_start: Rgba::rgba(0, 0, 0, 0.15),
	pointer_glow_end: Rgba::rgba(0, 0, 0, 0.0),
	pointer_link: Rgba::rgb(0, 0, 0),
};
