//! Colors for the backdrop engine.
//!
//! The engine draws with exactly two colors, a primary (particles) and an
//! accent (link lines). They are resolved once at attach time from the
//! surrounding page theme and fall back to a built-in pair when the theme
//! does not provide usable values.

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

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation;
	/// anything else (keywords, `hsl()`, raw custom-property triplets)
	/// returns `None` so the caller can fall back.
	pub fn parse(color_str: &str) -> Option<Color> {
		let color_str = color_str.trim();
		if let Some(hex) = color_str.strip_prefix('#') {
			if hex.len() != 6 {
				return None;
			}
			let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
			let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
			let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
			Some(Color::rgb(r, g, b))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums.first().and_then(|s| s.trim().parse().ok())?;
			let g = nums.get(1).and_then(|s| s.trim().parse().ok())?;
			let b = nums.get(2).and_then(|s| s.trim().parse().ok())?;
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Some(Color::rgba(r, g, b, a))
		} else {
			None
		}
	}
}

/// The color pair a backdrop draws with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropPalette {
	/// Particle fill color.
	pub primary: Color,
	/// Link line color.
	pub accent: Color,
}

impl BackdropPalette {
	/// Built-in pair used whenever the page theme yields nothing usable.
	pub fn fallback() -> Self {
		Self {
			primary: Color::rgb(129, 161, 193),
			accent: Color::rgb(136, 192, 208),
		}
	}

	/// Builds a palette from optional CSS color strings, falling back
	/// per channel.
	pub fn from_css(primary: Option<&str>, accent: Option<&str>) -> Self {
		let fallback = Self::fallback();
		Self {
			primary: primary
				.and_then(Color::parse)
				.unwrap_or(fallback.primary),
			accent: accent.and_then(Color::parse).unwrap_or(fallback.accent),
		}
	}

	/// Reads `--primary` and `--accent` custom properties off the document
	/// element. Missing document, missing properties, or unparsable values
	/// all degrade to the fallback pair.
	pub fn from_document() -> Self {
		let resolved = web_sys::window()
			.and_then(|w| {
				let root = w.document()?.document_element()?;
				let style = w.get_computed_style(&root).ok()??;
				let primary = style.get_property_value("--primary").ok();
				let accent = style.get_property_value("--accent").ok();
				Some((primary, accent))
			})
			.unwrap_or((None, None));
		Self::from_css(resolved.0.as_deref(), resolved.1.as_deref())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_colors() {
		assert_eq!(Color::parse("#5e81ac"), Some(Color::rgb(94, 129, 172)));
		assert_eq!(Color::parse("  #ffffff "), Some(Color::rgb(255, 255, 255)));
	}

	#[test]
	fn parses_rgb_functional_notation() {
		assert_eq!(
			Color::parse("rgb(10, 20, 30)"),
			Some(Color::rgb(10, 20, 30))
		);
		let c = Color::parse("rgba(1, 2, 3, 0.5)").unwrap();
		assert_eq!((c.r, c.g, c.b), (1, 2, 3));
		assert!((c.a - 0.5).abs() < 1e-9);
	}

	#[test]
	fn rejects_unsupported_notations() {
		assert_eq!(Color::parse("hsl(210, 40%, 50%)"), None);
		assert_eq!(Color::parse("210 40% 50%"), None);
		assert_eq!(Color::parse("#fff"), None);
		assert_eq!(Color::parse(""), None);
	}

	#[test]
	fn palette_falls_back_per_channel() {
		let fallback = BackdropPalette::fallback();
		let p = BackdropPalette::from_css(Some("#102030"), Some("not a color"));
		assert_eq!(p.primary, Color::rgb(16, 32, 48));
		assert_eq!(p.accent, fallback.accent);

		let p = BackdropPalette::from_css(None, None);
		assert_eq!(p, fallback);
	}

	#[test]
	fn css_formatting_round_trips_opaque_colors() {
		let c = Color::rgb(94, 129, 172);
		assert_eq!(Color::parse(&c.to_css()), Some(c));
	}
}
