//! Colour presets for the particle field.
//!
//! A theme supplies the dark base colour (used both for the opaque initial
//! clear and for the translucent trail fill), the light neutral colour of the
//! particles and their connection lines, and the stroke width of those lines.

use serde::Deserialize;

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

	/// Returns `true` when the colour is fully opaque.
	pub fn is_opaque(self) -> bool {
		(self.a - 1.0).abs() < 0.001
	}

	pub fn to_css(self) -> String {
		if self.is_opaque() {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Name of a built-in theme, as written in the page config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	#[default]
	Zinc,
	Slate,
	Ember,
}

/// Complete visual theme for the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	pub name: &'static str,
	/// Dark base colour. Always drawn opaque on the first frame.
	pub background: Color,
	/// Alpha of the per-frame background fill; lower values leave longer trails.
	pub trail_alpha: f64,
	/// Light neutral colour for particles. Alpha comes from each particle.
	pub particle: Color,
	/// Colour for connection lines. Alpha comes from the link distance.
	pub link: Color,
	/// Connection line width in pixels.
	pub link_width: f64,
}

impl Theme {
	/// Near-black zinc with grey particles (default)
	pub fn zinc() -> Self {
		Self {
			name: "zinc",
			background: Color::rgb(9, 9, 11),
			trail_alpha: 0.1,
			particle: Color::rgb(161, 161, 170),
			link: Color::rgb(161, 161, 170),
			link_width: 0.5,
		}
	}

	/// Cool blue-grey
	pub fn slate() -> Self {
		Self {
			name: "slate",
			background: Color::rgb(15, 23, 42),
			trail_alpha: 0.1,
			particle: Color::rgb(148, 163, 184),
			link: Color::rgb(129, 161, 193),
			link_width: 0.5,
		}
	}

	/// Warm dark brown with sand particles
	pub fn ember() -> Self {
		Self {
			name: "ember",
			background: Color::rgb(28, 24, 22),
			trail_alpha: 0.12,
			particle: Color::rgb(175, 150, 120),
			link: Color::rgb(180, 136, 100),
			link_width: 0.5,
		}
	}

	pub fn by_name(name: ThemeName) -> Self {
		match name {
			ThemeName::Zinc => Self::zinc(),
			ThemeName::Slate => Self::slate(),
			ThemeName::Ember => Self::ember(),
		}
	}

	/// The translucent fill laid over the whole surface every frame.
	pub fn trail_fill(&self) -> Color {
		self.background.with_alpha(self.trail_alpha)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::zinc()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(9, 9, 11).to_css(), "#09090b");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		assert_eq!(
			Color::rgb(161, 161, 170).with_alpha(0.25).to_css(),
			"rgba(161, 161, 170, 0.25)"
		);
	}

	#[test]
	fn trail_fill_reuses_background_at_low_alpha() {
		let theme = Theme::zinc();
		let fill = theme.trail_fill();
		assert_eq!(fill, Color::rgba(9, 9, 11, 0.1));
		assert!(!fill.is_opaque());
	}

	#[test]
	fn every_name_resolves_to_matching_theme() {
		for (name, expected) in [
			(ThemeName::Zinc, "zinc"),
			(ThemeName::Slate, "slate"),
			(ThemeName::Ember, "ember"),
		] {
			assert_eq!(Theme::by_name(name).name, expected);
		}
	}
}
