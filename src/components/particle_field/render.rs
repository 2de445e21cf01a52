//! Drawing for the particle field.
//!
//! Rendering goes through the [`Surface`] trait so the draw pass can run
//! against the browser canvas or against a recorder in tests. A frame is drawn
//! in three passes:
//! 1. Translucent background fill (fading trails)
//! 2. Particle dots
//! 3. Connection lines between nearby particles

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;
use super::theme::{Color, Theme};

/// A 2D raster target the field can draw into.
pub trait Surface {
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}
}

/// Paints the whole surface with the opaque background colour.
pub fn clear(field: &ParticleField, surface: &mut impl Surface, theme: &Theme) {
	let (width, height) = field.size();
	surface.fill_rect(0.0, 0.0, width, height, theme.background.with_alpha(1.0));
}

/// Draws the current state of the field on top of the previous frame.
pub fn render(field: &ParticleField, surface: &mut impl Surface, theme: &Theme) {
	let (width, height) = field.size();
	surface.fill_rect(0.0, 0.0, width, height, theme.trail_fill());

	draw_particles(field, surface, theme);
	draw_links(field, surface, theme);
}

fn draw_particles(field: &ParticleField, surface: &mut impl Surface, theme: &Theme) {
	for p in field.particles() {
		surface.fill_circle(p.x, p.y, p.radius, theme.particle.with_alpha(p.opacity));
	}
}

fn draw_links(field: &ParticleField, surface: &mut impl Surface, theme: &Theme) {
	let particles = field.particles();

	for link in field.links() {
		let (a, b) = (&particles[link.a], &particles[link.b]);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			theme.link_width,
			theme.link.with_alpha(link.alpha),
		);
	}
}
