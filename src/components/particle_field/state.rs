//! Animation context shared by the frame loop and the input callbacks.
//!
//! The component owns exactly one [`AnimationContext`]. The resize listener,
//! the pointer listener and the frame callback all reach it through the same
//! handle; the browser never runs them at the same time, so plain interior
//! mutability is enough.

use std::cell::Cell;
use std::rc::Rc;

use log::info;
use rand::Rng;

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render::{self, Surface};
use super::theme::Theme;

/// Shared stop flag for the frame loop. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.get()
	}
}

/// What the frame loop should do after a call to [`AnimationContext::frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
	/// A frame was drawn; schedule another.
	Continue,
	/// The animation was torn down; nothing was drawn.
	Stopped,
}

/// Everything the running animation owns: particles, pointer, surface size,
/// colours and the stop flag.
pub struct AnimationContext {
	field: ParticleField,
	theme: Theme,
	token: CancelToken,
	frames: u64,
}

impl AnimationContext {
	pub fn new<R: Rng>(config: FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let theme = Theme::by_name(config.theme);
		Self::with_field(ParticleField::new(config, width, height, rng), theme)
	}

	pub fn with_field(field: ParticleField, theme: Theme) -> Self {
		Self {
			field,
			theme,
			token: CancelToken::new(),
			frames: 0,
		}
	}

	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Number of frames drawn so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// A handle to the stop flag, for whoever tears the animation down.
	pub fn cancel_token(&self) -> CancelToken {
		self.token.clone()
	}

	pub fn is_running(&self) -> bool {
		!self.token.is_cancelled()
	}

	/// Paint the opaque background once before the first frame.
	pub fn start(&self, surface: &mut impl Surface) {
		if self.is_running() {
			render::clear(&self.field, surface, &self.theme);
		}
	}

	/// Advance the simulation one step and draw it, unless torn down.
	pub fn frame(&mut self, surface: &mut impl Surface) -> FrameOutcome {
		if self.token.is_cancelled() {
			return FrameOutcome::Stopped;
		}

		self.field.step();
		render::render(&self.field, surface, &self.theme);
		self.frames += 1;
		FrameOutcome::Continue
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.field.set_pointer(x, y);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(width, height);
	}

	/// Stop the animation. Later calls to [`Self::frame`] draw nothing.
	pub fn teardown(&self) {
		if !self.token.is_cancelled() {
			info!(
				"hero-field: animation stopped after {} frames",
				self.frames
			);
		}
		self.token.cancel();
	}
}
