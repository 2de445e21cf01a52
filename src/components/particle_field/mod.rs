//! Animated particle-field hero.
//!
//! Renders a drifting field of points on an HTML canvas with:
//! - Pointer repulsion within a configurable radius
//! - Edge reflection that never teleports particles
//! - Fading connection lines between nearby particles
//! - Trails from a translucent per-frame background fill
//!
//! # Example
//!
//! ```ignore
//! use hero_field::{FieldConfig, ParticleHero};
//!
//! let config = FieldConfig { particle_count: 40, ..FieldConfig::default() };
//! view! { <ParticleHero config=config /> }
//! ```

mod component;
pub mod config;
mod particles;
mod render;
mod state;
pub mod theme;

pub use component::{HeroCopy, ParticleHero, scroll_to_section};
pub use config::{ConfigError, FieldConfig};
pub use particles::{Link, Particle, ParticleField, link_alpha, repulsion_impulse};
pub use render::{Surface, clear, render};
pub use state::{AnimationContext, CancelToken, FrameOutcome};
pub use theme::{Color, Theme, ThemeName};
