//! hero-field: animated particle-field hero for a civil engineering portfolio.
//!
//! This crate provides a WASM-based hero section whose background is a field
//! of drifting particles that shy away from the pointer and link up with
//! nearby neighbours.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	AnimationContext, CancelToken, Color, ConfigError, FieldConfig, FrameOutcome, HeroCopy, Link,
	Particle, ParticleField, ParticleHero, Surface, Theme, ThemeName,
};

/// Id of the optional `<script type="application/json">` element holding a
/// [`FieldConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "hero-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("hero-field: logging initialized");
}

/// Load field configuration from a script element with id="hero-config".
/// Falls back to defaults when the element is absent or its contents are
/// rejected.
pub fn load_config() -> FieldConfig {
	let Some(text) = config_text() else {
		return FieldConfig::default();
	};
	config_from_text(&text)
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

fn config_from_text(text: &str) -> FieldConfig {
	match FieldConfig::from_json(text) {
		Ok(config) => {
			info!(
				"hero-field: loaded config ({} particles, {:?} theme)",
				config.particle_count, config.theme
			);
			config
		}
		Err(e) => {
			warn!("hero-field: ignoring config: {}", e);
			FieldConfig::default()
		}
	}
}

/// Main application component.
/// Loads the field configuration from the DOM and renders the hero.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Sanford Dinkins, PE | Civil Engineer & Systems Designer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="fullscreen-hero">
			<ParticleHero config=config />
		</main>
	}
}
