//! Leptos component hosting the particle field behind the hero copy.
//!
//! The component creates a full-viewport canvas, listens for window resize
//! and pointer movement, and drives the field from `requestAnimationFrame`.
//! Unmounting cancels the loop and detaches every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use rand::{SeedableRng, rngs::SmallRng};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
	Window,
};

use super::config::FieldConfig;
use super::state::{AnimationContext, FrameOutcome};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Text laid over the animated background.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroCopy {
	pub eyebrow: String,
	pub headline: String,
	pub tagline: String,
	pub blurb: String,
	/// `(label, section id)` for the primary button.
	pub primary: (String, String),
	/// `(label, section id)` for the secondary button.
	pub secondary: (String, String),
}

impl Default for HeroCopy {
	fn default() -> Self {
		Self {
			eyebrow: "Civil Engineering · Systems Design · Automation".into(),
			headline: "Sanford Dinkins, PE".into(),
			tagline: "Engineering solutions across physical and digital systems.".into(),
			blurb: "Licensed Professional Engineer specializing in site civil land development, \
			        with parallel experience designing scalable digital tools, automation \
			        systems, and engineering workflows."
				.into(),
			primary: ("View Experience".into(), "experience".into()),
			secondary: ("Explore Projects".into(), "projects".into()),
		}
	}
}

/// Smoothly scroll the element with the given id into view, if it exists.
pub fn scroll_to_section(id: &str) {
	let Some(element) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(id))
	else {
		debug!("hero-field: no section #{id} to scroll to");
		return;
	};
	let options = ScrollIntoViewOptions::new();
	options.set_behavior(ScrollBehavior::Smooth);
	element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dimension(window.inner_width()), dimension(window.inner_height()))
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Seed for particle placement. Differs on every page load.
fn entropy_seed() -> u64 {
	let now = js_sys::Date::now() as u64;
	let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
	now.rotate_left(32) ^ noise
}

/// Listeners and loop handles that must be released on unmount.
struct FrameLoop {
	window: Window,
	context: Rc<RefCell<AnimationContext>>,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: FrameCallback,
	on_resize: Closure<dyn FnMut()>,
	on_pointer_move: Closure<dyn FnMut(MouseEvent)>,
}

impl FrameLoop {
	fn stop(self) {
		self.context.borrow().teardown();
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		let _ = self.window.remove_event_listener_with_callback(
			"mousemove",
			self.on_pointer_move.as_ref().unchecked_ref(),
		);
		// Breaks the closure's reference to itself.
		self.animate.borrow_mut().take();
	}
}

/// Full-viewport hero with an animated particle field behind its copy.
///
/// `config` defaults to [`FieldConfig::default`]; `copy` to the site's own
/// hero text. Any children are rendered below the call-to-action buttons.
#[component]
pub fn ParticleHero(
	#[prop(optional)] config: Option<FieldConfig>,
	#[prop(optional)] copy: Option<HeroCopy>,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();
	let copy = copy.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(mut ctx) = canvas_context(&canvas) else {
			debug!("hero-field: no 2d context, particle field disabled");
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut rng = SmallRng::seed_from_u64(entropy_seed());
		let context = AnimationContext::new(config.clone(), w, h, &mut rng);
		info!(
			"hero-field: animating {} particles on {}x{}",
			context.field().particles().len(),
			w,
			h
		);
		context.start(&mut ctx);
		let context = Rc::new(RefCell::new(context));

		let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
		let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			debug!("hero-field: resized to {}x{}", nw, nh);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			context_resize.borrow_mut().resize(nw, nh);
		});
		let _ =
			window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

		let context_pointer = context.clone();
		let on_pointer_move: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
			context_pointer
				.borrow_mut()
				.set_pointer(ev.client_x() as f64, ev.client_y() as f64);
		});
		let _ = window
			.add_event_listener_with_callback("mousemove", on_pointer_move.as_ref().unchecked_ref());

		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let frame_id = Rc::new(Cell::new(None));
		let (context_anim, animate_inner, frame_id_inner) =
			(context.clone(), animate.clone(), frame_id.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			frame_id_inner.set(None);
			if context_anim.borrow_mut().frame(&mut ctx) == FrameOutcome::Stopped {
				return;
			}
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frame_id_inner.set(Some(id));
				}
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_id.set(Some(id));
			}
		}

		let frame_loop = SendWrapper::new(FrameLoop {
			window,
			context,
			frame_id,
			animate,
			on_resize,
			on_pointer_move,
		});
		on_cleanup(move || frame_loop.take().stop());
	});

	let (primary_label, primary_target) = copy.primary;
	let (secondary_label, secondary_target) = copy.secondary;

	view! {
		<section class="hero">
			<canvas node_ref=canvas_ref class="hero-canvas" style="position: absolute; inset: 0; display: block;" />
			<div class="hero-content">
				<p class="hero-eyebrow">{copy.eyebrow}</p>
				<h1 class="hero-headline">{copy.headline}</h1>
				<p class="hero-tagline">{copy.tagline}</p>
				<p class="hero-blurb">{copy.blurb}</p>
				<div class="hero-actions">
					<button class="hero-primary" on:click=move |_| scroll_to_section(&primary_target)>
						{primary_label}
					</button>
					<button class="hero-secondary" on:click=move |_| scroll_to_section(&secondary_target)>
						{secondary_label}
					</button>
				</div>
				{children.map(|c| c())}
			</div>
		</section>
	}
}
