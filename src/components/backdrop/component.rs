//! Leptos component wrapping the backdrop canvas.
//!
//! The component creates a canvas sized to its parent container, attaches
//! the engine to it once the node exists, and detaches on unmount. Attach
//! acquires everything in order (surface, context, listeners, render
//! loop) and every acquisition registers its release, so a failure
//! partway through or a later unmount both leave nothing behind.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::BackdropConfig;
use super::driver::RenderLoop;
use super::field::ParticleField;
use super::lifecycle::{AttachError, BackdropHandle, Teardown};
use super::links::LinkBuffer;
use super::pointer::{self, Cursor, ParallaxRig, Projection, Viewport};
use super::render;
use super::sim;
use super::theme::BackdropPalette;

/// Everything one mounted backdrop owns. Mutated by the frame loop and
/// the event handlers; exclusively owned by one attach/detach cycle.
struct Scene {
	field: ParticleField,
	links: Option<LinkBuffer>,
	cursor: Cursor,
	viewport: Viewport,
	projection: Projection,
	rig: ParallaxRig,
	config: BackdropConfig,
	palette: BackdropPalette,
	clock: f64,
}

impl Scene {
	fn step(&mut self, dt: f32) {
		let target = pointer::world_target(&self.cursor, &self.viewport, &self.projection);
		sim::advance(&mut self.field, target, &self.config, dt);

		self.rig.advance(
			pointer::normalized(&self.cursor, &self.viewport),
			self.config.parallax,
			dt,
		);

		if let (Some(links), Some(link_config)) = (&mut self.links, &self.config.links) {
			links.rebuild(self.field.positions(), link_config.threshold);
		}
		self.clock += f64::from(dt);
	}

	fn draw(&self, ctx: &CanvasRenderingContext2d) {
		render::clear(ctx, &self.viewport);
		let shift = self.rig.offset();
		if let (Some(links), Some(link_config)) = (&self.links, &self.config.links) {
			render::draw_links(
				ctx,
				links.segments(),
				link_config,
				&self.projection,
				shift,
				self.palette.accent,
			);
		}
		render::draw_particles(
			ctx,
			&self.field,
			&self.config,
			&self.projection,
			shift,
			self.palette.primary,
			self.clock,
		);
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
		self.projection = Projection::new(&self.viewport, &self.config.bounds);
	}
}

/// Drawable size of the canvas's parent container.
fn surface_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((0.0, 0.0))
}

/// Binds the engine to a canvas and starts the render loop.
///
/// Acquisition order: surface dimensions, 2d context, particle storage,
/// event listeners, render loop. The returned handle owns all of it;
/// failure at any point releases whatever was already acquired.
fn attach(
	canvas: &HtmlCanvasElement,
	config: BackdropConfig,
	palette: BackdropPalette,
	seed: u64,
) -> Result<BackdropHandle, AttachError> {
	config.validate()?;

	let (width, height) = surface_size(canvas);
	if width < 1.0 || height < 1.0 {
		return Err(AttachError::SurfaceUnavailable);
	}
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(|e| AttachError::ContextUnavailable(format!("{e:?}")))?
		.ok_or_else(|| AttachError::ContextUnavailable("no 2d context".into()))?
		.dyn_into()
		.map_err(|_| AttachError::ContextUnavailable("unexpected context type".into()))?;

	let viewport = Viewport::new(width, height);
	let projection = Projection::new(&viewport, &config.bounds);
	let field = ParticleField::new(&config, fastrand::Rng::with_seed(seed))?;
	let links = config
		.links
		.as_ref()
		.map(|link_config| LinkBuffer::new(link_config.max_links));

	info!(
		"backdrop: attaching {} particles to {}x{} surface",
		config.particle_count, width as u32, height as u32
	);

	let scene = Rc::new(RefCell::new(Scene {
		field,
		links,
		cursor: Cursor::new(),
		viewport,
		projection,
		rig: ParallaxRig::new(),
		config,
		palette,
		clock: 0.0,
	}));

	let mut teardown = Teardown::new();
	let window: Window = web_sys::window().unwrap();

	// Pushed first so it runs last: blank the surface after everything
	// that could draw to it is gone.
	{
		let (ctx_release, canvas_release) = (ctx.clone(), canvas.clone());
		teardown.push(move || {
			ctx_release.clear_rect(
				0.0,
				0.0,
				f64::from(canvas_release.width()),
				f64::from(canvas_release.height()),
			);
			debug!("backdrop: surface released");
		});
	}

	// Pointer moves are tracked on the window so the backdrop still
	// reacts beneath overlaid page content.
	{
		let (scene_mm, canvas_mm) = (scene.clone(), canvas.clone());
		let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			let rect = canvas_mm.get_bounding_client_rect();
			scene_mm.borrow_mut().cursor.set(
				f64::from(ev.client_x()) - rect.left(),
				f64::from(ev.client_y()) - rect.top(),
			);
		});
		let _ = window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		let window_mm = window.clone();
		teardown.push(move || {
			let _ = window_mm
				.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		});
	}

	{
		let scene_ml = scene.clone();
		let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
			scene_ml.borrow_mut().cursor.clear();
		});
		let _ = canvas.add_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
		let canvas_ml = canvas.clone();
		teardown.push(move || {
			let _ = canvas_ml
				.remove_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
		});
	}

	{
		let (scene_rs, canvas_rs) = (scene.clone(), canvas.clone());
		let cb = Closure::<dyn FnMut()>::new(move || {
			let (w, h) = surface_size(&canvas_rs);
			if w >= 1.0 && h >= 1.0 {
				canvas_rs.set_width(w as u32);
				canvas_rs.set_height(h as u32);
			}
			scene_rs.borrow_mut().resize(w, h);
		});
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		let window_rs = window.clone();
		teardown.push(move || {
			let _ = window_rs
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		});
	}

	let render_loop = RenderLoop::new();
	{
		let (scene_frame, ctx_frame) = (scene.clone(), ctx.clone());
		render_loop.start(move || {
			let mut scene = scene_frame.borrow_mut();
			scene.step(sim::NOMINAL_DT);
			scene.draw(&ctx_frame);
		});
		teardown.push(move || render_loop.stop());
	}

	Ok(BackdropHandle::new(teardown))
}

/// Renders a decorative particle animation behind a page section.
///
/// The canvas fills its parent container; give the parent `position:
/// relative` and overlay real content above it. Pass one of the
/// [`BackdropConfig`] presets or a hand-built config; colors default to
/// the page theme with a built-in fallback pair.
#[component]
pub fn ParticleBackdrop(
	config: BackdropConfig,
	#[prop(optional)] palette: Option<BackdropPalette>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle: Rc<RefCell<Option<BackdropHandle>>> = Rc::new(RefCell::new(None));

	let handle_attach = handle.clone();
	// `on_cleanup` requires `Send + Sync`, but the handle is a single-thread
	// `Rc`; the app is CSR-only so wrapping it asserts those bounds soundly.
	let handle_cleanup = send_wrapper::SendWrapper::new(handle);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handle_attach.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();

		let palette = palette.unwrap_or_else(BackdropPalette::from_document);
		let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
		match attach(&canvas, config.clone(), palette, seed) {
			Ok(attached) => *handle_attach.borrow_mut() = Some(attached),
			Err(e) => warn!("backdrop: attach failed: {e}"),
		}
	});

	on_cleanup(move || {
		if let Some(attached) = handle_cleanup.borrow_mut().take() {
			attached.detach();
			debug!("backdrop: detached");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-backdrop"
			style="display: block; position: absolute; inset: 0; width: 100%; height: 100%;"
		/>
	}
}
