//! Pointer and viewport tracking.
//!
//! Event handlers write here; the simulation and renderer only read.
//! Updates are last-write-wins: handlers may fire in any interleaving
//! with frame callbacks and no reader needs a multi-field snapshot.

use glam::{Vec2, Vec3};

use super::config::Bounds;

/// Pointer position in canvas pixel space.
///
/// Starts at (and returns to) an off-screen sentinel so a departed pointer
/// exerts no stale force. Coordinates far outside the viewport behave
/// exactly like the sentinel.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
	pos: Vec2,
}

impl Cursor {
	/// Far off-screen resting position, matching no viewport.
	pub const OFF_SCREEN: Vec2 = Vec2::splat(1.0e4);

	pub fn new() -> Self {
		Self {
			pos: Self::OFF_SCREEN,
		}
	}

	pub fn set(&mut self, x: f64, y: f64) {
		self.pos = Vec2::new(x as f32, y as f32);
	}

	/// Resets to the off-screen sentinel (pointer-leave).
	pub fn clear(&mut self) {
		self.pos = Self::OFF_SCREEN;
	}

	pub fn screen_pos(&self) -> Vec2 {
		self.pos
	}
}

impl Default for Cursor {
	fn default() -> Self {
		Self::new()
	}
}

/// Current drawable dimensions of the surface.
///
/// Dimensions are clamped to at least one pixel so a collapsed container
/// mid-session can never produce a division by zero; a surface that is
/// already zero-sized at attach is rejected before this type exists.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
	width: f64,
	height: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		let mut viewport = Self {
			width: 1.0,
			height: 1.0,
		};
		viewport.resize(width, height);
		viewport
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = if width.is_finite() { width.max(1.0) } else { 1.0 };
		self.height = if height.is_finite() {
			height.max(1.0)
		} else {
			1.0
		};
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn aspect(&self) -> f64 {
		self.width / self.height
	}

	pub fn contains(&self, p: Vec2) -> bool {
		p.x.is_finite()
			&& p.y.is_finite()
			&& p.x >= 0.0
			&& p.y >= 0.0
			&& f64::from(p.x) <= self.width
			&& f64::from(p.y) <= self.height
	}
}

/// World-to-screen mapping, recomputed whenever the viewport changes.
///
/// Scales the bounds volume to cover the viewport (overflow is cropped),
/// centered on the canvas.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
	center: Vec2,
	scale: f32,
}

impl Projection {
	pub fn new(viewport: &Viewport, bounds: &Bounds) -> Self {
		let he = bounds.half_extents;
		let scale = f32::max(
			viewport.width() as f32 / (2.0 * he.x),
			viewport.height() as f32 / (2.0 * he.y),
		);
		Self {
			center: Vec2::new(
				viewport.width() as f32 / 2.0,
				viewport.height() as f32 / 2.0,
			),
			scale,
		}
	}

	/// Projects a world position to canvas pixels, with an extra
	/// screen-space shift (the parallax offset).
	pub fn to_screen(&self, world: Vec3, shift: Vec2) -> Vec2 {
		self.center + world.truncate() * self.scale + shift
	}

	/// Inverse mapping of a screen point onto the world XY plane.
	pub fn to_world(&self, screen: Vec2) -> Vec2 {
		(screen - self.center) / self.scale
	}

	pub fn scale(&self) -> f32 {
		self.scale
	}
}

/// World-space pointer position, if the pointer is over the surface.
///
/// The sentinel and any malformed or out-of-viewport coordinates all
/// resolve to `None`, which the simulation step treats as "no force".
pub fn world_target(cursor: &Cursor, viewport: &Viewport, projection: &Projection) -> Option<Vec3> {
	let p = cursor.screen_pos();
	if !viewport.contains(p) {
		return None;
	}
	Some(projection.to_world(p).extend(0.0))
}

/// Pointer position normalized to [-1, 1] on both axes.
pub fn normalized(cursor: &Cursor, viewport: &Viewport) -> Option<Vec2> {
	let p = cursor.screen_pos();
	if !viewport.contains(p) {
		return None;
	}
	Some(Vec2::new(
		(p.x / viewport.width() as f32) * 2.0 - 1.0,
		(p.y / viewport.height() as f32) * 2.0 - 1.0,
	))
}

/// Camera offset easing toward the pointer.
///
/// Exponential smoothing, so the shift slows as it approaches its goal
/// and glides back to center when the pointer leaves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallaxRig {
	offset: Vec2,
}

impl ParallaxRig {
	const EASE_RATE: f32 = 1.2;

	pub fn new() -> Self {
		Self::default()
	}

	pub fn advance(&mut self, target: Option<Vec2>, amount: f32, dt: f32) {
		let goal = target.unwrap_or(Vec2::ZERO) * amount;
		let blend = 1.0 - (-Self::EASE_RATE * dt).exp();
		self.offset += (goal - self.offset) * blend;
	}

	/// Current screen-space shift in pixels.
	pub fn offset(&self) -> Vec2 {
		self.offset
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn setup() -> (Viewport, Projection) {
		let viewport = Viewport::new(800.0, 600.0);
		let projection = Projection::new(&viewport, &Bounds::new(160.0, 160.0, 40.0));
		(viewport, projection)
	}

	#[test]
	fn fresh_cursor_has_no_world_target() {
		let (viewport, projection) = setup();
		let cursor = Cursor::new();
		assert!(world_target(&cursor, &viewport, &projection).is_none());
	}

	#[test]
	fn clear_returns_to_the_sentinel() {
		let (viewport, projection) = setup();
		let mut cursor = Cursor::new();
		cursor.set(400.0, 300.0);
		assert!(world_target(&cursor, &viewport, &projection).is_some());

		cursor.clear();
		assert_eq!(cursor.screen_pos(), Cursor::OFF_SCREEN);
		assert!(world_target(&cursor, &viewport, &projection).is_none());
	}

	#[test]
	fn malformed_coordinates_match_the_sentinel() {
		let (viewport, projection) = setup();
		let mut cursor = Cursor::new();
		for (x, y) in [(-50.0, 10.0), (1.0e9, 10.0), (f64::NAN, 10.0)] {
			cursor.set(x, y);
			assert!(world_target(&cursor, &viewport, &projection).is_none());
		}
	}

	#[test]
	fn rapid_updates_are_last_write_wins() {
		let mut cursor = Cursor::new();
		cursor.set(1.0, 1.0);
		cursor.set(2.0, 2.0);
		cursor.set(3.0, 4.0);
		assert_eq!(cursor.screen_pos(), glam::Vec2::new(3.0, 4.0));
	}

	#[test]
	fn center_of_screen_maps_to_world_origin() {
		let (viewport, projection) = setup();
		let mut cursor = Cursor::new();
		cursor.set(400.0, 300.0);
		let target = world_target(&cursor, &viewport, &projection).unwrap();
		assert!(target.length() < 1e-3);
	}

	#[test]
	fn projection_round_trips() {
		let (_, projection) = setup();
		let world = Vec3::new(37.0, -12.0, 0.0);
		let screen = projection.to_screen(world, Vec2::ZERO);
		let back = projection.to_world(screen);
		assert!((back - world.truncate()).length() < 1e-3);
	}

	#[test]
	fn bounds_cover_the_viewport() {
		let (viewport, projection) = setup();
		let corner = projection.to_screen(Vec3::new(160.0, 160.0, 0.0), Vec2::ZERO);
		assert!(f64::from(corner.x) >= viewport.width());
		assert!(f64::from(corner.y) >= viewport.height());
	}

	#[test]
	fn zero_sized_resize_is_clamped() {
		let mut viewport = Viewport::new(800.0, 600.0);
		viewport.resize(0.0, 0.0);
		assert!(viewport.width() >= 1.0);
		assert!(viewport.height() >= 1.0);
		assert!(viewport.aspect().is_finite());

		viewport.resize(f64::NAN, -4.0);
		assert!(viewport.aspect().is_finite());
	}

	#[test]
	fn normalized_spans_the_viewport() {
		let viewport = Viewport::new(800.0, 600.0);
		let mut cursor = Cursor::new();

		cursor.set(0.0, 0.0);
		assert_eq!(normalized(&cursor, &viewport), Some(Vec2::new(-1.0, -1.0)));
		cursor.set(800.0, 600.0);
		assert_eq!(normalized(&cursor, &viewport), Some(Vec2::new(1.0, 1.0)));
		cursor.clear();
		assert_eq!(normalized(&cursor, &viewport), None);
	}

	#[test]
	fn parallax_eases_toward_target_and_back() {
		let mut rig = ParallaxRig::new();
		for _ in 0..240 {
			rig.advance(Some(Vec2::new(1.0, 0.0)), 20.0, 1.0 / 60.0);
		}
		assert!((rig.offset().x - 20.0).abs() < 0.5);

		for _ in 0..240 {
			rig.advance(None, 20.0, 1.0 / 60.0);
		}
		assert!(rig.offset().length() < 0.5);
	}
}
