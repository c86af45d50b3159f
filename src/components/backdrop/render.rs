//! Canvas drawing for the backdrop.
//!
//! Two passes over a transparent canvas: link lines first, particles on
//! top. The page supplies the actual background; the backdrop only ever
//! clears its own pixels.

use std::f64::consts::PI;

use glam::{Vec2, Vec3};
use web_sys::CanvasRenderingContext2d;

use super::config::{BackdropConfig, LinkConfig};
use super::field::ParticleField;
use super::pointer::{Projection, Viewport};
use super::theme::Color;

/// Seconds over which an expiring particle fades out.
const EXPIRY_FADE: f32 = 1.5;

pub fn clear(ctx: &CanvasRenderingContext2d, viewport: &Viewport) {
	ctx.clear_rect(0.0, 0.0, viewport.width(), viewport.height());
}

/// Draws the proximity links, faded by distance so lines dissolve as
/// their endpoints drift apart.
pub fn draw_links(
	ctx: &CanvasRenderingContext2d,
	segments: &[[Vec3; 2]],
	link: &LinkConfig,
	projection: &Projection,
	shift: Vec2,
	color: Color,
) {
	ctx.set_line_width(1.0);
	for [a, b] in segments {
		let dist = (*a - *b).truncate().length();
		let alpha = link.opacity * f64::from(1.0 - dist / link.threshold);
		if alpha < 0.005 {
			continue;
		}

		let from = projection.to_screen(*a, shift);
		let to = projection.to_screen(*b, shift);
		ctx.set_stroke_style_str(&format!(
			"rgba({}, {}, {}, {})",
			color.r,
			color.g,
			color.b,
			alpha * color.a
		));
		ctx.begin_path();
		ctx.move_to(f64::from(from.x), f64::from(from.y));
		ctx.line_to(f64::from(to.x), f64::from(to.y));
		ctx.stroke();
	}
}

/// Draws every particle as a filled disc, sized and faded by depth, with
/// a slow per-particle twinkle.
pub fn draw_particles(
	ctx: &CanvasRenderingContext2d,
	field: &ParticleField,
	config: &BackdropConfig,
	projection: &Projection,
	shift: Vec2,
	color: Color,
	clock: f64,
) {
	let half_depth = config.bounds.half_extents.z;

	for i in 0..field.len() {
		let p = field.positions()[i];
		let depth = if half_depth > 0.0 {
			(p.z / half_depth + 1.0) / 2.0
		} else {
			0.5
		};

		let radius = f64::from(field.sizes()[i] * (0.5 + 0.7 * depth));
		let mut alpha = twinkle_alpha(field.phases()[i], clock) * f64::from(0.4 + 0.6 * depth);
		if let Some(remaining) = field.remaining_life(i) {
			alpha *= f64::from((remaining / EXPIRY_FADE).clamp(0.0, 1.0));
		}
		if alpha < 0.005 {
			continue;
		}

		let center = projection.to_screen(p, shift);
		ctx.set_fill_style_str(&format!(
			"rgba({}, {}, {}, {})",
			color.r,
			color.g,
			color.b,
			alpha * color.a
		));
		ctx.begin_path();
		let _ = ctx.arc(
			f64::from(center.x),
			f64::from(center.y),
			radius,
			0.0,
			PI * 2.0,
		);
		ctx.fill();
	}
}

/// Slow sine twinkle around a per-particle phase offset.
fn twinkle_alpha(phase: f32, clock: f64) -> f64 {
	((clock * 1.5 + f64::from(phase)).sin() * 0.5 + 0.5) * 0.4 + 0.6
}
