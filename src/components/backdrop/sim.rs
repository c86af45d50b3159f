//! The per-frame simulation step.
//!
//! Advances every particle by one tick: pointer force, damping, velocity
//! integration, boundary policy, lifetime countdown. The step is total:
//! it never fails and never changes the particle population.

use glam::Vec3;

use super::config::{BackdropConfig, BoundaryPolicy, ForceModel};
use super::field::ParticleField;

/// Fixed frame interval used when true elapsed time is not tracked.
pub const NOMINAL_DT: f32 = 1.0 / 60.0;

/// Advances the field by `dt` seconds.
///
/// `cursor_world` is the pointer in world coordinates, or `None` when the
/// pointer is off the surface (the off-screen sentinel and malformed
/// coordinates both arrive here as `None` and contribute zero force).
pub fn advance(
	field: &mut ParticleField,
	cursor_world: Option<Vec3>,
	config: &BackdropConfig,
	dt: f32,
) {
	let he = config.bounds.half_extents;
	let damping_factor = (1.0 - config.damping * dt).max(0.0);

	let (positions, velocities) = field.kinematics_mut();
	for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
		if let Some(target) = cursor_world {
			*v += pointer_accel(*p, target, config.force) * dt;
		}
		if config.damping > 0.0 {
			*v *= damping_factor;
		}

		*p += *v * dt;

		match config.boundary {
			BoundaryPolicy::Reflect => {
				reflect_axis(&mut p.x, &mut v.x, he.x);
				reflect_axis(&mut p.y, &mut v.y, he.y);
				reflect_axis(&mut p.z, &mut v.z, he.z);
			}
			BoundaryPolicy::Wrap => {
				wrap_axis(&mut p.x, he.x);
				wrap_axis(&mut p.y, he.y);
				wrap_axis(&mut p.z, he.z);
			}
		}
	}

	field.tick_lifespans(dt, config);
}

/// Acceleration from the pointer on a particle at `p`.
///
/// Linear falloff: full `strength` at the pointer, zero at and beyond the
/// interaction radius. Acts in the XY plane only.
fn pointer_accel(p: Vec3, target: Vec3, force: ForceModel) -> Vec3 {
	let (radius, strength, sign) = match force {
		ForceModel::Inert => return Vec3::ZERO,
		ForceModel::Attract { radius, strength } => (radius, strength, 1.0),
		ForceModel::Repel { radius, strength } => (radius, strength, -1.0),
	};

	let mut delta = target - p;
	delta.z = 0.0;
	let dist = delta.length();
	if dist >= radius || dist < 1e-3 {
		return Vec3::ZERO;
	}
	delta / dist * (strength * (1.0 - dist / radius) * sign)
}

fn reflect_axis(p: &mut f32, v: &mut f32, bound: f32) {
	if *p > bound {
		*p = bound;
		*v = -*v;
	} else if *p < -bound {
		*p = -bound;
		*v = -*v;
	}
}

fn wrap_axis(p: &mut f32, bound: f32) {
	if *p > bound {
		*p = -bound;
	} else if *p < -bound {
		*p = bound;
	}
}
