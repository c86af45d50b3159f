//! Backdrop engine configuration.
//!
//! Every animated background on the page is the same engine running a
//! different [`BackdropConfig`]. The named constructors bundle the handful
//! of looks the site actually uses; callers can equally build a config
//! field by field.

use glam::Vec3;
use thiserror::Error;

/// Rejected configuration, reported before any resource is acquired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	#[error("particle count must be positive")]
	ParticleCount,
	#[error("bounds volume must have positive extent")]
	EmptyBounds,
	#[error("particle size range is empty or inverted")]
	SizeRange,
	#[error("link threshold must be positive")]
	LinkThreshold,
	#[error("link capacity must be positive")]
	LinkCapacity,
	#[error("lifespan range is empty or inverted")]
	Lifespan,
}

/// Axis-aligned volume, centered on the origin, that particles live in.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
	/// Half-extent along each axis.
	pub half_extents: Vec3,
}

impl Bounds {
	pub fn new(x: f32, y: f32, z: f32) -> Self {
		Self {
			half_extents: Vec3::new(x, y, z),
		}
	}

	pub fn contains(&self, p: Vec3) -> bool {
		p.x.abs() <= self.half_extents.x
			&& p.y.abs() <= self.half_extents.y
			&& p.z.abs() <= self.half_extents.z
	}
}

/// What happens when a particle reaches a spatial limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryPolicy {
	/// Negate the offending velocity component and stay inside.
	Reflect,
	/// Teleport to the opposite bound.
	Wrap,
}

/// Pointer-relative force applied by the simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForceModel {
	/// Pointer has no effect on particle motion.
	Inert,
	/// Pull particles toward the pointer inside `radius`.
	Attract { radius: f32, strength: f32 },
	/// Push particles away from the pointer inside `radius`.
	Repel { radius: f32, strength: f32 },
}

/// Proximity-link rendering parameters.
#[derive(Clone, Copy, Debug)]
pub struct LinkConfig {
	/// Pairs closer than this (projected) distance get a line.
	pub threshold: f32,
	/// Hard cap on line segments per frame; excess pairs are dropped.
	pub max_links: usize,
	/// Peak line opacity at zero distance.
	pub opacity: f64,
}

/// Finite particle lifetime, in seconds. Expired slots respawn in place.
#[derive(Clone, Copy, Debug)]
pub struct LifespanConfig {
	pub min: f32,
	pub max: f32,
}

/// Complete parameterization of one backdrop instance.
#[derive(Clone, Debug)]
pub struct BackdropConfig {
	/// Number of simulated particles. Kept in the hundreds: the link pass
	/// is quadratic in this count.
	pub particle_count: usize,
	/// Volume particles are spawned into and bounded by.
	pub bounds: Bounds,
	/// Speed cap for randomized initial velocities, world units per second.
	pub max_speed: f32,
	/// Constant velocity added to every spawn (e.g. upward drift).
	pub velocity_bias: Vec3,
	/// Rendered particle radius range, pixels.
	pub size_range: (f32, f32),
	pub boundary: BoundaryPolicy,
	pub force: ForceModel,
	/// Per-second multiplicative velocity decay; 0 disables.
	pub damping: f32,
	/// Proximity-link pass; `None` renders dots only.
	pub links: Option<LinkConfig>,
	/// Camera shift toward the pointer, pixels at full deflection;
	/// 0 disables.
	pub parallax: f32,
	/// Finite particle lifetime; `None` means particles never expire.
	pub lifespan: Option<LifespanConfig>,
}

impl BackdropConfig {
	/// Checks the configuration before any storage or listener exists.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.particle_count == 0 {
			return Err(ConfigError::ParticleCount);
		}
		let he = self.bounds.half_extents;
		if he.x <= 0.0 || he.y <= 0.0 || he.z < 0.0 {
			return Err(ConfigError::EmptyBounds);
		}
		if self.size_range.0 <= 0.0 || self.size_range.1 < self.size_range.0 {
			return Err(ConfigError::SizeRange);
		}
		if let Some(links) = &self.links {
			if links.threshold <= 0.0 {
				return Err(ConfigError::LinkThreshold);
			}
			if links.max_links == 0 {
				return Err(ConfigError::LinkCapacity);
			}
		}
		if let Some(lifespan) = &self.lifespan {
			if lifespan.min <= 0.0 || lifespan.max < lifespan.min {
				return Err(ConfigError::Lifespan);
			}
		}
		Ok(())
	}

	/// Sparse drifting dots that wrap at the edges. The hero, skills, and
	/// contact sections run this look.
	pub fn drift() -> Self {
		Self {
			particle_count: 50,
			bounds: Bounds::new(160.0, 160.0, 40.0),
			max_speed: 9.0,
			velocity_bias: Vec3::ZERO,
			size_range: (1.0, 3.0),
			boundary: BoundaryPolicy::Wrap,
			force: ForceModel::Inert,
			damping: 0.0,
			links: None,
			parallax: 0.0,
			lifespan: None,
		}
	}

	/// Dense bounded field with proximity links and pointer parallax,
	/// the about-section look.
	pub fn constellation() -> Self {
		Self {
			particle_count: 150,
			bounds: Bounds::new(150.0, 150.0, 150.0),
			max_speed: 15.0,
			velocity_bias: Vec3::ZERO,
			size_range: (1.5, 3.0),
			boundary: BoundaryPolicy::Reflect,
			force: ForceModel::Inert,
			damping: 0.0,
			links: Some(LinkConfig {
				threshold: 50.0,
				max_links: 600,
				opacity: 0.12,
			}),
			parallax: 20.0,
			lifespan: None,
		}
	}

	/// Linked field that gathers around the pointer.
	pub fn nebula() -> Self {
		Self {
			particle_count: 120,
			bounds: Bounds::new(150.0, 150.0, 80.0),
			max_speed: 10.0,
			velocity_bias: Vec3::ZERO,
			size_range: (1.5, 3.5),
			boundary: BoundaryPolicy::Reflect,
			force: ForceModel::Attract {
				radius: 70.0,
				strength: 18.0,
			},
			damping: 0.25,
			links: Some(LinkConfig {
				threshold: 45.0,
				max_links: 400,
				opacity: 0.1,
			}),
			parallax: 12.0,
			lifespan: None,
		}
	}

	/// Short-lived rising sparks that scatter away from the pointer.
	pub fn embers() -> Self {
		Self {
			particle_count: 80,
			bounds: Bounds::new(160.0, 160.0, 30.0),
			max_speed: 6.0,
			velocity_bias: Vec3::new(0.0, -14.0, 0.0),
			size_range: (1.0, 2.5),
			boundary: BoundaryPolicy::Wrap,
			force: ForceModel::Repel {
				radius: 60.0,
				strength: 25.0,
			},
			damping: 0.1,
			links: None,
			parallax: 0.0,
			lifespan: Some(LifespanConfig {
				min: 4.0,
				max: 10.0,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_are_valid() {
		for config in [
			BackdropConfig::drift(),
			BackdropConfig::constellation(),
			BackdropConfig::nebula(),
			BackdropConfig::embers(),
		] {
			config.validate().unwrap();
		}
	}

	#[test]
	fn rejects_zero_particles() {
		let config = BackdropConfig {
			particle_count: 0,
			..BackdropConfig::drift()
		};
		assert_eq!(config.validate(), Err(ConfigError::ParticleCount));
	}

	#[test]
	fn rejects_empty_bounds() {
		let config = BackdropConfig {
			bounds: Bounds::new(0.0, 100.0, 10.0),
			..BackdropConfig::drift()
		};
		assert_eq!(config.validate(), Err(ConfigError::EmptyBounds));
	}

	#[test]
	fn rejects_degenerate_links() {
		let mut config = BackdropConfig::constellation();
		config.links = Some(LinkConfig {
			threshold: 0.0,
			max_links: 100,
			opacity: 0.1,
		});
		assert_eq!(config.validate(), Err(ConfigError::LinkThreshold));

		config.links = Some(LinkConfig {
			threshold: 50.0,
			max_links: 0,
			opacity: 0.1,
		});
		assert_eq!(config.validate(), Err(ConfigError::LinkCapacity));
	}

	#[test]
	fn rejects_inverted_ranges() {
		let config = BackdropConfig {
			size_range: (3.0, 1.0),
			..BackdropConfig::drift()
		};
		assert_eq!(config.validate(), Err(ConfigError::SizeRange));

		let config = BackdropConfig {
			lifespan: Some(LifespanConfig { min: 5.0, max: 1.0 }),
			..BackdropConfig::drift()
		};
		assert_eq!(config.validate(), Err(ConfigError::Lifespan));
	}

	#[test]
	fn bounds_containment() {
		let bounds = Bounds::new(10.0, 20.0, 5.0);
		assert!(bounds.contains(Vec3::new(10.0, -20.0, 0.0)));
		assert!(!bounds.contains(Vec3::new(10.1, 0.0, 0.0)));
		assert!(!bounds.contains(Vec3::new(0.0, 0.0, -5.5)));
	}
}
