//! Particle storage and randomized initialization.
//!
//! A [`ParticleField`] keeps all per-particle state in flat parallel
//! vectors; a particle's identity is its index and the population never
//! changes after construction. Variants with finite lifetimes respawn an
//! expired slot in place instead of shrinking the arrays.

use glam::Vec3;

use super::config::{BackdropConfig, ConfigError};

/// Fixed-population particle state, deterministic up to the supplied RNG.
#[derive(Debug)]
pub struct ParticleField {
	positions: Vec<Vec3>,
	velocities: Vec<Vec3>,
	sizes: Vec<f32>,
	phases: Vec<f32>,
	/// Remaining lifetime per slot; empty when particles never expire.
	lifespans: Vec<f32>,
	rng: fastrand::Rng,
}

impl ParticleField {
	/// Allocates and populates storage for `config.particle_count`
	/// particles, uniformly placed inside the bounds volume with random
	/// velocities under the speed cap.
	pub fn new(config: &BackdropConfig, rng: fastrand::Rng) -> Result<Self, ConfigError> {
		config.validate()?;

		let count = config.particle_count;
		let mut field = Self {
			positions: vec![Vec3::ZERO; count],
			velocities: vec![Vec3::ZERO; count],
			sizes: vec![0.0; count],
			phases: vec![0.0; count],
			lifespans: if config.lifespan.is_some() {
				vec![0.0; count]
			} else {
				Vec::new()
			},
			rng,
		};
		for i in 0..count {
			field.spawn_slot(i, config);
		}
		Ok(field)
	}

	/// Number of particles; constant for the life of the field.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	pub fn positions(&self) -> &[Vec3] {
		&self.positions
	}

	pub fn velocities(&self) -> &[Vec3] {
		&self.velocities
	}

	pub fn sizes(&self) -> &[f32] {
		&self.sizes
	}

	/// Per-particle twinkle offset, fixed at spawn.
	pub fn phases(&self) -> &[f32] {
		&self.phases
	}

	/// Remaining lifetime of slot `i`, if this field expires particles.
	pub fn remaining_life(&self, i: usize) -> Option<f32> {
		self.lifespans.get(i).copied()
	}

	pub(crate) fn kinematics_mut(&mut self) -> (&mut [Vec3], &mut [Vec3]) {
		(&mut self.positions, &mut self.velocities)
	}

	/// Counts down finite lifetimes and respawns expired slots in place.
	pub(crate) fn tick_lifespans(&mut self, dt: f32, config: &BackdropConfig) {
		if self.lifespans.is_empty() {
			return;
		}
		for i in 0..self.positions.len() {
			self.lifespans[i] -= dt;
			if self.lifespans[i] <= 0.0 {
				self.spawn_slot(i, config);
			}
		}
	}

	fn spawn_slot(&mut self, i: usize, config: &BackdropConfig) {
		let he = config.bounds.half_extents;
		self.positions[i] = Vec3::new(
			(self.rng.f32() * 2.0 - 1.0) * he.x,
			(self.rng.f32() * 2.0 - 1.0) * he.y,
			(self.rng.f32() * 2.0 - 1.0) * he.z,
		);

		let angle = self.rng.f32() * std::f32::consts::TAU;
		let speed = config.max_speed * (0.5 + 0.5 * self.rng.f32());
		self.velocities[i] =
			Vec3::new(angle.cos() * speed, angle.sin() * speed, 0.0) + config.velocity_bias;

		let (min_size, max_size) = config.size_range;
		self.sizes[i] = min_size + self.rng.f32() * (max_size - min_size);
		self.phases[i] = self.rng.f32() * std::f32::consts::TAU;

		if let Some(lifespan) = &config.lifespan {
			self.lifespans[i] = lifespan.min + self.rng.f32() * (lifespan.max - lifespan.min);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::backdrop::config::LifespanConfig;

	fn seeded(seed: u64) -> fastrand::Rng {
		fastrand::Rng::with_seed(seed)
	}

	#[test]
	fn initial_positions_lie_within_bounds() {
		let config = BackdropConfig {
			particle_count: 300,
			..BackdropConfig::constellation()
		};
		let field = ParticleField::new(&config, seeded(7)).unwrap();

		assert_eq!(field.len(), 300);
		for &p in field.positions() {
			assert!(config.bounds.contains(p), "{p} escapes bounds at init");
		}
	}

	#[test]
	fn initial_speeds_respect_the_cap() {
		let config = BackdropConfig::drift();
		let field = ParticleField::new(&config, seeded(11)).unwrap();

		for &v in field.velocities() {
			let planar = (v - config.velocity_bias).truncate().length();
			assert!(planar <= config.max_speed + 1e-4);
		}
	}

	#[test]
	fn sizes_stay_in_the_configured_range() {
		let config = BackdropConfig::constellation();
		let field = ParticleField::new(&config, seeded(3)).unwrap();

		let (min_size, max_size) = config.size_range;
		for &s in field.sizes() {
			assert!(s >= min_size && s <= max_size);
		}
	}

	#[test]
	fn zero_count_is_rejected() {
		let config = BackdropConfig {
			particle_count: 0,
			..BackdropConfig::drift()
		};
		assert_eq!(
			ParticleField::new(&config, seeded(1)).unwrap_err(),
			ConfigError::ParticleCount
		);
	}

	#[test]
	fn same_seed_same_field() {
		let config = BackdropConfig::constellation();
		let a = ParticleField::new(&config, seeded(42)).unwrap();
		let b = ParticleField::new(&config, seeded(42)).unwrap();

		assert_eq!(a.positions(), b.positions());
		assert_eq!(a.velocities(), b.velocities());
	}

	#[test]
	fn expired_slots_respawn_in_place() {
		let config = BackdropConfig {
			lifespan: Some(LifespanConfig { min: 0.5, max: 1.0 }),
			..BackdropConfig::embers()
		};
		let mut field = ParticleField::new(&config, seeded(9)).unwrap();
		let count = field.len();

		// Run well past every lifetime; population and bounds must hold.
		for _ in 0..100 {
			field.tick_lifespans(0.1, &config);
		}
		assert_eq!(field.len(), count);
		for &p in field.positions() {
			assert!(config.bounds.contains(p));
		}
		for i in 0..count {
			assert!(field.remaining_life(i).unwrap() > 0.0);
		}
	}

	#[test]
	fn non_expiring_fields_report_no_lifetime() {
		let config = BackdropConfig::drift();
		let field = ParticleField::new(&config, seeded(5)).unwrap();
		assert_eq!(field.remaining_life(0), None);
	}
}
