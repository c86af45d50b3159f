//! Proximity links between particles.
//!
//! Links are transient: the buffer is cleared and rebuilt from scratch
//! every frame from pairwise distances, so nothing persists between steps.
//! The pass is deliberately O(n²); particle counts are capped in the
//! hundreds to keep it inside a frame. A spatial index would change that
//! scaling but not any observable behavior.

use glam::Vec3;

/// Fixed-capacity buffer of line segments joining nearby particles.
pub struct LinkBuffer {
	segments: Vec<[Vec3; 2]>,
	capacity: usize,
}

impl LinkBuffer {
	pub fn new(capacity: usize) -> Self {
		Self {
			segments: Vec::with_capacity(capacity),
			capacity,
		}
	}

	/// Recomputes all links for this frame.
	///
	/// Visits every pair `(i, j)` with `i < j` and emits a segment when
	/// the XY-projected distance is under `threshold`. Emission stops
	/// silently once the buffer is full; overflow is a quality tradeoff,
	/// not an error.
	pub fn rebuild(&mut self, positions: &[Vec3], threshold: f32) {
		self.segments.clear();
		'outer: for (i, &a) in positions.iter().enumerate() {
			for &b in &positions[i + 1..] {
				if self.segments.len() >= self.capacity {
					break 'outer;
				}
				if (a - b).truncate().length() < threshold {
					self.segments.push([a, b]);
				}
			}
		}
	}

	pub fn segments(&self) -> &[[Vec3; 2]] {
		&self.segments
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}
}
