//! Xorshift64 generator used for seeding and jitter.
//!
//! The field is decoration, so nothing here needs to be reproducible across
//! reloads; a seedable generator just keeps `getrandom` out of the wasm build
//! and lets tests pin the sequence.

use std::f64::consts::TAU;
use std::ops::Range;

#[derive(Clone, Debug)]
pub struct Xorshift64 {
	state: u64,
}

impl Xorshift64 {
	const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

	/// Zero is a fixed point of xorshift and gets replaced.
	pub fn new(seed: u64) -> Self {
		Self {
			state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
		}
	}

	/// Seed from the browser clock mixed with `Math.random`.
	pub fn from_entropy() -> Self {
		let clock = js_sys::Date::now().to_bits();
		let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
		Self::new(clock ^ noise.rotate_left(32))
	}

	pub fn next_u64(&mut self) -> u64 {
		self.state ^= self.state << 13;
		self.state ^= self.state >> 7;
		self.state ^= self.state << 17;
		self.state
	}

	/// Uniform in [0, 1).
	pub fn next_f64(&mut self) -> f64 {
		(self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
	}

	/// Uniform in `range`; an empty range yields its start.
	pub fn next_range(&mut self, range: &Range<f64>) -> f64 {
		if range.is_empty() {
			return range.start;
		}
		let v = range.start + self.next_f64() * (range.end - range.start);
		// rounding can land exactly on the open end
		if v < range.end { v } else { range.start }
	}

	pub fn next_u32_in(&mut self, range: &Range<u32>) -> u32 {
		if range.is_empty() {
			return range.start;
		}
		range.start + (self.next_u64() % u64::from(range.end - range.start)) as u32
	}

	/// Uniform heading in [0, 2π).
	pub fn next_angle(&mut self) -> f64 {
		self.next_f64() * TAU
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn seed_zero_does_not_stick() {
		let mut rng = Xorshift64::new(0);
		assert_ne!(rng.next_u64(), 0);
		assert_ne!(rng.next_u64(), 0);
	}

	#[test]
	fn same_seed_same_sequence() {
		let (mut a, mut b) = (Xorshift64::new(7), Xorshift64::new(7));
		for i in 0..500 {
			assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
		}
	}

	#[test]
	fn empty_ranges_collapse_to_start() {
		let mut rng = Xorshift64::new(3);
		assert_eq!(rng.next_range(&(2.0..2.0)), 2.0);
		assert_eq!(rng.next_u32_in(&(9..9)), 9);
	}

	proptest! {
		#[test]
		fn next_range_stays_in_bounds(seed: u64, lo in -1e4_f64..1e4, span in 0.001_f64..1e4) {
			let mut rng = Xorshift64::new(seed);
			let range = lo..lo + span;
			for _ in 0..64 {
				let v = rng.next_range(&range);
				prop_assert!(v >= range.start && v < range.end, "{v} outside {range:?}");
			}
		}

		#[test]
		fn next_u32_in_stays_in_bounds(seed: u64, lo in 0_u32..1000, span in 1_u32..1000) {
			let mut rng = Xorshift64::new(seed);
			for _ in 0..64 {
				let v = rng.next_u32_in(&(lo..lo + span));
				prop_assert!(v >= lo && v < lo + span);
			}
		}
	}
}
