//! Tunable constants for the ambient field.

use std::ops::Range;

/// Every knob the simulation, renderer and pulse timer read.
///
/// Defaults reproduce the look of the portfolio background: a sparse, slowly
/// drifting network that bunches away from the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
	/// Nodes created by every seed.
	pub node_count: usize,
	/// Pairs closer than this get a connection, and connections longer than
	/// this go dark.
	pub neighbor_threshold: f64,
	/// Distance within which the pointer pushes nodes away.
	pub influence_radius: f64,

	pub initial_speed: Range<f64>,
	pub min_speed: f64,
	pub damping: f64,
	pub repulsion: f64,

	pub base_size: Range<f64>,
	pub opacity: Range<f64>,
	pub activity: Range<f64>,
	pub activity_rise: f64,
	pub activity_decay: f64,
	pub activity_floor: f64,
	pub influence_decay: f64,

	/// Frames between random heading nudges.
	pub direction_interval: Range<u32>,
	/// Half-width of the per-axis velocity nudge.
	pub direction_jitter: f64,

	pub pulse_growth: f64,
	pub pulse_max_scale: f64,
	pub pulse_shrink: f64,
	pub pulse_duration_ms: i32,
	pub pulse_gap_ms: Range<f64>,

	pub node_phase_step: f64,
	pub link_phase_step: f64,
	pub appear_step: f64,

	pub proximity_weight: f64,
	pub pointer_weight: f64,
	pub link_min_width: f64,
	pub link_width_per_strength: f64,
	pub link_max_opacity: f64,

	pub pointer_link_cap: usize,
	pub grid_spacing: f64,

	/// Frames between debug stat lines. Zero disables them.
	pub stats_every: u64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			node_count: 50,
			neighbor_threshold: 200.0,
			influence_radius: 150.0,

			initial_speed: 0.2..0.5,
			min_speed: 0.15,
			damping: 0.995,
			repulsion: 0.21,

			base_size: 1.5..4.0,
			opacity: 0.7..1.0,
			activity: 0.5..1.0,
			activity_rise: 0.05,
			activity_decay: 0.005,
			activity_floor: 0.3,
			influence_decay: 0.95,

			direction_interval: 100..300,
			direction_jitter: 0.05,

			pulse_growth: 1.03,
			pulse_max_scale: 1.8,
			pulse_shrink: 0.97,
			pulse_duration_ms: 1000,
			pulse_gap_ms: 5000.0..8000.0,

			node_phase_step: 0.015,
			link_phase_step: 0.008,
			appear_step: 0.05,

			proximity_weight: 0.6,
			pointer_weight: 0.2,
			link_min_width: 2.0,
			link_width_per_strength: 4.5,
			link_max_opacity: 0.95,

			pointer_link_cap: 15,
			grid_spacing: 50.0,

			stats_every: 600,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strength_weights_keep_strength_within_unit_interval() {
		let cfg = FieldConfig::default();
		let max = cfg.proximity_weight + cfg.pointer_weight;
		assert!(max <= 1.0, "max strength {max} exceeds 1");
		assert!(cfg.proximity_weight > cfg.pointer_weight);
	}

	#[test]
	fn damping_is_a_contraction() {
		let cfg = FieldConfig::default();
		assert!(cfg.damping > 0.0 && cfg.damping < 1.0);
		assert!(cfg.influence_decay < 1.0);
		assert!(cfg.activity_floor > 0.0);
	}
}
