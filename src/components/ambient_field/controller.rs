use log::{debug, info, warn};

use super::config::FieldConfig;
use super::error::FieldError;
use super::lifecycle::Phase;
use super::palette::{Palette, Theme};
use super::prng::Xorshift64;
use super::render::{self, Surface};
use super::state::FieldState;
use super::step;
use super::types::{Bounds, PointerTracker};

/// What one call to [`AmbientField::frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
	/// Stepped and painted; schedule another frame.
	Drawn,
	/// No surface or empty viewport; nothing happened, try again next frame.
	Skipped,
	/// Not running; do not schedule again.
	Stopped,
}

impl FrameStatus {
	pub fn wants_next_frame(self) -> bool {
		self != FrameStatus::Stopped
	}
}

/// One field instance: population, pointer, pulse flag and palette, plus the
/// phase that gates all of it. Knows nothing about the browser; the component
/// feeds it events and a surface.
pub struct AmbientField {
	phase: Phase,
	field: FieldState,
	pointer: PointerTracker,
	palette: &'static Palette,
	pulse: bool,
	frames: u64,
	rng: Xorshift64,
}

impl AmbientField {
	pub fn new(theme: Theme, config: FieldConfig, rng: Xorshift64) -> Self {
		Self {
			phase: Phase::Uninitialized,
			pointer: PointerTracker::new(config.influence_radius),
			field: FieldState::new(config),
			palette: theme.palette(),
			pulse: false,
			frames: 0,
			rng,
		}
	}

	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	/// Seed for the given viewport and enter `Running`. An empty viewport
	/// (window not laid out yet) still enters `Running` with no population;
	/// the first usable resize seeds it.
	pub fn mount(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
		if self.phase != Phase::Uninitialized {
			return Err(FieldError::InvalidTransition {
				from: self.phase,
				to: Phase::Running,
			});
		}
		self.phase = Phase::Running;
		if !Bounds::new(width, height).is_drawable() {
			warn!("Viewport {}x{} not ready, waiting for a resize", width, height);
			return Ok(());
		}
		self.reseed(width, height);
		info!(
			"Ambient field running: {}x{}, {} nodes, {} connections",
			width,
			height,
			self.field.nodes.len(),
			self.field.connections.len()
		);
		Ok(())
	}

	/// Full re-seed for the new viewport; positions are not carried over.
	pub fn resize(&mut self, width: f64, height: f64) {
		if !self.is_running() {
			return;
		}
		if !Bounds::new(width, height).is_drawable() {
			warn!("Ignoring resize to {}x{}", width, height);
			return;
		}
		self.reseed(width, height);
	}

	fn reseed(&mut self, width: f64, height: f64) {
		let count = self.field.config.node_count;
		self.field.seed(width, height, count, &mut self.rng);
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer.move_to(x, y);
	}

	pub fn pointer_left(&mut self) {
		self.pointer.clear();
	}

	pub fn set_pulse(&mut self, on: bool) {
		self.pulse = on;
	}

	/// Milliseconds until the next pulse, drawn fresh each time.
	pub fn next_pulse_delay_ms(&mut self) -> i32 {
		self.rng.next_range(&self.field.config.pulse_gap_ms) as i32
	}

	pub fn pulse_duration_ms(&self) -> i32 {
		self.field.config.pulse_duration_ms
	}

	/// Step and paint once. A missing surface skips the frame without
	/// touching state.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: Option<&mut S>) -> FrameStatus {
		if !self.is_running() {
			return FrameStatus::Stopped;
		}
		let Some(surface) = surface else {
			return FrameStatus::Skipped;
		};
		if !self.field.bounds.is_drawable() {
			return FrameStatus::Skipped;
		}
		step::advance(&mut self.field, &self.pointer, self.pulse, &mut self.rng);
		render::render(&self.field, &self.pointer, self.palette, surface);

		self.frames += 1;
		let every = self.field.config.stats_every;
		if every > 0 && self.frames % every == 0 {
			debug!(
				"frame {}: {} nodes, {} visible connections",
				self.frames,
				self.field.nodes.len(),
				self.field.visible_connections()
			);
		}
		FrameStatus::Drawn
	}

	/// Leave `Running` for good. Safe to call any number of times.
	pub fn teardown(&mut self) {
		if self.phase == Phase::TornDown {
			return;
		}
		if self.phase == Phase::Running {
			info!("Ambient field torn down after {} frames", self.frames);
		}
		self.phase = Phase::TornDown;
		self.pulse = false;
	}
}

#[cfg(test)]
impl AmbientField {
	fn phase(&self) -> Phase {
		self.phase
	}

	fn field(&self) -> &FieldState {
		&self.field
	}

	fn pointer(&self) -> &PointerTracker {
		&self.pointer
	}

	fn pulse(&self) -> bool {
		self.pulse
	}

	fn frames(&self) -> u64 {
		self.frames
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::ambient_field::render::recording::{Call, Recorder};

	fn field() -> AmbientField {
		AmbientField::new(Theme::Dark, FieldConfig::default(), Xorshift64::new(99))
	}

	#[test]
	fn mount_seeds_and_runs() {
		let mut f = field();
		assert_eq!(f.phase(), Phase::Uninitialized);
		f.mount(800.0, 600.0).unwrap();
		assert!(f.is_running());
		assert_eq!(f.field().nodes.len(), 50);
		assert_eq!(f.field().bounds, Bounds::new(800.0, 600.0));
	}

	#[test]
	fn mount_twice_is_rejected() {
		let mut f = field();
		f.mount(800.0, 600.0).unwrap();
		let err = f.mount(800.0, 600.0).unwrap_err();
		assert!(matches!(
			err,
			FieldError::InvalidTransition {
				from: Phase::Running,
				to: Phase::Running
			}
		));
	}

	#[test]
	fn empty_viewport_waits_for_first_resize() {
		let mut f = field();
		f.mount(0.0, 0.0).unwrap();
		assert_eq!(f.phase(), Phase::Running);
		assert!(f.field().nodes.is_empty());

		let mut rec = Recorder::default();
		assert_eq!(f.frame(Some(&mut rec)), FrameStatus::Skipped);
		assert!(rec.calls.is_empty());
		assert_eq!(f.frames(), 0);

		f.resize(1024.0, 768.0);
		assert_eq!(f.field().nodes.len(), 50);
		assert_eq!(f.frame(Some(&mut rec)), FrameStatus::Drawn);
		assert_eq!(rec.calls.first(), Some(&Call::Clear));
	}

	#[test]
	fn frame_without_surface_skips_and_keeps_state() {
		let mut f = field();
		f.mount(800.0, 600.0).unwrap();
		let before = f.field().nodes.clone();
		assert_eq!(f.frame::<Recorder>(None), FrameStatus::Skipped);
		assert_eq!(f.field().nodes, before);
		assert_eq!(f.frames(), 0);
	}

	#[test]
	fn frame_before_mount_is_stopped() {
		let mut f = field();
		let mut rec = Recorder::default();
		assert_eq!(f.frame(Some(&mut rec)), FrameStatus::Stopped);
		assert!(rec.calls.is_empty());
	}

	#[test]
	fn frame_steps_and_draws() {
		let mut f = field();
		f.mount(800.0, 600.0).unwrap();
		let before = f.field().nodes.clone();
		let mut rec = Recorder::default();
		assert_eq!(f.frame(Some(&mut rec)), FrameStatus::Drawn);
		assert_eq!(rec.calls.first(), Some(&Call::Clear));
		assert_ne!(f.field().nodes, before);
		assert_eq!(f.frames(), 1);
	}

	#[test]
	fn teardown_stops_drawing_and_is_idempotent() {
		let mut f = field();
		f.mount(800.0, 600.0).unwrap();
		let mut rec = Recorder::default();
		f.frame(Some(&mut rec));
		let drawn = rec.calls.len();
		f.teardown();
		f.teardown();
		assert_eq!(f.phase(), Phase::TornDown);
		for _ in 0..3 {
			assert_eq!(f.frame(Some(&mut rec)), FrameStatus::Stopped);
		}
		assert_eq!(rec.calls.len(), drawn);
		assert!(!FrameStatus::Stopped.wants_next_frame());
	}

	#[test]
	fn torn_down_field_cannot_remount() {
		let mut f = field();
		f.mount(800.0, 600.0).unwrap();
		f.teardown();
		assert!(f.mount(800.0, 600.0).is_err());
	}

	#[test]
	fn resize_reseeds_for_new_viewport() {
		let mut f = field();
		f.mount(800.0, 600.0).unwrap();
		f.resize(320.0, 240.0);
		assert_eq!(f.field().bounds, Bounds::new(320.0, 240.0));
		assert_eq!(f.field().nodes.len(), 50);
		assert!(f.field().nodes.iter().all(|n| n.x < 320.0 && n.y < 240.0));

		f.resize(0.0, 0.0);
		assert_eq!(f.field().bounds, Bounds::new(320.0, 240.0));
	}

	#[test]
	fn pointer_leave_restores_sentinel() {
		let mut f = field();
		f.mount(800.0, 600.0).unwrap();
		f.pointer_moved(10.0, 10.0);
		assert!(f.pointer().is_active());
		f.pointer_left();
		assert!(!f.pointer().is_active());
	}

	#[test]
	fn pulse_delay_within_gap_range() {
		let mut f = field();
		for _ in 0..100 {
			let d = f.next_pulse_delay_ms();
			assert!((5000..8000).contains(&d), "delay {d}");
		}
		f.set_pulse(true);
		assert!(f.pulse());
		f.teardown();
		assert!(!f.pulse());
	}
}
