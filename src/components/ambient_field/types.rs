use super::config::FieldConfig;
use super::prng::Xorshift64;

/// Off-screen pointer position used when no pointer is active.
pub const POINTER_SENTINEL: f64 = -1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn is_drawable(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}

	#[cfg(test)]
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub base_size: f64,
	pub opacity: f64,
	pub activity: f64,
	pub pulse_phase: f64,
	pub mouse_influence: f64,
	pub direction_timer: u32,
	pub direction_interval: u32,
}

impl Node {
	/// A node at `(x, y)` with randomized heading, speed and look.
	pub fn spawn(x: f64, y: f64, cfg: &FieldConfig, rng: &mut Xorshift64) -> Self {
		let angle = rng.next_angle();
		let speed = rng.next_range(&cfg.initial_speed);
		let size = rng.next_range(&cfg.base_size);
		Self {
			x,
			y,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			size,
			base_size: size,
			opacity: rng.next_range(&cfg.opacity),
			activity: rng.next_range(&cfg.activity),
			pulse_phase: rng.next_angle(),
			mouse_influence: 0.0,
			direction_timer: 0,
			direction_interval: rng.next_u32_in(&cfg.direction_interval),
		}
	}

	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}

	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		(self.x - x).hypot(self.y - y)
	}
}

/// Edge between nodes `a` and `b`, stored as indices into the node list that
/// was seeded alongside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
	pub strength: f64,
	pub pulse_phase: f64,
	pub appear_progress: f64,
}

impl Connection {
	pub fn new(a: usize, b: usize, distance: f64, rng: &mut Xorshift64) -> Self {
		Self {
			a,
			b,
			distance,
			strength: 0.0,
			pulse_phase: rng.next_angle(),
			appear_progress: 0.0,
		}
	}

	pub fn is_appearing(&self) -> bool {
		self.appear_progress < 1.0
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerTracker {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

impl PointerTracker {
	pub fn new(radius: f64) -> Self {
		Self {
			x: POINTER_SENTINEL,
			y: POINTER_SENTINEL,
			radius,
		}
	}

	pub fn move_to(&mut self, x: f64, y: f64) {
		if x.is_finite() && y.is_finite() {
			self.x = x;
			self.y = y;
		} else {
			self.clear();
		}
	}

	pub fn clear(&mut self) {
		self.x = POINTER_SENTINEL;
		self.y = POINTER_SENTINEL;
	}

	/// False while parked at the sentinel (or anywhere off the top/left).
	pub fn is_active(&self) -> bool {
		self.x >= 0.0 && self.y >= 0.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn spawned_node_respects_config_ranges() {
		let cfg = FieldConfig::default();
		let mut rng = Xorshift64::new(11);
		for _ in 0..200 {
			let n = Node::spawn(1.0, 2.0, &cfg, &mut rng);
			let speed = n.speed();
			assert!(
				speed >= cfg.initial_speed.start - 1e-12 && speed < cfg.initial_speed.end + 1e-12,
				"speed {speed}"
			);
			assert!(cfg.base_size.contains(&n.base_size));
			assert_eq!(n.size, n.base_size);
			assert!(cfg.opacity.contains(&n.opacity));
			assert!(cfg.activity.contains(&n.activity));
			assert!(cfg.direction_interval.contains(&n.direction_interval));
			assert_eq!(n.mouse_influence, 0.0);
		}
	}

	#[test]
	fn pointer_starts_parked_and_rejects_garbage() {
		let mut p = PointerTracker::new(150.0);
		assert!(!p.is_active());
		p.move_to(10.0, 20.0);
		assert!(p.is_active());
		p.move_to(f64::NAN, 5.0);
		assert_eq!((p.x, p.y), (POINTER_SENTINEL, POINTER_SENTINEL));
	}

	#[test]
	fn bounds_are_half_open() {
		let b = Bounds::new(800.0, 600.0);
		assert!(b.contains(0.0, 0.0));
		assert!(!b.contains(800.0, 10.0));
		assert!(!b.contains(10.0, 600.0));
		assert!(!Bounds::new(0.0, 600.0).is_drawable());
		assert!(!Bounds::new(f64::INFINITY, 600.0).is_drawable());
	}
}
