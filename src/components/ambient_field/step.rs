//! Per-frame update rules. Nodes and connections each follow local rules, so a
//! frame costs O(nodes + connections).

use super::config::FieldConfig;
use super::prng::Xorshift64;
use super::state::FieldState;
use super::types::{Bounds, Connection, Node, PointerTracker};

/// Advance every connection, then every node, by one frame.
pub fn advance(field: &mut FieldState, pointer: &PointerTracker, pulse: bool, rng: &mut Xorshift64) {
	let FieldState {
		nodes,
		connections,
		bounds,
		config,
	} = field;
	for conn in connections.iter_mut() {
		step_connection(conn, nodes, config);
	}
	for node in nodes.iter_mut() {
		step_node(node, pointer, *bounds, pulse, config, rng);
	}
}

pub fn step_node(
	node: &mut Node,
	pointer: &PointerTracker,
	bounds: Bounds,
	pulse: bool,
	cfg: &FieldConfig,
	rng: &mut Xorshift64,
) {
	// Pointer repulsion
	let (dx, dy) = (node.x - pointer.x, node.y - pointer.y);
	let distance = dx.hypot(dy);
	if distance < pointer.radius {
		node.mouse_influence = 1.0 - distance / pointer.radius;
		let force = node.mouse_influence * cfg.repulsion;
		let angle = if distance > 0.0 {
			dy.atan2(dx)
		} else {
			rng.next_angle()
		};
		node.vx += angle.cos() * force;
		node.vy += angle.sin() * force;
		node.activity = (node.activity + cfg.activity_rise).min(1.0);
	} else {
		node.mouse_influence *= cfg.influence_decay;
		node.activity = (node.activity - cfg.activity_decay).max(cfg.activity_floor);
	}

	node.direction_timer += 1;
	if node.direction_timer >= node.direction_interval {
		let jitter = -cfg.direction_jitter..cfg.direction_jitter;
		node.vx += rng.next_range(&jitter);
		node.vy += rng.next_range(&jitter);
		node.direction_timer = 0;
		node.direction_interval = rng.next_u32_in(&cfg.direction_interval);
	}

	// Damping runs before the floor so the floor holds after the step.
	node.vx *= cfg.damping;
	node.vy *= cfg.damping;
	enforce_min_speed(node, cfg.min_speed, rng);

	node.x = wrap(node.x + node.vx, bounds.width);
	node.y = wrap(node.y + node.vy, bounds.height);

	if pulse {
		node.size = (node.size * cfg.pulse_growth).min(node.base_size * cfg.pulse_max_scale);
	} else {
		node.size = (node.size * cfg.pulse_shrink).max(node.base_size);
	}

	node.pulse_phase += cfg.node_phase_step;
}

fn enforce_min_speed(node: &mut Node, min_speed: f64, rng: &mut Xorshift64) {
	let speed = node.speed();
	if speed >= min_speed {
		return;
	}
	if speed > f64::EPSILON {
		let scale = min_speed / speed;
		node.vx *= scale;
		node.vy *= scale;
	} else {
		let angle = rng.next_angle();
		node.vx = angle.cos() * min_speed;
		node.vy = angle.sin() * min_speed;
	}
	// rescaling can round a hair under the floor
	let speed = node.speed();
	if speed < min_speed {
		let nudge = min_speed / speed * (1.0 + 1e-12);
		node.vx *= nudge;
		node.vy *= nudge;
	}
}

/// Toroidal wrap into `[0, extent)`.
fn wrap(v: f64, extent: f64) -> f64 {
	if extent <= 0.0 {
		return 0.0;
	}
	let w = v.rem_euclid(extent);
	if w < extent { w } else { 0.0 }
}

pub fn step_connection(conn: &mut Connection, nodes: &[Node], cfg: &FieldConfig) {
	let (Some(a), Some(b)) = (nodes.get(conn.a), nodes.get(conn.b)) else {
		conn.strength = 0.0;
		return;
	};
	conn.distance = a.distance_to(b.x, b.y);
	conn.pulse_phase += cfg.link_phase_step;

	if conn.is_appearing() {
		conn.appear_progress = (conn.appear_progress + cfg.appear_step).min(1.0);
	}

	let threshold = cfg.neighbor_threshold;
	conn.strength = if conn.distance < threshold {
		let proximity = 1.0 - conn.distance / threshold;
		let pointer = (a.mouse_influence + b.mouse_influence) / 2.0;
		(proximity * cfg.proximity_weight + pointer * cfg.pointer_weight).min(1.0)
	} else {
		0.0
	};
}
