use super::config::FieldConfig;
use super::palette::{Palette, Rgba};
use super::state::FieldState;
use super::types::{Bounds, Connection, Node, PointerTracker};

/// Fill or stroke style for one draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	Solid(Rgba),
	Radial {
		x: f64,
		y: f64,
		r0: f64,
		r1: f64,
		from: Rgba,
		to: Rgba,
	},
	Linear {
		x0: f64,
		y0: f64,
		x1: f64,
		y1: f64,
		from: Rgba,
		to: Rgba,
	},
}

/// The handful of 2D primitives the field needs from a drawing backend.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, paint: &Paint);
}

/// Paint one frame, back to front. Reads state only.
pub fn render<S: Surface + ?Sized>(
	field: &FieldState,
	pointer: &PointerTracker,
	palette: &Palette,
	surface: &mut S,
) {
	let bounds = field.bounds;
	surface.clear(bounds.width, bounds.height);
	draw_background(bounds, palette, surface);
	draw_pointer_influence(&field.nodes, pointer, &field.config, palette, surface);
	for conn in &field.connections {
		if let Some((a, b)) = field.endpoints(conn) {
			draw_connection(conn, a, b, &field.config, palette, surface);
		}
	}
	for node in &field.nodes {
		draw_node(node, palette, surface);
	}
	draw_grid(bounds, field.config.grid_spacing, palette, surface);
}

pub fn draw_background<S: Surface + ?Sized>(bounds: Bounds, palette: &Palette, surface: &mut S) {
	let (cx, cy) = (bounds.width / 2.0, bounds.height / 2.0);
	let paint = Paint::Radial {
		x: cx,
		y: cy,
		r0: 0.0,
		r1: bounds.width.max(bounds.height),
		from: palette.background_start,
		to: palette.background_end,
	};
	surface.fill_rect(0.0, 0.0, bounds.width, bounds.height, &paint);
}

pub fn draw_pointer_influence<S: Surface + ?Sized>(
	nodes: &[Node],
	pointer: &PointerTracker,
	cfg: &FieldConfig,
	palette: &Palette,
	surface: &mut S,
) {
	if !pointer.is_active() {
		return;
	}
	let (x, y, radius) = (pointer.x, pointer.y, pointer.radius);
	surface.fill_circle(
		x,
		y,
		radius,
		&Paint::Radial {
			x,
			y,
			r0: 0.0,
			r1: radius,
			from: palette.pointer_glow_start,
			to: palette.pointer_glow_end,
		},
	);

	let near = nodes
		.iter()
		.map(|node| (node, node.distance_to(x, y)))
		.filter(|(_, distance)| *distance < radius)
		.take(cfg.pointer_link_cap);
	for (node, distance) in near {
		let strength = 1.0 - distance / radius;
		let paint = Paint::Linear {
			x0: x,
			y0: y,
			x1: node.x,
			y1: node.y,
			from: palette.pointer_link.with_alpha(strength * 0.25),
			to: palette.pointer_link.with_alpha(strength * 0.08),
		};
		surface.stroke_line((x, y), (node.x, node.y), strength * 1.2, &paint);
	}
}

pub fn draw_connection<S: Surface + ?Sized>(
	conn: &Connection,
	a: &Node,
	b: &Node,
	cfg: &FieldConfig,
	palette: &Palette,
	surface: &mut S,
) {
	if conn.strength <= 0.0 {
		return;
	}
	let shimmer = conn.pulse_phase.sin() * 0.3 + 0.7;
	let opacity = (conn.strength * shimmer * conn.appear_progress).min(cfg.link_max_opacity);
	let width = (conn.strength * cfg.link_width_per_strength).max(cfg.link_min_width);
	surface.stroke_line(
		(a.x, a.y),
		(b.x, b.y),
		width,
		&Paint::Solid(palette.edge.with_alpha(opacity)),
	);
}

pub fn draw_node<S: Surface + ?Sized>(node: &Node, palette: &Palette, surface: &mut S) {
	let (x, y, influence) = (node.x, node.y, node.mouse_influence);
	let breathing = 0.9 + 0.1 * node.pulse_phase.sin();

	let glow_radius = node.size * 4.0 * (1.0 + influence * 0.8);
	let glow_alpha = (node.opacity * node.activity * (0.9 + influence * 0.6) * breathing).min(1.0);
	surface.fill_circle(
		x,
		y,
		glow_radius,
		&Paint::Radial {
			x,
			y,
			r0: 0.0,
			r1: glow_radius,
			from: palette.node.with_alpha(glow_alpha),
			to: palette.node.with_alpha(0.0),
		},
	);

	let core_radius = node.size * (1.0 + influence * 0.5);
	let core_alpha = (node.opacity * 1.2 * breathing).min(1.0);
	surface.fill_circle(x, y, core_radius, &Paint::Solid(palette.node.with_alpha(core_alpha)));
	surface.fill_circle(
		x,
		y,
		core_radius * 0.5,
		&Paint::Solid(palette.node.with_alpha(core_alpha * 0.9)),
	);
}

pub fn draw_grid<S: Surface + ?Sized>(bounds: Bounds, spacing: f64, palette: &Palette, surface: &mut S) {
	if spacing <= 0.0 {
		return;
	}
	let paint = Paint::Solid(palette.grid);
	let mut x = 0.0;
	while x < bounds.width {
		surface.stroke_line((x, 0.0), (x, bounds.height), 1.0, &paint);
		x += spacing;
	}
	let mut y = 0.0;
	while y < bounds.height {
		surface.stroke_line((0.0, y), (bounds.width, y), 1.0, &paint);
		y += spacing;
	}
}

#[cfg(test)]
pub(crate) mod recording {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Call {
		Clear,
		Rect(Paint),
		Circle { x: f64, y: f64, radius: f64, paint: Paint },
		Line { from: (f64, f64), to: (f64, f64), width: f64, paint: Paint },
	}

	/// Surface that remembers every call instead of drawing.
	#[derive(Default)]
	pub struct Recorder {
		pub calls: Vec<Call>,
	}

	impl Surface for Recorder {
		fn clear(&mut self, _width: f64, _height: f64) {
			self.calls.push(Call::Clear);
		}

		fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64, paint: &Paint) {
			self.calls.push(Call::Rect(paint.clone()));
		}

		fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
			self.calls.push(Call::Circle {
				x,
				y,
				radius,
				paint: paint.clone(),
			});
		}

		fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, paint: &Paint) {
			self.calls.push(Call::Line {
				from,
				to,
				width,
				paint: paint.clone(),
			});
		}
	}
}
