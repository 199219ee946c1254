use log::debug;

use super::config::FieldConfig;
use super::prng::Xorshift64;
use super::types::{Bounds, Connection, Node};

/// The live population: nodes plus the connections built between them at
/// seed time.
pub struct FieldState {
	pub nodes: Vec<Node>,
	pub connections: Vec<Connection>,
	pub bounds: Bounds,
	pub config: FieldConfig,
}

impl FieldState {
	pub fn new(config: FieldConfig) -> Self {
		Self {
			nodes: Vec::new(),
			connections: Vec::new(),
			bounds: Bounds::new(0.0, 0.0),
			config,
		}
	}

	/// Throw away the current population and scatter `node_count` fresh nodes
	/// over `[0, width) × [0, height)`, then link every pair closer than the
	/// neighbor threshold.
	pub fn seed(&mut self, width: f64, height: f64, node_count: usize, rng: &mut Xorshift64) {
		self.bounds = Bounds::new(width, height);
		let nodes: Vec<Node> = (0..node_count)
			.map(|_| {
				let x = rng.next_range(&(0.0..width));
				let y = rng.next_range(&(0.0..height));
				Node::spawn(x, y, &self.config, rng)
			})
			.collect();
		self.nodes = nodes;
		self.rebuild_connections(rng);
		debug!(
			"Seeded {} nodes and {} connections over {}x{}",
			self.nodes.len(),
			self.connections.len(),
			width,
			height
		);
	}

	/// Replace the population with hand-placed nodes.
	#[cfg(test)]
	pub fn seed_with(&mut self, bounds: Bounds, nodes: Vec<Node>, rng: &mut Xorshift64) {
		self.bounds = bounds;
		self.nodes = nodes;
		self.rebuild_connections(rng);
	}

	fn rebuild_connections(&mut self, rng: &mut Xorshift64) {
		let threshold = self.config.neighbor_threshold;
		let mut connections = Vec::new();
		for (i, a) in self.nodes.iter().enumerate() {
			for (j, b) in self.nodes.iter().enumerate().skip(i + 1) {
				let distance = a.distance_to(b.x, b.y);
				if distance < threshold {
					connections.push(Connection::new(i, j, distance, rng));
				}
			}
		}
		self.connections = connections;
	}

	pub fn endpoints(&self, conn: &Connection) -> Option<(&Node, &Node)> {
		Some((self.nodes.get(conn.a)?, self.nodes.get(conn.b)?))
	}

	pub fn visible_connections(&self) -> usize {
		self.connections.iter().filter(|c| c.strength > 0.0).count()
	}
}
