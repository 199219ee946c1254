//! Lifecycle phases and the registry of things to undo at teardown.

/// `Uninitialized → Running → TornDown`, never backwards. A theme change
/// builds a fresh instance instead of re-entering `Running`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Uninitialized,
	Running,
	TornDown,
}

/// Cancel callbacks for listeners, frame requests and timers, run in reverse
/// registration order. Draining is idempotent, and dropping the registry
/// drains it too, so a forgotten teardown still releases global handlers.
#[derive(Default)]
pub struct Subscriptions {
	cancels: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl Subscriptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, label: &'static str, cancel: impl FnOnce() + 'static) {
		self.cancels.push((label, Box::new(cancel)));
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.cancels.len()
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.cancels.is_empty()
	}

	/// Run and forget every cancel callback. Returns how many ran.
	pub fn cancel_all(&mut self) -> usize {
		let count = self.cancels.len();
		while let Some((label, cancel)) = self.cancels.pop() {
			log::trace!("Releasing {label}");
			cancel();
		}
		count
	}
}

impl Drop for Subscriptions {
	fn drop(&mut self) {
		self.cancel_all();
	}
}
