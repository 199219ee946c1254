use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, MouseEvent,
	TouchEvent, Window,
};

use super::canvas::context_2d;
use super::config::FieldConfig;
use super::controller::AmbientField;
use super::error::FieldError;
use super::lifecycle::Subscriptions;
use super::palette::Theme;
use super::prng::Xorshift64;

const CANVAS_STYLE: &str = "position: fixed; inset: 0; width: 100%; height: 100%; \
	display: block; pointer-events: none; z-index: 0;";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Full-viewport animated network behind the page content.
///
/// The theme is read once. Switching theme means rendering a new instance,
/// which tears this one down through `on_cleanup`.
#[component]
pub fn AmbientFieldCanvas(
	#[prop(default = Theme::Dark)] theme: Theme,
	#[prop(default = None)] config: Option<FieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let failed = RwSignal::new(false);
	let host: Rc<RefCell<Option<FieldHost>>> = Rc::new(RefCell::new(None));
	let host_init = host.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if host_init.borrow().is_some() || failed.get_untracked() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match FieldHost::mount(canvas, theme, config.clone().unwrap_or_default()) {
			Ok(mounted) => *host_init.borrow_mut() = Some(mounted),
			Err(e) => {
				error!("Ambient field omitted: {e}");
				failed.set(true);
			}
		}
	});

	let host = SendWrapper::new(host);
	on_cleanup(move || {
		if let Some(mut mounted) = host.borrow_mut().take() {
			mounted.teardown();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-field-canvas"
			aria-hidden="true"
			style=move || if failed.get() { "display: none;" } else { CANVAS_STYLE }
		/>
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenOn {
	Window,
	Root,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerInput {
	Mouse,
	Touch,
	Leave,
}

/// Pointer listeners. `mouseleave` does not bubble and never reaches
/// `window`, so it goes on `<html>`, which every engine fires it on when the
/// pointer exits the viewport.
const POINTER_LISTENERS: [(ListenOn, &str, PointerInput); 4] = [
	(ListenOn::Window, "mousemove", PointerInput::Mouse),
	(ListenOn::Window, "touchmove", PointerInput::Touch),
	(ListenOn::Window, "touchend", PointerInput::Leave),
	(ListenOn::Root, "mouseleave", PointerInput::Leave),
];

/// Events of the wrong type or without a touch point are ignored.
fn apply_pointer(field: &mut AmbientField, input: PointerInput, ev: &Event) {
	match input {
		PointerInput::Mouse => {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				field.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
			}
		}
		PointerInput::Touch => {
			let touch = ev
				.dyn_ref::<TouchEvent>()
				.and_then(|ev| ev.touches().get(0));
			if let Some(touch) = touch {
				field.pointer_moved(touch.client_x() as f64, touch.client_y() as f64);
			}
		}
		PointerInput::Leave => field.pointer_left(),
	}
}

/// Browser side of a running field: the controller plus every listener,
/// frame request and timer registered for it.
struct FieldHost {
	field: Rc<RefCell<AmbientField>>,
	subscriptions: Subscriptions,
}

impl FieldHost {
	fn mount(canvas: HtmlCanvasElement, theme: Theme, config: FieldConfig) -> Result<Self, FieldError> {
		let window = web_sys::window().ok_or(FieldError::NoWindow)?;
		let document = window.document().ok_or(FieldError::NoDocument)?;

		let (w, h) = viewport(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let field = AmbientField::new(theme, config, Xorshift64::from_entropy());
		let field = Rc::new(RefCell::new(field));
		field.borrow_mut().mount(w, h)?;

		// From here on, an early return drops `host`, which releases whatever
		// was already registered.
		let mut host = Self {
			field,
			subscriptions: Subscriptions::new(),
		};
		host.listen_pointer(&window, &document)?;
		host.listen_resize(&window, canvas.clone())?;
		host.start_frame_loop(&window, canvas)?;
		host.start_pulse_timer(&window)?;
		Ok(host)
	}

	fn listen(
		&mut self,
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<(), FieldError> {
		let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
		target
			.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
			.map_err(|e| FieldError::Listener {
				event,
				reason: format!("{e:?}"),
			})?;
		let target = target.clone();
		self.subscriptions.push(event, move || {
			let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
		});
		Ok(())
	}

	fn listen_pointer(&mut self, window: &Window, document: &Document) -> Result<(), FieldError> {
		let root = document.document_element().ok_or(FieldError::NoDocument)?;
		for (on, event, input) in POINTER_LISTENERS {
			let target: &EventTarget = match on {
				ListenOn::Window => window.as_ref(),
				ListenOn::Root => root.as_ref(),
			};
			let field = self.field.clone();
			self.listen(target, event, move |ev| {
				apply_pointer(&mut field.borrow_mut(), input, &ev);
			})?;
		}
		Ok(())
	}

	fn listen_resize(&mut self, window: &Window, canvas: HtmlCanvasElement) -> Result<(), FieldError> {
		let (field, win) = (self.field.clone(), window.clone());
		self.listen(window, "resize", move |_| {
			let (w, h) = viewport(&win);
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			field.borrow_mut().resize(w, h);
		})
	}

	fn start_frame_loop(&mut self, window: &Window, canvas: HtmlCanvasElement) -> Result<(), FieldError> {
		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let (field, animate_inner, pending_inner) =
			(self.field.clone(), animate.clone(), pending.clone());
		let mut ctx: Option<CanvasRenderingContext2d> = None;

		*animate.borrow_mut() = Some(Closure::new(move || {
			pending_inner.set(None);
			if ctx.is_none() {
				ctx = context_2d(&canvas).ok();
			}
			let status = field.borrow_mut().frame(ctx.as_mut());
			if !status.wants_next_frame() {
				return;
			}
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *animate_inner.borrow() {
				match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => pending_inner.set(Some(id)),
					Err(e) => warn!("Frame loop stopped: {:?}", e),
				}
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let id = window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.map_err(|e| FieldError::Scheduler(format!("{e:?}")))?;
			pending.set(Some(id));
		}

		let win = window.clone();
		self.subscriptions.push("frame loop", move || {
			if let Some(id) = pending.take() {
				let _ = win.cancel_animation_frame(id);
			}
			animate.borrow_mut().take();
		});
		Ok(())
	}

	/// Switch the pulse on for a fixed duration, then wait a fresh random gap
	/// before the next one.
	fn start_pulse_timer(&mut self, window: &Window) -> Result<(), FieldError> {
		let pulse_on: FrameCallback = Rc::new(RefCell::new(None));
		let (on_id, off_id): (Rc<Cell<Option<i32>>>, Rc<Cell<Option<i32>>>) = Default::default();

		let (field, off_inner) = (self.field.clone(), off_id.clone());
		let pulse_off = Rc::new(Closure::<dyn FnMut()>::new(move || {
			off_inner.set(None);
			field.borrow_mut().set_pulse(false);
		}));

		let (field, on_slot, on_inner, off_inner, off_cb) = (
			self.field.clone(),
			pulse_on.clone(),
			on_id.clone(),
			off_id.clone(),
			pulse_off.clone(),
		);
		*pulse_on.borrow_mut() = Some(Closure::new(move || {
			on_inner.set(None);
			let (duration, gap) = {
				let mut f = field.borrow_mut();
				if !f.is_running() {
					return;
				}
				f.set_pulse(true);
				(f.pulse_duration_ms(), f.next_pulse_delay_ms())
			};
			let Some(win) = web_sys::window() else {
				return;
			};
			match set_timeout(&win, &off_cb, duration) {
				Ok(id) => off_inner.set(Some(id)),
				Err(e) => warn!("Pulse could not be scheduled to end: {e}"),
			}
			if let Some(ref cb) = *on_slot.borrow() {
				match set_timeout(&win, cb, gap) {
					Ok(id) => on_inner.set(Some(id)),
					Err(e) => warn!("Pulse timer stopped: {e}"),
				}
			}
		}));

		let first = self.field.borrow_mut().next_pulse_delay_ms();
		if let Some(ref cb) = *pulse_on.borrow() {
			on_id.set(Some(set_timeout(window, cb, first)?));
		}

		let win = window.clone();
		self.subscriptions.push("pulse timer", move || {
			for id in [on_id.take(), off_id.take()].into_iter().flatten() {
				win.clear_timeout_with_handle(id);
			}
			pulse_on.borrow_mut().take();
			drop(pulse_off);
		});
		Ok(())
	}

	fn teardown(&mut self) {
		self.field.borrow_mut().teardown();
		self.subscriptions.cancel_all();
	}
}

impl Drop for FieldHost {
	fn drop(&mut self) {
		self.teardown();
	}
}

fn set_timeout(window: &Window, cb: &Closure<dyn FnMut()>, ms: i32) -> Result<i32, FieldError> {
	window
		.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
		.map_err(|e| FieldError::Scheduler(format!("{e:?}")))
}

/// Inner window size; anything unreadable counts as zero.
fn viewport(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(read(window.inner_width()), read(window.inner_height()))
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn pointer_leave_listens_on_root_element() {
		let leave: Vec<_> = POINTER_LISTENERS
			.iter()
			.filter(|(_, event, _)| *event == "mouseleave")
			.collect();
		assert_eq!(leave, vec![&(ListenOn::Root, "mouseleave", PointerInput::Leave)]);
	}

	#[test]
	fn every_pointer_source_is_covered_once() {
		let events: HashSet<&str> = POINTER_LISTENERS.iter().map(|(_, e, _)| *e).collect();
		assert_eq!(events.len(), POINTER_LISTENERS.len());
		for event in ["mousemove", "touchmove", "touchend", "mouseleave"] {
			assert!(events.contains(event), "missing {event}");
		}
		assert!(
			POINTER_LISTENERS
				.iter()
				.filter(|(on, _, _)| *on == ListenOn::Window)
				.all(|(_, e, _)| *e != "mouseleave")
		);
	}
}
