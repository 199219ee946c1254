use std::f64::consts::PI;

use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::FieldError;
use super::render::{Paint, Surface};

/// Fetch the 2D context of `canvas`.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FieldError> {
	canvas
		.get_context("2d")
		.map_err(|e| FieldError::ContextUnavailable(format!("{e:?}")))?
		.ok_or(FieldError::SurfaceUnavailable)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| FieldError::ContextUnavailable("not a 2d context".into()))
}

fn gradient(ctx: &CanvasRenderingContext2d, paint: &Paint) -> Result<Option<CanvasGradient>, JsValue> {
	let (gradient, from, to) = match *paint {
		Paint::Solid(_) => return Ok(None),
		Paint::Radial {
			x,
			y,
			r0,
			r1,
			from,
			to,
		} => (ctx.create_radial_gradient(x, y, r0, x, y, r1)?, from, to),
		Paint::Linear {
			x0,
			y0,
			x1,
			y1,
			from,
			to,
		} => (ctx.create_linear_gradient(x0, y0, x1, y1), from, to),
	};
	gradient.add_color_stop(0.0, &from.to_string())?;
	gradient.add_color_stop(1.0, &to.to_string())?;
	Ok(Some(gradient))
}

/// Apply `paint` as fill (or stroke) style. False when the gradient could not
/// be built, in which case the caller skips the shape.
fn apply(ctx: &CanvasRenderingContext2d, paint: &Paint, stroke: bool) -> bool {
	let gradient = match gradient(ctx, paint) {
		Ok(g) => g,
		Err(e) => {
			warn!("Skipping shape, gradient failed: {:?}", e);
			return false;
		}
	};
	match (gradient, paint) {
		(Some(g), _) if stroke => {
			#[allow(deprecated)]
			ctx.set_stroke_style(&g);
		}
		(Some(g), _) => {
			#[allow(deprecated)]
			ctx.set_fill_style(&g);
		}
		(None, Paint::Solid(color)) if stroke => ctx.set_stroke_style_str(&color.to_string()),
		(None, Paint::Solid(color)) => ctx.set_fill_style_str(&color.to_string()),
		(None, _) => return false,
	}
	true
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
		if apply(self, paint, false) {
			CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
		}
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
		if radius <= 0.0 || !apply(self, paint, false) {
			return;
		}
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, 2.0 * PI);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, paint: &Paint) {
		if width <= 0.0 || !apply(self, paint, true) {
			return;
		}
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}
