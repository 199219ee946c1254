mod canvas;
mod component;
pub mod config;
mod controller;
mod error;
mod lifecycle;
pub mod palette;
mod prng;
mod render;
mod state;
mod step;
mod types;

pub use component::AmbientFieldCanvas;
pub use palette::Theme;
