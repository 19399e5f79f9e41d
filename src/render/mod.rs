pub mod renderer;

pub use renderer::{Renderer, pause_label};
