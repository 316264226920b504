pub mod renderer;

pub use renderer::{Renderer, LAUNCHER_ENTRIES};
