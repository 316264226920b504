pub mod launcher;
pub mod play;
pub mod terminal;

pub use launcher::{Launcher, LauncherAction};
pub use play::PlayMode;
