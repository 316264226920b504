//! Snake Arcade - terminal snake in three variants
//!
//! This library provides:
//! - Simulation core: grid, entities, placement, stepping and sessions (game module)
//! - Single-player best-score storage (persistence module)
//! - TUI rendering, keyboard mapping and play statistics (render, input, metrics)
//! - The launcher menu and per-variant play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
pub mod settings;
