//! Branching "dragon" fractal: generation, view state and rendering.
//!
//! Main components:
//! - [`levels`] — depth buckets of [`dragon::Dragon`]s and the generator.
//! - [`dragon`] — a single branch element and how children derive from it.
//! - [`sampler`] — uniform draws behind a trait so generation can be seeded.
//! - [`view`] — zoom state and the world-to-screen viewport.
//! - [`surface`] — the drawing-surface seam and transform stack.
//! - [`display_list`] — a recording [`surface::Surface`].
//! - [`render`] — one full render pass.
//! - [`schedule`] — tick/input redraw scheduling.
//! - [`scene`] — ties the above together for a host UI.
//! - [`config`] — runtime configuration.
//! - [`types`] — ids and direction tags.

pub mod config;
pub mod display_list;
pub mod dragon;
pub mod levels;
pub mod render;
pub mod sampler;
pub mod scene;
pub mod schedule;
pub mod surface;
pub mod types;
pub mod view;
