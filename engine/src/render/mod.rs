//! Render extract
//!
//! GPU-facing records built from physics state. The renderer itself (wgpu
//! pipelines, shaders, windowing) lives in the host application.

pub mod bodies;

pub use bodies::{MAX_RENDER_BODIES, RenderBatch, RenderBody, render_flags, shape_type};
