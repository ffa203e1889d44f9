//! WebGPU rendering module
//!
//! Geometry is built on the CPU each frame as a flat triangle list in world
//! units; the pipeline maps it to the viewport.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
