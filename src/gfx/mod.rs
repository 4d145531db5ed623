//! # Graphics Module
//!
//! All graphics-related functionality for the hexwalk viewer:
//!
//! - **Camera System** ([`camera`]) - Arcball scene rotation plus a bounded
//!   walking camera and its view/projection composition
//! - **Geometry** ([`geometry`]) - Procedural ground, hexagonal prism, and
//!   cube meshes
//! - **Rendering** ([`rendering`]) - wgpu surface, pipelines, and the
//!   per-frame draw loop
//! - **Scene Management** ([`scene`]) - Object placements and per-frame
//!   transform composition
//! - **Resource Management** ([`resources`]) - Uniform buffers and textures

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use rendering::render_engine::RenderEngine;
pub use scene::Scene;
