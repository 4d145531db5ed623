// src/lib.rs
//! Hexwalk 3D Viewer
//!
//! An interactive scene viewer built on wgpu and winit: a textured ground
//! plane, hexagonal prisms, and crate cubes rendered with per-fragment
//! lighting, a walking camera driven by discrete key commands, and an
//! arcball drag gesture that rotates the whole scene.

pub mod app;
pub mod config;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::App;
pub use config::ViewerConfig;

/// Creates a viewer application with default settings
pub fn default() -> anyhow::Result<App> {
    App::new(ViewerConfig::default())
}
