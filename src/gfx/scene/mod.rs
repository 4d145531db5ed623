//! # Scene Management Module
//!
//! The scene container and the per-frame orchestration: object placements,
//! animation state, lighting, and the composition of every object's model
//! and model-view-projection matrix.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{Material, MeshKind, ObjectUniform, SceneObject};
pub use scene::{Lighting, Scene};
pub use vertex::Vertex3D;
