pub mod arcball;
pub mod controls;
pub mod walk_camera;

// Re-export main types
pub use arcball::Arcball;
pub use controls::Controls;
pub use walk_camera::{FloorBounds, WalkCamera};
