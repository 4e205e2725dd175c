//! WebGPU rendering module
//!
//! The scene is built on the CPU as a vertex-colored triangle list in pixel
//! space; the pipeline maps it to clip space and draws it in one pass.

pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Scene, SceneOptions, Surface, build, shake_offset};
pub use vertex::Vertex;
