//! Rendering module
//!
//! The simulation only ever talks to the [`Surface`] trait. `VertexSurface`
//! tessellates into triangle lists; `CanvasSurface` forwards to an HTML
//! canvas on wasm32.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod shapes;
pub mod surface;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::{FrameSignals, draw_world, entity_color, render_entity};
pub use surface::{Surface, VertexSurface};
pub use vertex::Vertex;
