//! smokesim-render - Software compositing collaborators for the simulation
//!
//! The simulation core produces per-particle renderable state; this crate
//! turns it into pixels:
//! - `Canvas` - the rendering-adapter contract, with an `image::RgbaImage`
//!   backend and a raw packed-u32 framebuffer backend
//! - `SmokeRenderer` - the draw pass: sprite caching, scaling, alpha
//!   compositing, and draw-time bounds culling
//! - `Augmentation` - overlays smoke onto a background image over N steps
//!   and yields (composited, mask-only) frame pairs

mod augment;
mod canvas;
mod renderer;

pub use augment::Augmentation;
pub use canvas::{Canvas, ImageCanvas, PixelCanvas};
pub use renderer::SmokeRenderer;
