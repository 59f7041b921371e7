//! # Vespa — a 128×128 fantasy console
//!
//! A fixed-resolution game runtime: register a per-frame scene callback,
//! draw sprites from a 128×128 atlas through an affine transform stack, and
//! vespa batches the draws into bounded instanced GPU calls, composites the
//! canvas, and presents it scaled into a window.
//!
//! Start with `use vespa::prelude::*` and build a [`Console`](console::Console).

pub mod canvas;
pub mod console;
pub mod input;
pub mod prelude;
pub mod res;
pub mod sprite;
pub mod transform;

pub(crate) mod render;
pub(crate) mod window;

/// Canvas width and height in pixels. The sprite atlas has the same
/// dimensions.
pub const CANVAS_SIZE: u32 = 128;
