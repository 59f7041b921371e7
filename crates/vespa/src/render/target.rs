//! Double-buffered 128×128 offscreen canvas targets.
//!
//! The scene pass renders into the back target; the present pass samples it
//! to blit the canvas onto the surface, then the roles swap for the next
//! frame.

use crate::CANVAS_SIZE;
use crate::render::gpu::GpuContext;
use crate::render::pipeline::SpriteRenderer;
use crate::render::texture::{TextureHandle, TextureStore};

pub(crate) struct RenderTargets {
    targets: [TextureHandle; 2],
    back: usize,
}

impl RenderTargets {
    pub fn new(gpu: &GpuContext, renderer: &SpriteRenderer, store: &mut TextureStore) -> Self {
        let a = store.create(gpu, renderer, "canvas target 0", CANVAS_SIZE, CANVAS_SIZE, true);
        let b = store.create(gpu, renderer, "canvas target 1", CANVAS_SIZE, CANVAS_SIZE, true);
        Self {
            targets: [a, b],
            back: 0,
        }
    }

    /// The target the current frame renders into (and presents from).
    pub fn back(&self) -> TextureHandle {
        self.targets[self.back]
    }

    /// Swap targets after a present.
    pub fn swap(&mut self) {
        self.back ^= 1;
    }
}
