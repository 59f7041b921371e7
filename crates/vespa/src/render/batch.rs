//! # Batch — Accumulate Sprite Draws into Bounded Instanced Runs
//!
//! This is the CPU-side heart of the renderer. Every `draw` call composes
//! the caller's transform with the sprite's pixel size, quantizes the atlas
//! rectangle, and appends one [`SpriteInstance`] to a fixed 16-slot pending
//! buffer. The buffer *flushes* — moves its records into the frame's
//! instance list as one [`DrawBatch`] — in exactly three situations:
//!
//! 1. the pending buffer reaches capacity,
//! 2. a draw arrives for a different texture than the one bound,
//! 3. the frame ends (`end_pass`), so a partial batch is submitted rather
//!    than dropped.
//!
//! Each `DrawBatch` becomes a single instanced GPU draw of a unit quad, so
//! state changes (texture bind group switches) happen once per batch instead
//! of once per sprite. Draw order is preserved within a batch (append order)
//! and across batches (batch list order) — there is no sorting.
//!
//! ## Quantization
//!
//! Atlas pixel coordinates are stored as 8-bit values read back by the GPU
//! as `coord / 255.0` (`Unorm8x4`). A pixel coordinate `p` maps to `p * 2`
//! and the far corner to `(p + size - 1) * 2`, which centers the sample
//! range inside a 128-pixel atlas' texel grid.
//!
//! The batch itself never touches the GPU; it produces plain instance data
//! and batch ranges that the frame pass uploads and replays. That keeps the
//! batching laws unit-testable without a device.

use bytemuck::{Pod, Zeroable};

use crate::render::texture::TextureHandle;
use crate::sprite::Sprite;
use crate::transform::Matrix;

/// Draw records buffered between flushes; also the instance count of the
/// largest possible single draw call.
pub(crate) const BATCH_CAPACITY: usize = 16;

/// Per-sprite instance attributes: the composed 2×3 matrix as two rows plus
/// the quantized atlas rectangle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct SpriteInstance {
    pub mat0: [f32; 3],
    pub mat1: [f32; 3],
    /// `[x0, y0, x1, y1]`, read by the GPU as unorm8.
    pub rect: [u8; 4],
}

impl SpriteInstance {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            // mat0
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // mat1
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x3,
            },
            // rect
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 3,
                format: wgpu::VertexFormat::Unorm8x4,
            },
        ],
    };
}

/// One flushed run of instances sharing a bound texture. Replayed as a
/// single instanced draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DrawBatch {
    pub texture: TextureHandle,
    /// Range into the frame's instance list.
    pub first: u32,
    pub count: u32,
}

/// The sprite batcher: a fixed-capacity pending buffer plus the frame's
/// flushed instances and batch ranges.
pub(crate) struct SpriteBatch {
    pending: [SpriteInstance; BATCH_CAPACITY],
    pending_count: usize,
    texture: Option<TextureHandle>,
    instances: Vec<SpriteInstance>,
    batches: Vec<DrawBatch>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self {
            pending: [SpriteInstance::zeroed(); BATCH_CAPACITY],
            pending_count: 0,
            texture: None,
            instances: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Record one sprite draw against `texture` under `matrix`.
    ///
    /// A texture change flushes the pending records first; reaching capacity
    /// flushes afterwards. The caller's matrix is read by value; the
    /// transform stack is never mutated by a draw.
    pub fn draw(&mut self, texture: TextureHandle, sprite: &Sprite, matrix: &Matrix) {
        if self.texture != Some(texture) {
            self.flush();
            self.texture = Some(texture);
        }

        let m = matrix.sized(sprite.w as f32, sprite.h as f32);
        self.pending[self.pending_count] = SpriteInstance {
            mat0: [m.m00, m.m01, m.m02],
            mat1: [m.m10, m.m11, m.m12],
            rect: [
                (sprite.x * 2) as u8,
                (sprite.y * 2) as u8,
                ((sprite.x + sprite.w - 1) * 2) as u8,
                ((sprite.y + sprite.h - 1) * 2) as u8,
            ],
        };
        self.pending_count += 1;

        if self.pending_count == BATCH_CAPACITY {
            self.flush();
        }
    }

    /// Submit the pending records as one [`DrawBatch`]. No-op when empty.
    pub fn flush(&mut self) {
        if self.pending_count == 0 {
            return;
        }
        let texture = self.texture.expect("pending records with no bound texture");
        let first = self.instances.len() as u32;
        self.instances
            .extend_from_slice(&self.pending[..self.pending_count]);
        self.batches.push(DrawBatch {
            texture,
            first,
            count: self.pending_count as u32,
        });
        self.pending_count = 0;
    }

    /// Flush the partial batch and hand the accumulated frame data off for
    /// submission. The bound texture persists across passes, like GPU state.
    pub fn end_pass(&mut self) -> (Vec<SpriteInstance>, Vec<DrawBatch>) {
        self.flush();
        (
            std::mem::take(&mut self.instances),
            std::mem::take(&mut self.batches),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEX_A: TextureHandle = TextureHandle(0);
    const TEX_B: TextureHandle = TextureHandle(1);

    fn sprite() -> Sprite {
        Sprite::new(0, 0, 8, 8)
    }

    #[test]
    fn count_increases_by_one_per_draw_until_capacity() {
        let mut batch = SpriteBatch::new();
        for i in 0..BATCH_CAPACITY - 1 {
            batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
            assert_eq!(batch.pending_count, i + 1);
            assert!(batch.batches.is_empty());
        }
    }

    #[test]
    fn seventeen_draws_trigger_exactly_one_automatic_flush() {
        let mut batch = SpriteBatch::new();
        for _ in 0..BATCH_CAPACITY {
            batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
        }
        // The 16th draw flushed and reset the count.
        assert_eq!(batch.batches.len(), 1);
        assert_eq!(batch.pending_count, 0);

        batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
        assert_eq!(batch.batches.len(), 1);
        assert_eq!(batch.pending_count, 1);

        let (instances, batches) = batch.end_pass();
        assert_eq!(instances.len(), 17);
        assert_eq!(batches.len(), 2);
        assert_eq!((batches[0].first, batches[0].count), (0, 16));
        assert_eq!((batches[1].first, batches[1].count), (16, 1));
    }

    #[test]
    fn quantizes_atlas_rect() {
        let mut batch = SpriteBatch::new();
        batch.draw(TEX_A, &Sprite::new(10, 20, 8, 8), &Matrix::IDENTITY);
        let (instances, _) = batch.end_pass();
        assert_eq!(instances[0].rect, [20, 40, 34, 54]);
    }

    #[test]
    fn draw_order_is_preserved_across_an_automatic_flush() {
        let mut batch = SpriteBatch::new();
        for i in 0..BATCH_CAPACITY + 3 {
            let mut m = Matrix::IDENTITY;
            m.translate(i as f32, 0.0);
            batch.draw(TEX_A, &sprite(), &m);
        }
        let (instances, batches) = batch.end_pass();
        for (i, inst) in instances.iter().enumerate() {
            assert_eq!(inst.mat0[2], i as f32);
        }
        assert_eq!(batches.len(), 2);
        assert_eq!((batches[0].first, batches[0].count), (0, 16));
        assert_eq!((batches[1].first, batches[1].count), (16, 3));
    }

    #[test]
    fn texture_switch_forces_exactly_one_flush() {
        let mut batch = SpriteBatch::new();
        batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
        batch.draw(TEX_B, &sprite(), &Matrix::IDENTITY);
        // The switch flushed the single TEX_A record well below capacity.
        assert_eq!(batch.batches.len(), 1);
        assert_eq!(batch.batches[0].texture, TEX_A);
        assert_eq!(batch.pending_count, 1);

        let (instances, batches) = batch.end_pass();
        assert_eq!(instances.len(), 2);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1].texture, TEX_B);
    }

    #[test]
    fn same_texture_does_not_split_the_batch() {
        let mut batch = SpriteBatch::new();
        batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
        batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
        let (_, batches) = batch.end_pass();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].count, 2);
    }

    #[test]
    fn flush_is_idempotent_when_empty() {
        let mut batch = SpriteBatch::new();
        batch.flush();
        batch.flush();
        assert!(batch.batches.is_empty());

        batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
        batch.flush();
        batch.flush();
        assert_eq!(batch.batches.len(), 1);
    }

    #[test]
    fn end_pass_flushes_the_partial_batch() {
        let mut batch = SpriteBatch::new();
        batch.draw(TEX_A, &sprite(), &Matrix::IDENTITY);
        let (instances, batches) = batch.end_pass();
        assert_eq!(instances.len(), 1);
        assert_eq!(batches.len(), 1);

        // And leaves the batch reusable.
        let (instances, batches) = batch.end_pass();
        assert!(instances.is_empty());
        assert!(batches.is_empty());
    }

    #[test]
    fn effective_matrix_scales_basis_columns_not_translation() {
        let mut m = Matrix::IDENTITY;
        m.translate(0.5, -0.25);
        m.rotate(30.0);

        let mut batch = SpriteBatch::new();
        batch.draw(TEX_A, &Sprite::new(0, 0, 8, 16), &m);
        let (instances, _) = batch.end_pass();

        let inst = instances[0];
        assert_eq!(inst.mat0, [m.m00 * 8.0, m.m01 * 16.0, m.m02]);
        assert_eq!(inst.mat1, [m.m10 * 8.0, m.m11 * 16.0, m.m12]);
        // The stack's matrix itself is untouched by the draw.
        assert_eq!(m.sized(8.0, 16.0).m02, m.m02);
    }
}
