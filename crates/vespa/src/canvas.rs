//! Canvas — the per-frame context handed to the scene callback.
//!
//! All drawing state lives here explicitly: the transform stack, the sprite
//! batcher, the bound atlas, and the frame's button snapshot. The frame loop
//! constructs a [`Canvas`] each frame and passes it by `&mut` into the
//! scene callback; nothing is global.

use crate::input::Buttons;
use crate::render::batch::SpriteBatch;
use crate::render::texture::TextureHandle;
use crate::sprite::Sprite;
use crate::transform::{Matrix, TransformStack};

/// The drawing surface for one frame of the scene callback.
///
/// # Example
///
/// ```ignore
/// fn scene(canvas: &mut Canvas) {
///     canvas.identity();
///     canvas.push();
///     canvas.translate(0.5, 0.0);
///     canvas.rotate(45.0);
///     canvas.draw(&Sprite::new(0, 0, 16, 16));
///     canvas.pop();
/// }
/// ```
pub struct Canvas<'a> {
    transforms: &'a mut TransformStack,
    batch: &'a mut SpriteBatch,
    atlas: TextureHandle,
    buttons: Buttons,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(
        transforms: &'a mut TransformStack,
        batch: &'a mut SpriteBatch,
        atlas: TextureHandle,
        buttons: Buttons,
    ) -> Self {
        Self {
            transforms,
            batch,
            atlas,
            buttons,
        }
    }

    /// Duplicate the current transform; mutations stay isolated until
    /// [`pop`](Self::pop).
    pub fn push(&mut self) {
        self.transforms.push();
    }

    /// Restore the transform saved by the matching [`push`](Self::push).
    ///
    /// Popping past the root transform is a contract violation (panics in
    /// debug builds).
    pub fn pop(&mut self) {
        self.transforms.pop();
    }

    /// Reset the current transform to the base-scale identity.
    pub fn identity(&mut self) {
        *self.transforms.current_mut() = Matrix::IDENTITY;
    }

    /// Offset the current transform. The offset adds directly to the
    /// translation column — see [`Matrix::translate`].
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.transforms.current_mut().translate(dx, dy);
    }

    /// Scale the current transform, translation included.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.transforms.current_mut().scale(sx, sy);
    }

    /// Rotate the current transform counter-clockwise by `degrees`.
    pub fn rotate(&mut self, degrees: f32) {
        self.transforms.current_mut().rotate(degrees);
    }

    /// The current transform matrix.
    pub fn transform(&self) -> Matrix {
        *self.transforms.current()
    }

    /// Draw a sprite from the atlas under the current transform.
    ///
    /// Draws accumulate in batches of up to 16 and are submitted in call
    /// order; the transform stack is not modified.
    pub fn draw(&mut self, sprite: &Sprite) {
        let matrix = *self.transforms.current();
        self.batch.draw(self.atlas, sprite, &matrix);
    }

    /// The buttons held during this frame.
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }
}
