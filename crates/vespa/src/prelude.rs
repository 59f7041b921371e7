//! Convenience re-exports — `use vespa::prelude::*` for the common items.

pub use crate::CANVAS_SIZE;
pub use crate::canvas::Canvas;
pub use crate::console::Console;
pub use crate::input::Buttons;
pub use crate::res::DecodeError;
pub use crate::sprite::Sprite;
pub use crate::transform::{Matrix, TransformStack};
