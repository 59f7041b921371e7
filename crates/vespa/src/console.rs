//! Console builder and run loop entry.
//!
//! [`Console`] is the entry point for an embedding game: configure the
//! window title, pixel scale, and cartridge, register the per-frame scene
//! callback, then call [`run`](Console::run) to start the frame loop.
//!
//! # Example
//!
//! ```ignore
//! use vespa::prelude::*;
//!
//! fn main() {
//!     env_logger::init();
//!     Console::new("my game")
//!         .cartridge(std::fs::read("game.res").unwrap())
//!         .scene(|canvas| {
//!             canvas.identity();
//!             canvas.draw(&Sprite::new(0, 0, 16, 16));
//!         })
//!         .run();
//! }
//! ```

use winit::event_loop::{ControlFlow, EventLoop};

use crate::canvas::Canvas;
use crate::res;
use crate::window::WinitApp;

/// Pixel scale of the window by default: a 128×128 canvas in a 512×512
/// window.
const DEFAULT_SCALE: u32 = 4;

/// The console builder. Configure the game, then call [`run`](Console::run).
pub struct Console {
    title: String,
    scale: u32,
    cartridge: Option<Vec<u8>>,
    scene: Option<Box<dyn FnMut(&mut Canvas)>>,
}

impl Console {
    /// Create a console with the given window title.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            scale: DEFAULT_SCALE,
            cartridge: None,
            scene: None,
        }
    }

    /// Window pixels per canvas pixel (minimum 1; default 4).
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Cartridge bytes to decode into the sprite atlas at startup.
    pub fn cartridge(mut self, bytes: Vec<u8>) -> Self {
        self.cartridge = Some(bytes);
        self
    }

    /// Register the scene callback, invoked once per frame with the
    /// [`Canvas`]. Game state lives in the closure's captures.
    pub fn scene(mut self, scene: impl FnMut(&mut Canvas) + 'static) -> Self {
        self.scene = Some(Box::new(scene));
        self
    }

    /// Decode the cartridge and run the frame loop until the window closes.
    ///
    /// A malformed cartridge is fatal: the error is logged once and the
    /// process exits.
    pub fn run(self) {
        let images = match self.cartridge.as_deref().map(res::decode).transpose() {
            Ok(images) => images.unwrap_or_default(),
            Err(e) => {
                log::error!("RES: {e}");
                std::process::exit(1);
            }
        };

        let scene = self.scene.unwrap_or_else(|| Box::new(|_| {}));

        let event_loop = EventLoop::new().expect("Failed to create event loop");
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = WinitApp::new(self.title, self.scale, images, scene);
        event_loop.run_app(&mut app).expect("Event loop error");
    }
}
