//! Window management via winit.
//!
//! Implements [`winit::application::ApplicationHandler`] to drive the frame
//! loop: window events, then the scene callback, then the render pipeline,
//! in strict sequence until the window closes. The window is a fixed
//! canvas×scale square and cannot be resized.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::CANVAS_SIZE;
use crate::canvas::Canvas;
use crate::input::{Buttons, button_for_key};
use crate::render::batch::SpriteBatch;
use crate::render::gpu::GpuContext;
use crate::render::pipeline::SpriteRenderer;
use crate::render::render_frame;
use crate::render::target::RenderTargets;
use crate::render::texture::TextureStore;
use crate::transform::TransformStack;

/// GPU-side state, created once the window exists.
struct RenderState {
    gpu: GpuContext,
    renderer: SpriteRenderer,
    store: TextureStore,
    targets: RenderTargets,
}

/// The application state that winit drives.
pub(crate) struct WinitApp {
    title: String,
    scale: u32,
    /// Decoded cartridge images, uploaded into the atlas at startup.
    atlas_images: Vec<Vec<u8>>,
    scene: Box<dyn FnMut(&mut Canvas)>,
    window: Option<Arc<Window>>,
    state: Option<RenderState>,
    transforms: TransformStack,
    batch: SpriteBatch,
    buttons: Buttons,
}

impl WinitApp {
    pub fn new(
        title: String,
        scale: u32,
        atlas_images: Vec<Vec<u8>>,
        scene: Box<dyn FnMut(&mut Canvas)>,
    ) -> Self {
        Self {
            title,
            scale,
            atlas_images,
            scene,
            window: None,
            state: None,
            transforms: TransformStack::new(),
            batch: SpriteBatch::new(),
            buttons: Buttons::default(),
        }
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let side = (CANVAS_SIZE * self.scale) as f64;
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(side, side))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );

        let gpu = GpuContext::new(window.clone());
        let renderer = SpriteRenderer::new(&gpu);
        let mut store = TextureStore::new(&gpu, &renderer);
        let targets = RenderTargets::new(&gpu, &renderer, &mut store);

        // Later cartridge images overwrite earlier ones; the last one is the
        // atlas the game draws from.
        let atlas = store.atlas();
        for image in &self.atlas_images {
            store.write(&gpu, atlas, 0, 0, CANVAS_SIZE, CANVAS_SIZE, image);
        }

        self.state = Some(RenderState {
            gpu,
            renderer,
            store,
            targets,
        });
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.gpu.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(bit) = button_for_key(code) {
                        match event.state {
                            ElementState::Pressed => self.buttons.press(bit),
                            ElementState::Released => self.buttons.release(bit),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(state) = &mut self.state {
                    let mut canvas = Canvas::new(
                        &mut self.transforms,
                        &mut self.batch,
                        state.store.atlas(),
                        self.buttons,
                    );
                    (self.scene)(&mut canvas);

                    match render_frame(
                        &state.gpu,
                        &state.renderer,
                        &state.store,
                        &mut state.targets,
                        &mut self.batch,
                    ) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let (w, h) = state.gpu.surface_size();
                            state.gpu.resize(w, h);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of GPU memory!");
                            event_loop.exit();
                        }
                        Err(e) => {
                            log::warn!("Surface error: {e:?}");
                        }
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
