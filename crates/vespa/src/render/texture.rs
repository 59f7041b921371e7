//! GPU textures — handle/store for the sprite atlas and the canvas targets.
//!
//! Callers never hold a `wgpu::Texture`; they pass a [`TextureHandle`], a
//! `Copy` index into the [`TextureStore`]. Entry 0 is always the 128×128
//! sprite atlas, created cleared at startup and overwritten by cartridge
//! data. The offscreen canvas targets register here too, so a draw batch
//! addresses every drawable texture the same way.

use crate::CANVAS_SIZE;
use crate::render::gpu::GpuContext;
use crate::render::pipeline::SpriteRenderer;

/// All console textures are linear RGBA8: palette colors are literal
/// values, and the canvas targets must match the canvas pipeline.
pub(crate) const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Handle to a texture in the [`TextureStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TextureHandle(pub(crate) usize);

pub(crate) struct TextureEntry {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
}

pub(crate) struct TextureStore {
    entries: Vec<TextureEntry>,
}

impl TextureStore {
    /// Create the store with the cleared sprite atlas at entry 0.
    pub fn new(gpu: &GpuContext, renderer: &SpriteRenderer) -> Self {
        let mut store = Self {
            entries: Vec::new(),
        };
        store.create(gpu, renderer, "atlas", CANVAS_SIZE, CANVAS_SIZE, false);
        store
    }

    /// The sprite atlas handle.
    pub fn atlas(&self) -> TextureHandle {
        TextureHandle(0)
    }

    /// Create a texture and its bind group; `render_target` additionally
    /// allows attaching it to a render pass.
    pub fn create(
        &mut self,
        gpu: &GpuContext,
        renderer: &SpriteRenderer,
        label: &str,
        width: u32,
        height: u32,
        render_target: bool,
    ) -> TextureHandle {
        let mut usage = wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST;
        if render_target {
            usage |= wgpu::TextureUsages::RENDER_ATTACHMENT;
        }

        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &renderer.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&renderer.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.entries.len());
        self.entries.push(TextureEntry {
            texture,
            view,
            bind_group,
        });
        handle
    }

    pub fn get(&self, handle: TextureHandle) -> &TextureEntry {
        &self.entries[handle.0]
    }

    /// Overwrite a sub-rectangle of a texture with RGBA8 pixel data.
    pub fn write(
        &self,
        gpu: &GpuContext,
        handle: TextureHandle,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        data: &[u8],
    ) {
        let entry = self.get(handle);
        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &entry.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }
}
