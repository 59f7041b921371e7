//! Rendering — batching, GPU context, pipeline, and frame orchestration.
//!
//! A frame is two render passes over the same instanced-quad pipeline:
//!
//! ```text
//! scene callback ──► SpriteBatch ──► canvas pass (128×128 back target)
//!                                         │
//!                    full-canvas blit ◄───┘
//!                          │
//!                    present pass (window surface) ──► present, swap targets
//! ```
//!
//! Each [`batch::DrawBatch`] becomes one instanced draw; instance data is
//! uploaded fresh per pass.

pub(crate) mod batch;
pub(crate) mod gpu;
pub(crate) mod pipeline;
pub(crate) mod target;
pub(crate) mod texture;

use wgpu::util::DeviceExt;

use crate::sprite::Sprite;
use crate::transform::Matrix;
use batch::{DrawBatch, SpriteBatch, SpriteInstance};
use gpu::GpuContext;
use pipeline::SpriteRenderer;
use target::RenderTargets;
use texture::TextureStore;

/// Render one frame: the accumulated scene records into the back canvas
/// target, then the canvas blitted to the surface. Presents and swaps the
/// targets on success.
pub(crate) fn render_frame(
    gpu: &GpuContext,
    renderer: &SpriteRenderer,
    store: &TextureStore,
    targets: &mut RenderTargets,
    batch: &mut SpriteBatch,
) -> Result<(), wgpu::SurfaceError> {
    // Whatever the scene left partially batched is flushed, not dropped.
    let (scene_instances, scene_batches) = batch.end_pass();

    // The whole back target presented as one full-canvas sprite with the
    // identity transform.
    batch.draw(targets.back(), &Sprite::FULL, &Matrix::IDENTITY);
    let (mut blit_instances, blit_batches) = batch.end_pass();
    // The canvas pass writes row 0 at clip +y; sampling flips V so the
    // canvas stays upright on the surface.
    for inst in &mut blit_instances {
        inst.rect.swap(1, 3);
    }

    let output = gpu.surface.get_current_texture()?;
    let surface_view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("vespa frame encoder"),
        });

    record_pass(
        gpu,
        renderer,
        store,
        &mut encoder,
        &renderer.canvas_pipeline,
        &store.get(targets.back()).view,
        "canvas pass",
        &scene_instances,
        &scene_batches,
    );
    record_pass(
        gpu,
        renderer,
        store,
        &mut encoder,
        &renderer.surface_pipeline,
        &surface_view,
        "present pass",
        &blit_instances,
        &blit_batches,
    );

    gpu.queue.submit(std::iter::once(encoder.finish()));
    output.present();
    targets.swap();

    Ok(())
}

/// Record one render pass: clear, then replay each batch as an instanced
/// draw of the unit quad.
fn record_pass(
    gpu: &GpuContext,
    renderer: &SpriteRenderer,
    store: &TextureStore,
    encoder: &mut wgpu::CommandEncoder,
    pipeline: &wgpu::RenderPipeline,
    view: &wgpu::TextureView,
    label: &str,
    instances: &[SpriteInstance],
    batches: &[DrawBatch],
) {
    let instance_buffer = (!instances.is_empty()).then(|| {
        gpu.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(instances),
                usage: wgpu::BufferUsages::VERTEX,
            })
    });

    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if let Some(buffer) = &instance_buffer {
        pass.set_pipeline(pipeline);
        pass.set_vertex_buffer(0, renderer.quad_buffer.slice(..));
        pass.set_vertex_buffer(1, buffer.slice(..));
        for b in batches {
            pass.set_bind_group(0, &store.get(b.texture).bind_group, &[]);
            pass.draw(0..6, b.first..b.first + b.count);
        }
    }
}
