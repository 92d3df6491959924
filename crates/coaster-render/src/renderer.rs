//! Draws a ride scene: uploads strips and issues one draw per strip.

use crate::camera::Camera;
use crate::context::{RenderContext, RenderError};
use crate::pipeline::{StripPipeline, ViewUniforms};
use crate::primitives::{surface_color, StripBatch};
use coaster_core::Color;
use coaster_track::SceneGeometry;
use std::ops::Range;

/// Owns the strip pipeline and the GPU buffers for the current scene
pub struct TrackRenderer {
    pipeline: StripPipeline,
    view_buffer: wgpu::Buffer,
    view_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: u64,
    ranges: Vec<Range<u32>>,
    srgb: bool,
    clear: wgpu::Color,
}

impl TrackRenderer {
    pub fn new(context: &RenderContext, background: Color) -> Self {
        let device = &context.device;
        let pipeline = StripPipeline::new(device, context.config.format);
        let srgb = context.config.format.is_srgb();

        let view_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("View Uniform Buffer"),
            size: std::mem::size_of::<ViewUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("View Bind Group"),
            layout: &pipeline.view_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        });

        let vertex_capacity = 0;
        let vertex_buffer = create_vertex_buffer(device, vertex_capacity);

        let [r, g, b, a] = surface_color(background, srgb);
        Self {
            pipeline,
            view_buffer,
            view_bind_group,
            vertex_buffer,
            vertex_capacity,
            ranges: Vec::new(),
            srgb,
            clear: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        }
    }

    /// Replace the uploaded scene, growing the vertex buffer when needed.
    pub fn upload(&mut self, context: &RenderContext, scene: &SceneGeometry) {
        let batch = StripBatch::from_scene(scene, self.srgb);
        let needed = batch.byte_len();
        if needed > self.vertex_capacity {
            let capacity = needed.next_power_of_two();
            tracing::debug!(bytes = capacity, "growing strip vertex buffer");
            self.vertex_buffer = create_vertex_buffer(&context.device, capacity);
            self.vertex_capacity = capacity;
        }
        if needed > 0 {
            context
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&batch.vertices));
        }
        self.ranges = batch.ranges;
    }

    /// Clear, then draw every uploaded strip from `camera`.
    pub fn render(&mut self, context: &mut RenderContext, camera: &Camera) -> Result<(), RenderError> {
        let uniforms = ViewUniforms {
            view_proj: camera.view_projection_matrix(),
        };
        context
            .queue
            .write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(&uniforms));

        let Some(frame) = context.acquire_frame()? else {
            return Ok(());
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Coaster Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Ride Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.ranges.is_empty() {
                render_pass.set_pipeline(&self.pipeline.pipeline);
                render_pass.set_bind_group(0, &self.view_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                for range in &self.ranges {
                    render_pass.draw(range.clone(), 0..1);
                }
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn strip_count(&self) -> usize {
        self.ranges.len()
    }
}

fn create_vertex_buffer(device: &wgpu::Device, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Strip Vertex Buffer"),
        // Zero-sized buffers cannot be bound
        size: size.max(wgpu::COPY_BUFFER_ALIGNMENT),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
