//! Uploads engine snapshots and draws them

use crate::camera::Camera;
use crate::context::{RenderContext, RenderError};
use crate::point_pipeline::{PointInstance, PointPipeline, PointUniforms};
use glimmer_engine::ParticleSnapshot;

/// Appearance knobs for the sprites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Scene units per unit of particle size
    pub size_scale: f32,
    pub opacity: f32,
    pub clear_color: wgpu::Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            size_scale: 0.04,
            opacity: 0.8,
            clear_color: wgpu::Color::BLACK,
        }
    }
}

/// Draws the particle field as additive sprites into the window surface
pub struct ParticleRenderer {
    pipeline: PointPipeline,
    instance_buffer: wgpu::Buffer,
    instance_bind_group: wgpu::BindGroup,
    capacity: usize,
    instances: Vec<PointInstance>,
    pub config: RendererConfig,
}

impl ParticleRenderer {
    /// Allocate GPU buffers for `capacity` particles
    pub fn new(context: &RenderContext, capacity: usize, config: RendererConfig) -> Self {
        let pipeline = PointPipeline::new(&context.device, context.config.format);
        let (instance_buffer, instance_bind_group) =
            create_instance_buffer(&context.device, &pipeline, capacity);

        Self {
            pipeline,
            instance_buffer,
            instance_bind_group,
            capacity,
            instances: Vec::with_capacity(capacity),
            config,
        }
    }

    /// Copy a snapshot into the instance buffer, growing it if needed
    pub fn upload(&mut self, context: &RenderContext, snapshot: &ParticleSnapshot<'_>) {
        pack_instances(snapshot, &mut self.instances);

        if self.instances.len() > self.capacity {
            self.capacity = self.instances.len();
            let (buffer, bind_group) =
                create_instance_buffer(&context.device, &self.pipeline, self.capacity);
            self.instance_buffer = buffer;
            self.instance_bind_group = bind_group;
        }

        if !self.instances.is_empty() {
            context
                .queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
        }
    }

    /// Render the last uploaded snapshot with the cloud rotated by `model`.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped; a
    /// timeout just skips the frame.
    pub fn render(
        &mut self,
        context: &mut RenderContext,
        camera: &Camera,
        model: [[f32; 4]; 4],
    ) -> Result<(), RenderError> {
        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::SurfaceError(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = PointUniforms {
            view_proj: camera.view_projection_matrix(),
            model,
            camera_right: camera.right_vector(),
            size_scale: self.config.size_scale,
            camera_up: camera.up_vector(),
            opacity: self.config.opacity,
        };
        context.queue.write_buffer(
            &self.pipeline.uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniforms]),
        );

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Particle Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.instances.is_empty() {
                render_pass.set_pipeline(&self.pipeline.pipeline);
                render_pass.set_bind_group(0, &self.pipeline.uniform_bind_group, &[]);
                render_pass.set_bind_group(1, &self.instance_bind_group, &[]);
                render_pass.set_index_buffer(
                    self.pipeline.quad_index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed(0..6, 0, 0..self.instances.len() as u32);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Interleave a snapshot's positions, sizes and colors into GPU instances
pub fn pack_instances(snapshot: &ParticleSnapshot<'_>, out: &mut Vec<PointInstance>) {
    out.clear();
    out.extend(
        snapshot
            .positions
            .iter()
            .zip(snapshot.sizes)
            .zip(snapshot.colors)
            .map(|((p, size), c)| PointInstance {
                pos_size: [p.x, p.y, p.z, *size],
                color: [c.r, c.g, c.b, 1.0],
            }),
    );
}

fn create_instance_buffer(
    device: &wgpu::Device,
    pipeline: &PointPipeline,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let size = (capacity.max(1) * std::mem::size_of::<PointInstance>()) as wgpu::BufferAddress;
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Point Instance Buffer"),
        size,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &pipeline.instance_bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some("Point Instance Bind Group"),
    });

    (buffer, bind_group)
}
