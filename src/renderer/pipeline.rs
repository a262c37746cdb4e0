//! WebGPU quad renderer for the playfield

use super::vertex::{Vertex, colors};
use super::{FrameSnapshot, RenderAdapter, shapes};
use crate::sim::Playfield;

/// Room for a few dozen quads before the first regrow
const INITIAL_VERTEX_BYTES: wgpu::BufferAddress =
    (64 * 6 * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress;

/// GPU side of the game: surface, pipeline and a growable vertex buffer
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Playfield extent for coordinate mapping
    pub playfield: Playfield,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        playfield: Playfield,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("flappy-gates-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_BYTES);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            playfield,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload vertices (playfield pixels) and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = playfield_to_ndc(&self.playfield, v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        let bytes: &[u8] = bytemuck::cast_slice(&ndc_vertices);
        let needed = bytes.len() as wgpu::BufferAddress;
        if let Some(size) = grown_size(self.vertex_buffer.size(), needed) {
            self.vertex_buffer = create_vertex_buffer(&self.device, size);
        }
        self.queue.write_buffer(&self.vertex_buffer, 0, bytes);
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl RenderAdapter for RenderState {
    fn render_frame(&mut self, frame: &FrameSnapshot<'_>) {
        self.playfield = frame.playfield;
        let vertices = shapes::scene(frame);
        match self.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                self.resize(self.size.0, self.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

/// New buffer size when `needed` bytes do not fit; grows in powers of two, never shrinks
fn grown_size(
    current: wgpu::BufferAddress,
    needed: wgpu::BufferAddress,
) -> Option<wgpu::BufferAddress> {
    (needed > current).then(|| needed.next_power_of_two())
}

fn create_vertex_buffer(device: &wgpu::Device, size: wgpu::BufferAddress) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Convert playfield pixels (origin top-left, y down) to normalized device coordinates
pub fn playfield_to_ndc(playfield: &Playfield, x: f32, y: f32) -> (f32, f32) {
    (
        x / playfield.width * 2.0 - 1.0,
        1.0 - y / playfield.height * 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playfield_to_ndc_corners() {
        let pf = Playfield::new(800.0, 600.0);
        assert_eq!(playfield_to_ndc(&pf, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(playfield_to_ndc(&pf, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(playfield_to_ndc(&pf, 400.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn test_vertex_buffer_growth() {
        assert_eq!(grown_size(INITIAL_VERTEX_BYTES, 96), None);
        assert_eq!(grown_size(INITIAL_VERTEX_BYTES, INITIAL_VERTEX_BYTES), None);
        assert_eq!(grown_size(1024, 1025), Some(2048));
        assert_eq!(grown_size(1024, 3000), Some(4096));
    }
}
