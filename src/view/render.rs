use wgpu::*;

use crate::config::SiteConfig;
use crate::controller::{BackgroundUniform, FrameOutput};
use crate::error::SiteError;
use crate::utils::{create_plane_mesh, MeshBuffer, Vertex};

// GPU objects for the shader background
pub struct BackgroundResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub pipeline: wgpu::RenderPipeline,
    pub plane: MeshBuffer,
}

/// What gets drawn behind the page
pub enum Background {
    Shader(BackgroundResources),
    /// Shader unavailable: clear to a flat color every frame
    Static(wgpu::Color),
}

pub fn to_wgpu_color(rgb: [f32; 3]) -> wgpu::Color {
    wgpu::Color { r: rgb[0] as f64, g: rgb[1] as f64, b: rgb[2] as f64, a: 1.0 }
}

/// CSS form of a fallback color, for when there is no surface at all
pub fn to_css_color(rgb: [f32; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({r}, {g}, {b})")
}

/// Compile `source` and build the background pipeline.
/// Validation errors are captured instead of reaching the uncaptured-error handler.
pub async fn create_background_resources(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    source: &str,
    plane_size: f32,
) -> Result<BackgroundResources, SiteError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("background_shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("background_uniform"),
        size: std::mem::size_of::<BackgroundUniform>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("background_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("background_bind_group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry { binding: 0, resource: uniform_buffer.as_entire_binding() }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("background_pipeline_layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("background_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x3 },
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState { format, blend: Some(wgpu::BlendState::ALPHA_BLENDING), write_mask: wgpu::ColorWrites::ALL })],
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
        multisample: wgpu::MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    });

    if let Some(err) = device.pop_error_scope().await {
        return Err(SiteError::ShaderCompilation(err.to_string()));
    }

    let plane = create_plane_mesh(plane_size).upload(device);

    Ok(BackgroundResources { uniform_buffer, bind_group, pipeline, plane })
}

impl Background {
    /// Shader background, or the static fallback if it fails to build
    pub async fn build(device: &wgpu::Device, format: wgpu::TextureFormat, source: &str, config: &SiteConfig) -> Self {
        match create_background_resources(device, format, source, config.plane_size).await {
            Ok(res) => Background::Shader(res),
            Err(e) => {
                tracing::error!("background effect disabled: {e}");
                Background::Static(to_wgpu_color(config.fallback_color))
            }
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Background::Static(_))
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Surface configuration plus the background to draw on it
pub struct RenderState {
    pub format: TextureFormat,
    pub alpha_mode: CompositeAlphaMode,
    pub width: u32,
    pub height: u32,
    pub background: Background,
    /// Clear color behind the shader plane
    pub clear_color: Color,
}

impl RenderState {
    pub fn surface_config(&self) -> SurfaceConfiguration {
        SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: self.format,
            width: self.width,
            height: self.height,
            present_mode: PresentMode::Fifo,
            alpha_mode: self.alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    pub fn resize(&mut self, device: &Device, surface: &Surface, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        surface.configure(device, &self.surface_config());
        tracing::debug!(width, height, "surface resized");
    }

    /// Upload this frame's uniforms and draw; a lost frame is skipped, not fatal
    pub fn draw_frame(
        &mut self,
        device: &Device,
        queue: &Queue,
        surface: &Surface,
        output: &FrameOutput,
    ) {
        if let Some(vp) = output.resized {
            self.resize(device, surface, vp.width, vp.height);
        }

        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                surface.configure(device, &self.surface_config());
                return;
            }
            Err(e) => {
                tracing::warn!("skipping frame: {e:?}");
                return;
            }
        };

        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("encoder"),
        });

        let clear = match &self.background {
            Background::Shader(res) => {
                queue.write_buffer(&res.uniform_buffer, 0, bytemuck::bytes_of(&output.uniform));
                self.clear_color
            }
            Background::Static(color) => *color,
        };

        {
            let mut rp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("background_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(clear),
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Background::Shader(res) = &self.background {
                rp.set_pipeline(&res.pipeline);
                rp.set_bind_group(0, &res.bind_group, &[]);
                rp.set_vertex_buffer(0, res.plane.vertex_buffer.slice(..));
                rp.set_index_buffer(res.plane.index_buffer.slice(..), IndexFormat::Uint16);
                rp.draw_indexed(0..res.plane.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_color_conversion() {
        let c = to_wgpu_color([0.0, 0.6, 1.0]);
        assert_eq!((c.r, c.b, c.a), (0.0, 1.0, 1.0));
        assert!((c.g - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_css_color_clamps() {
        assert_eq!(to_css_color([0.0, 0.6, 1.0]), "rgb(0, 153, 255)");
        assert_eq!(to_css_color([-1.0, 2.0, 0.5]), "rgb(0, 255, 128)");
    }
}
