//! WGPU-based rendering engine
//!
//! Owns the surface, device and pipelines, and draws a [`Scene`] from its
//! camera once per call to [`RenderEngine::render_frame`]. Per-object GPU
//! buffers are created lazily the first time an object is drawn, which is
//! how a model inserted mid-run by the asset loader gets picked up.

use std::sync::Arc;

use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        color::Color,
        resources::{
            global_bindings::{GlobalBindings, GlobalUniform, ObjectUbo, ObjectUniform},
            texture_resource::TextureResource,
        },
        scene::{object::Object, LineVertex, Scene, Vertex3D},
    },
    wgpu_utils::{binding_types, DynamicBuffer},
};

use super::{
    pipeline_manager::{PipelineConfig, PipelineManager},
    viewport::Viewport,
};

const MESH_PIPELINE: &str = "Mesh";
const LINE_PIPELINE: &str = "Lines";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to build pipelines: {}", .0.join("; "))]
    Pipeline(Vec<String>),
    #[error("could not acquire surface texture: {0}")]
    Frame(wgpu::SurfaceError),
}

/// Work done by the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draw_calls: u32,
    pub triangles: u32,
    pub line_segments: u32,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct GpuObject {
    meshes: Vec<GpuMesh>,
    ubo: ObjectUbo,
    bind_group: wgpu::BindGroup,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    object_layout: wgpu::BindGroupLayout,
    gpu_objects: Vec<Option<GpuObject>>,
    lines: DynamicBuffer<LineVertex>,
    clear_color: wgpu::Color,
    frames_rendered: u64,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`.
    ///
    /// # Errors
    /// Any failure here leaves the application without a draw surface and is
    /// meant to abort startup.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        viewport: &Viewport,
        clear_color: Color,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let info = adapter.get_info();
        log::info!("using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        // Colours are kept linear; an sRGB target does the encoding.
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let (width, height) = viewport.surface_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "surface {}x{} {:?} (pixel ratio {})",
            width,
            height,
            format,
            viewport.pixel_ratio()
        );

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");
        let global_bindings = GlobalBindings::new(&device);
        let object_layout = binding_types::single_uniform_layout(&device, "Object Bind Group Layout");
        let lines = DynamicBuffer::new(&device, 256);

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device.clone());

        pipeline_manager.load_shader("mesh", include_str!("mesh.wgsl"));
        pipeline_manager.load_shader("line", include_str!("line.wgsl"));

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            PipelineConfig::default()
                .with_label("MESH")
                .with_shader("mesh")
                .with_vertex_layout(Vertex3D::desc())
                .with_depth(TextureResource::DEPTH_FORMAT, true)
                .with_color_format(format)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    object_layout.clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            LINE_PIPELINE,
            PipelineConfig::default()
                .with_label("LINES")
                .with_shader("line")
                .with_vertex_layout(LineVertex::desc())
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_depth(TextureResource::DEPTH_FORMAT, false)
                .with_color_format(format)
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()]),
        );

        pipeline_manager
            .create_all_pipelines()
            .map_err(RenderError::Pipeline)?;

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            format,
            depth_texture,
            pipeline_manager,
            global_bindings,
            object_layout,
            gpu_objects: Vec::new(),
            lines,
            clear_color: to_clear_color(clear_color),
            frames_rendered: 0,
        })
    }

    /// Draws one frame: scene meshes, then helper lines, then whatever the
    /// `ui_callback` records on top.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: F) -> Result<RenderStats, RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(RenderStats::default());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out, skipping frame");
                return Ok(RenderStats::default());
            }
            Err(err) => return Err(RenderError::Frame(err)),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.global_bindings
            .update(&self.queue, GlobalUniform::from_scene(scene));
        self.prepare_objects(scene);
        let lines = scene.helper_lines();
        self.lines.update_data(&self.device, &self.queue, &lines);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut stats = RenderStats::default();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(MESH_PIPELINE) {
                render_pass.set_pipeline(pipeline);

                for (id, _) in scene.visible_objects() {
                    let Some(Some(gpu)) = self.gpu_objects.get(id.index()) else {
                        continue;
                    };
                    render_pass.set_bind_group(1, &gpu.bind_group, &[]);
                    for mesh in &gpu.meshes {
                        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        render_pass
                            .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                        stats.draw_calls += 1;
                        stats.triangles += mesh.index_count / 3;
                    }
                }
            }

            if !self.lines.is_empty() {
                if let Some(pipeline) = self.pipeline_manager.get_pipeline(LINE_PIPELINE) {
                    let count = self.lines.len() as u32;
                    let bytes = (self.lines.len() * std::mem::size_of::<LineVertex>()) as u64;
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_vertex_buffer(0, self.lines.buffer().slice(..bytes));
                    render_pass.draw(0..count, 0..1);
                    stats.draw_calls += 1;
                    stats.line_segments += count / 2;
                }
            }
        }

        ui_callback(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        self.frames_rendered += 1;
        if self.frames_rendered == 1 {
            log::info!(
                "first frame: {} draw calls, {} triangles, {} line segments",
                stats.draw_calls,
                stats.triangles,
                stats.line_segments
            );
        }
        log::trace!("frame {}: {:?}", self.frames_rendered, stats);
        Ok(stats)
    }

    /// Creates buffers for objects seen for the first time and refreshes the
    /// uniforms of every visible object.
    fn prepare_objects(&mut self, scene: &Scene) {
        if self.gpu_objects.len() < scene.object_count() {
            self.gpu_objects.resize_with(scene.object_count(), || None);
        }

        for (id, object) in scene.visible_objects() {
            let slot = &mut self.gpu_objects[id.index()];
            let gpu = slot.get_or_insert_with(|| {
                create_gpu_object(&self.device, &self.object_layout, object)
            });
            gpu.ubo
                .update_content(&self.queue, ObjectUniform::from_object(object));
        }
    }

    /// Reconfigures the surface for a new viewport. Empty viewports
    /// (minimised windows) are ignored.
    pub fn resize(&mut self, viewport: &Viewport) {
        if viewport.is_empty() {
            return;
        }

        let (width, height) = viewport.surface_size();
        if width == self.config.width && height == self.config.height {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        log::debug!(
            "surface resized to {}x{} (pixel ratio {})",
            width,
            height,
            viewport.pixel_ratio()
        );
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn create_gpu_object(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    object: &Object,
) -> GpuObject {
    let meshes = object
        .meshes
        .iter()
        .filter(|mesh| mesh.index_count() > 0)
        .map(|mesh| GpuMesh {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", object.name)),
                contents: bytemuck::cast_slice(&mesh.geometry.to_vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", object.name)),
                contents: bytemuck::cast_slice(&mesh.geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: mesh.index_count(),
        })
        .collect();

    let ubo = ObjectUbo::new(device);
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{} Bind Group", object.name)),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.binding_resource(),
        }],
    });

    log::debug!("uploaded '{}' to the GPU", object.name);
    GpuObject {
        meshes,
        ubo,
        bind_group,
    }
}

fn to_clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_is_opaque_linear() {
        let clear = to_clear_color(Color::from_hex(0x888888));
        assert_eq!(clear.a, 1.0);
        assert!((clear.r - 0.246).abs() < 1e-3);
        assert_eq!(clear.r, clear.g);
    }

    #[test]
    fn test_pipeline_error_lists_every_failure() {
        let err = RenderError::Pipeline(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "failed to build pipelines: a; b");
    }
}
