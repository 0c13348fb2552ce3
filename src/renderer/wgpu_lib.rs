//! WGPU presentation of the CPU canvas.
//!
//! [`WgpuPresenter`] owns the device, the window surface and a texture the
//! size of the surface. Each present uploads only the regions that changed
//! since the last one, then draws the texture over the whole surface with a
//! single textured quad.

use crate::error::RenderError;
use crate::math::{Rect, Size};
use crate::renderer::canvas::PixelCanvas;
use crate::renderer::pipeline_builder::PresentPass;

struct CanvasTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Uploads a [`PixelCanvas`] to the GPU and presents it.
pub struct WgpuPresenter {
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pass: PresentPass,
    sampler: wgpu::Sampler,
    canvas_texture: CanvasTexture,
    // Set whenever the texture contents can no longer be trusted.
    full_upload: bool,
}

impl WgpuPresenter {
    /// Sets up the adapter, device and surface for a window of `size`.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        size: Size,
    ) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| {
                RenderError::Adapter("no adapter is compatible with the window surface".to_string())
            })?;
        log::info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &surface_config);

        let pass = PresentPass::new(&device, surface_config.format);

        // The texture matches the surface pixel for pixel.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let canvas_texture = Self::create_canvas_texture(&device, &pass, &sampler, size);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            pass,
            sampler,
            canvas_texture,
            full_upload: true,
        })
    }

    /// Size of the configured surface.
    pub fn size(&self) -> Size {
        Size::new(self.surface_config.width, self.surface_config.height)
    }

    /// Reconfigures the swapchain and recreates the canvas texture.
    ///
    /// Zero sizes (a minimized window) are ignored.
    pub fn resize(&mut self, size: Size) {
        if size.is_empty() || size == self.size() {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.canvas_texture =
            Self::create_canvas_texture(&self.device, &self.pass, &self.sampler, size);
        self.full_upload = true;
    }

    /// Uploads `regions` of `canvas` and presents a frame.
    ///
    /// The whole canvas is uploaded instead when the texture was just created.
    /// A lost or outdated surface is reconfigured and the frame is skipped.
    pub fn present(&mut self, canvas: &PixelCanvas, regions: &[Rect]) -> Result<(), RenderError> {
        let canvas_size = canvas.image().dimensions();
        if canvas_size != (self.surface_config.width, self.surface_config.height) {
            log::warn!(
                "Canvas {}x{} does not match surface {}x{}, skipping frame",
                canvas_size.0,
                canvas_size.1,
                self.surface_config.width,
                self.surface_config.height
            );
            self.full_upload = true;
            return Ok(());
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {err}, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.full_upload = true;
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring surface texture, skipping frame");
                self.full_upload = true;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if std::mem::take(&mut self.full_upload) {
            self.upload(canvas, Rect::from_size(self.size()));
        } else {
            for region in regions {
                self.upload(canvas, *region);
            }
        }

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });
        self.pass
            .record(&mut encoder, &view, &self.canvas_texture.bind_group);

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn upload(&self, canvas: &PixelCanvas, region: Rect) {
        let Some((x, y, width, height)) = region.clip_to(self.size()) else {
            return;
        };
        let bytes = canvas.region_bytes(x, y, width, height);

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.canvas_texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        size: Size,
    ) -> Result<wgpu::SurfaceConfiguration, RenderError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(RenderError::SurfaceFormat)?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        })
    }

    fn create_canvas_texture(
        device: &wgpu::Device,
        pass: &PresentPass,
        sampler: &wgpu::Sampler,
        size: Size,
    ) -> CanvasTexture {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = pass.bind_canvas(device, &view, sampler);

        CanvasTexture {
            texture,
            bind_group,
        }
    }
}
