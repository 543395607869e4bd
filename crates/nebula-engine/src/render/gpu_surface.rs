use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use winit::window::Window;

use crate::coords::SurfaceSize;
use crate::device::{Gpu, GpuInit};
use crate::scene::{DrawList, Geometry, GeometryId, Material, MaterialId};

use super::mesh::{GpuGeometry, GpuMaterial, MeshRenderer};
use super::{FrameParams, FrameStatus, RenderCtx, RenderSurface, RenderTarget};

/// wgpu-backed `RenderSurface` bound to one window.
pub struct GpuSurface {
    window: Arc<Window>,
    live: Option<LiveSurface>,
    next_id: u32,
}

struct LiveSurface {
    gpu: Gpu,
    renderer: MeshRenderer,
    geometries: HashMap<GeometryId, GpuGeometry>,
    materials: HashMap<MaterialId, GpuMaterial>,
}

impl LiveSurface {
    fn ctx(&self) -> RenderCtx<'_> {
        RenderCtx::from_gpu(&self.gpu)
    }
}

impl GpuSurface {
    /// Creates the GPU context and renderer for `window` at `size`.
    pub async fn new(window: Arc<Window>, size: SurfaceSize, init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new(window.clone(), size, init).await?;
        let renderer = MeshRenderer::new(&RenderCtx::from_gpu(&gpu));

        Ok(Self {
            window,
            live: Some(LiveSurface {
                gpu,
                renderer,
                geometries: HashMap::new(),
                materials: HashMap::new(),
            }),
            next_id: 0,
        })
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn live(&mut self) -> Result<&mut LiveSurface> {
        self.live
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("surface already disposed"))
    }
}

impl RenderSurface for GpuSurface {
    fn size(&self) -> SurfaceSize {
        self.live
            .as_ref()
            .map(|live| live.gpu.size())
            .unwrap_or_default()
    }

    fn resize(&mut self, size: SurfaceSize) {
        if let Some(live) = self.live.as_mut() {
            live.gpu.resize(size);
        }
    }

    fn create_geometry(&mut self, geometry: &Geometry) -> Result<GeometryId> {
        let id = GeometryId(self.next_id());
        let live = self.live()?;
        let uploaded = live.renderer.upload_geometry(&live.ctx(), geometry);
        live.geometries.insert(id, uploaded);
        log::debug!("uploaded geometry {id:?} ({} vertices)", geometry.vertex_count());
        Ok(id)
    }

    fn create_material(&mut self, material: &Material) -> Result<MaterialId> {
        let id = MaterialId(self.next_id());
        let live = self.live()?;
        let uploaded = live.renderer.upload_material(&live.ctx(), material);
        live.materials.insert(id, uploaded);
        Ok(id)
    }

    fn render(&mut self, frame: &FrameParams, draws: &mut DrawList) -> FrameStatus {
        let Some(live) = self.live.as_mut() else {
            log::warn!("render on a disposed surface ignored");
            return FrameStatus::Skipped;
        };

        let mut gpu_frame = match live.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let reason = err.to_string();
                let action = live.gpu.handle_surface_error(err);
                if action.is_fatal() {
                    log::error!("surface lost beyond recovery: {reason}");
                    return FrameStatus::Fatal;
                }
                log::debug!("frame skipped ({action:?}): {reason}");
                return FrameStatus::Skipped;
            }
        };

        {
            let ctx = RenderCtx::from_gpu(&live.gpu);
            let mut target = RenderTarget {
                encoder: &mut gpu_frame.encoder,
                color_view: &gpu_frame.view,
            };
            live.renderer.render(
                &ctx,
                &mut target,
                frame,
                draws,
                &live.geometries,
                &live.materials,
            );
        }

        self.window.pre_present_notify();
        live.gpu.submit(gpu_frame);

        FrameStatus::Presented
    }

    fn dispose_geometry(&mut self, id: GeometryId) {
        match self.live.as_mut().and_then(|live| live.geometries.remove(&id)) {
            Some(geometry) => geometry.destroy(),
            None => log::warn!("dispose of unknown geometry {id:?}"),
        }
    }

    fn dispose_material(&mut self, id: MaterialId) {
        match self.live.as_mut().and_then(|live| live.materials.remove(&id)) {
            Some(material) => material.destroy(),
            None => log::warn!("dispose of unknown material {id:?}"),
        }
    }

    fn dispose(&mut self) {
        let Some(live) = self.live.take() else { return };

        if !live.geometries.is_empty() || !live.materials.is_empty() {
            log::warn!(
                "disposing surface with {} geometries and {} materials still alive",
                live.geometries.len(),
                live.materials.len()
            );
        }

        log::debug!("gpu surface disposed ({})", live.gpu.adapter_info().name);
        drop(live);
    }
}
