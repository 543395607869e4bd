//! Mount/tick/unmount of the backdrop on a host anchor.

use std::time::Instant;

use anyhow::{Context, Result, bail, ensure};
use nebula_engine::coords::Viewport;
use nebula_engine::core::{FrameHandle, Host};
use nebula_engine::input::InputEvent;
use nebula_engine::render::{FrameParams, FrameStatus, RenderSurface};
use nebula_engine::scene::{
    Blending, DrawCmd, DrawList, Geometry, GeometryId, Material, MaterialId, PointsMaterial,
    ZIndex,
};
use nebula_engine::time::FrameClock;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::PerspectiveCamera;
use crate::config::BackdropConfig;
use crate::input::{InputReactor, PointerState};
use crate::particles::ParticleField;
use crate::scheduler::FrameScheduler;
use crate::shapes::ShapeEnsemble;

/// A frame arriving this long (seconds) after the previous one counts as a stall.
const STALL_DT: f32 = 0.1;

/// Result of delivering one frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    Presented,
    /// Rendered nothing this frame (surface busy or reconfigured); the loop continues.
    Skipped,
    /// Stale handle, or the backdrop is no longer mounted.
    Ignored,
    /// The surface cannot render anymore; the loop has stopped requesting frames.
    Fatal,
}

#[derive(Debug, Copy, Clone)]
struct Drawable {
    geometry: GeometryId,
    material: MaterialId,
}

/// Everything acquired from the host at mount, released together.
struct Resources<S: RenderSurface> {
    surface: S,
    geometries: Vec<GeometryId>,
    materials: Vec<MaterialId>,
    field: Option<Drawable>,
    shapes: Vec<Drawable>,
}

impl<S: RenderSurface> Resources<S> {
    fn new(surface: S) -> Self {
        Self {
            surface,
            geometries: Vec::new(),
            materials: Vec::new(),
            field: None,
            shapes: Vec::new(),
        }
    }

    fn add(&mut self, geometry: &Geometry, material: &Material) -> Result<Drawable> {
        let geometry = self.surface.create_geometry(geometry)?;
        self.geometries.push(geometry);

        let material = self.surface.create_material(material)?;
        self.materials.push(material);

        Ok(Drawable { geometry, material })
    }

    fn upload(
        &mut self,
        field: &ParticleField,
        shapes: &ShapeEnsemble,
        config: &BackdropConfig,
    ) -> Result<()> {
        let points = Material::Points(PointsMaterial {
            size: config.point_size,
            opacity: config.point_opacity,
            vertex_colors: true,
            blending: Blending::Additive,
            ..PointsMaterial::default()
        });
        let drawable = self
            .add(&Geometry::Points(field.to_point_cloud()), &points)
            .context("particle field")?;
        self.field = Some(drawable);

        if config.draw_shapes {
            for shape in shapes.shapes() {
                let drawable = self
                    .add(
                        &Geometry::Lines(shape.kind.geometry()),
                        &Material::Wireframe(shape.material()),
                    )
                    .with_context(|| format!("{:?} shape", shape.kind))?;
                self.shapes.push(drawable);
            }
        }

        Ok(())
    }

    /// Shapes behind, additive points on top.
    fn record(&self, scene: &mut DrawList, field: &ParticleField, shapes: &ShapeEnsemble) {
        for (drawable, shape) in self.shapes.iter().zip(shapes.shapes()) {
            scene.push(
                ZIndex::BACKGROUND,
                DrawCmd::new(drawable.geometry, drawable.material, shape.model_matrix()),
            );
        }

        if let Some(d) = self.field {
            scene.push(
                ZIndex::FOREGROUND,
                DrawCmd::new(d.geometry, d.material, field.model_matrix()),
            );
        }
    }

    fn release(mut self) {
        for id in self.geometries.drain(..) {
            self.surface.dispose_geometry(id);
        }
        for id in self.materials.drain(..) {
            self.surface.dispose_material(id);
        }
        self.surface.dispose();
    }
}

/// A mounted backdrop.
///
/// Owns the rendering surface, the animated entities and the frame loop state.
/// Created by [`Backdrop::mount`], which also renders the first frame; every
/// later frame is driven by [`Backdrop::tick`] with the handle the host
/// delivered. [`Backdrop::unmount`] releases everything and may be called
/// more than once.
pub struct Backdrop<S: RenderSurface> {
    config: BackdropConfig,
    viewport: Viewport,
    pixel_ratio: f32,

    camera: PerspectiveCamera,
    field: ParticleField,
    shapes: ShapeEnsemble,
    reactor: InputReactor,
    scheduler: FrameScheduler,
    clock: FrameClock,

    scene: DrawList,
    resources: Option<Resources<S>>,
    frames_rendered: u64,
    frames_stalled: u64,
}

impl<S: RenderSurface> Backdrop<S> {
    pub fn mount<H>(host: &mut H, config: BackdropConfig) -> Result<Self>
    where
        H: Host<Surface = S>,
    {
        let viewport = host.anchor_size();
        ensure!(
            viewport.is_valid(),
            "anchor has no drawable area ({}x{})",
            viewport.width,
            viewport.height
        );

        let pixel_ratio = config.effective_pixel_ratio(host.device_pixel_ratio());
        let size = viewport
            .to_physical(pixel_ratio)
            .context("anchor is smaller than one physical pixel")?;
        let aspect = viewport.aspect().context("anchor aspect is undefined")?;

        let field = match config.seed {
            Some(seed) => ParticleField::construct(
                config.particle_count,
                config.spread,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => ParticleField::construct(config.particle_count, config.spread, &mut rand::rng()),
        };
        let shapes = ShapeEnsemble::construct(config.float_motion);

        let surface = host
            .attach_surface(size)
            .context("failed to attach rendering surface")?;

        let mut resources = Resources::new(surface);
        if let Err(e) = resources.upload(&field, &shapes, &config) {
            host.detach_surface();
            resources.release();
            return Err(e.context("failed to upload backdrop scene"));
        }

        let mut backdrop = Self {
            config,
            viewport,
            pixel_ratio,
            camera: PerspectiveCamera::new(aspect),
            field,
            shapes,
            reactor: InputReactor::new(),
            scheduler: FrameScheduler::new(),
            clock: FrameClock::new(),
            scene: DrawList::new(),
            resources: Some(resources),
            frames_rendered: 0,
            frames_stalled: 0,
        };

        backdrop.reactor.attach(host);

        log::info!(
            "backdrop mounted: {}x{} @{}x, {} particles, {} shapes",
            viewport.width,
            viewport.height,
            pixel_ratio,
            backdrop.field.len(),
            if backdrop.config.draw_shapes { backdrop.shapes.len() } else { 0 }
        );

        if backdrop.run_frame(host, Instant::now()) == TickOutcome::Fatal {
            backdrop.unmount(host);
            bail!("first frame failed to render");
        }

        Ok(backdrop)
    }

    /// Delivers a host frame callback. Frames with a handle other than the
    /// pending one are ignored.
    pub fn tick<H: Host>(&mut self, host: &mut H, handle: FrameHandle) -> TickOutcome {
        self.tick_at(host, handle, Instant::now())
    }

    /// [`Backdrop::tick`] with an explicit frame timestamp.
    pub fn tick_at<H: Host>(&mut self, host: &mut H, handle: FrameHandle, now: Instant) -> TickOutcome {
        if !self.scheduler.accept(handle) {
            log::trace!("ignoring frame {}", handle.raw());
            return TickOutcome::Ignored;
        }
        self.run_frame(host, now)
    }

    fn run_frame<H: Host>(&mut self, host: &mut H, now: Instant) -> TickOutcome {
        let Some(res) = self.resources.as_mut() else {
            return TickOutcome::Ignored;
        };

        let time = self.clock.tick_at(now);
        if time.dt >= STALL_DT {
            self.frames_stalled += 1;
            log::debug!("frame {} arrived {:.0} ms late", time.frame_index, time.dt * 1000.0);
        }

        self.field.advance();
        self.shapes.advance(time.elapsed_ms());
        self.camera.follow_pointer(self.reactor.pointer());

        self.scene.clear();
        res.record(&mut self.scene, &self.field, &self.shapes);

        let frame = FrameParams {
            view: self.camera.view(),
            projection: self.camera.projection(),
            clear: self.config.clear_color,
        };

        let status = res.surface.render(&frame, &mut self.scene);
        self.frames_rendered += 1;

        match status {
            FrameStatus::Presented => {
                self.scheduler.schedule(host);
                TickOutcome::Presented
            }
            FrameStatus::Skipped => {
                self.scheduler.schedule(host);
                TickOutcome::Skipped
            }
            FrameStatus::Fatal => {
                log::error!("surface failed on frame {}; stopping", time.frame_index);
                TickOutcome::Fatal
            }
        }
    }

    /// Applies a new logical anchor size.
    ///
    /// A size without a single physical pixel at the current ratio is ignored
    /// and the last valid projection is kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.apply_anchor(Viewport::new(width, height), self.pixel_ratio);
    }

    /// Re-measures the anchor (size and pixel ratio) through the host.
    pub fn on_resize<H: Host>(&mut self, host: &H) {
        let ratio = self.config.effective_pixel_ratio(host.device_pixel_ratio());
        self.apply_anchor(host.anchor_size(), ratio);
    }

    fn apply_anchor(&mut self, viewport: Viewport, pixel_ratio: f32) {
        let Some(res) = self.resources.as_mut() else {
            return;
        };
        let (Some(size), Some(aspect)) = (viewport.to_physical(pixel_ratio), viewport.aspect())
        else {
            log::debug!(
                "ignoring degenerate resize ({}x{} @{}x)",
                viewport.width,
                viewport.height,
                pixel_ratio
            );
            return;
        };

        self.viewport = viewport;
        self.pixel_ratio = pixel_ratio;
        self.camera.set_aspect(aspect);
        res.surface.resize(size);
    }

    pub fn on_event<H: Host>(&mut self, host: &mut H, event: &InputEvent) {
        if self.resources.is_none() {
            return;
        }
        match event {
            InputEvent::PointerMoved(e) => self.reactor.on_pointer_move(*e, self.viewport),
            InputEvent::Resized => self.on_resize(host),
        }
    }

    /// Cancels the pending frame, removes listeners, detaches the surface and
    /// disposes every GPU resource, in that order. Later calls do nothing.
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        let Some(resources) = self.resources.take() else {
            return;
        };

        self.scheduler.stop(host);
        self.reactor.detach(host);
        host.detach_surface();
        resources.release();

        log::info!("backdrop unmounted after {} frames", self.frames_rendered);
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.resources.is_some()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.reactor.pointer()
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeEnsemble {
        &self.shapes
    }

    #[inline]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Frames that followed the previous one by more than 100 ms.
    #[inline]
    pub fn frames_stalled(&self) -> u64 {
        self.frames_stalled
    }

    pub fn surface(&self) -> Option<&S> {
        self.resources.as_ref().map(|r| &r.surface)
    }
}
