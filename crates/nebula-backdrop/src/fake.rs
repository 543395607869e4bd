//! Recording host and surface for tests.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use anyhow::{Result, bail, ensure};
use nebula_engine::coords::{SurfaceSize, Viewport};
use nebula_engine::core::{FrameHandle, Host, ListenerId};
use nebula_engine::input::ListenerKind;
use nebula_engine::render::{FrameParams, FrameStatus, RenderSurface};
use nebula_engine::scene::{DrawList, Geometry, GeometryId, Material, MaterialId};

/// Teardown-relevant calls, in the order they happened.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Call {
    CancelFrame,
    RemoveListener,
    DetachSurface,
    DisposeGeometry,
    DisposeMaterial,
    DisposeSurface,
}

#[derive(Debug)]
pub struct Journal {
    pub calls: Vec<Call>,

    pub surfaces_attached: u32,
    pub surfaces_detached: u32,
    pub attach_sizes: Vec<SurfaceSize>,
    pub surfaces_disposed: u32,
    pub resizes: Vec<SurfaceSize>,

    pub issued: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub outstanding: Vec<FrameHandle>,

    pub listeners: HashMap<ListenerId, ListenerKind>,
    pub listeners_added: u32,
    pub listeners_removed: u32,

    pub renders: u32,
    pub last_frame: Option<FrameParams>,
    pub last_draw_count: usize,
    pub render_status: FrameStatus,

    pub geometries_created: u32,
    pub materials_created: u32,
    pub geometries_disposed: Vec<GeometryId>,
    pub materials_disposed: Vec<MaterialId>,
    /// Resource creations allowed before creation starts failing.
    pub create_budget: Option<u32>,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            surfaces_attached: 0,
            surfaces_detached: 0,
            attach_sizes: Vec::new(),
            surfaces_disposed: 0,
            resizes: Vec::new(),
            issued: Vec::new(),
            cancelled: Vec::new(),
            outstanding: Vec::new(),
            listeners: HashMap::new(),
            listeners_added: 0,
            listeners_removed: 0,
            renders: 0,
            last_frame: None,
            last_draw_count: 0,
            render_status: FrameStatus::Presented,
            geometries_created: 0,
            materials_created: 0,
            geometries_disposed: Vec::new(),
            materials_disposed: Vec::new(),
            create_budget: None,
        }
    }
}

impl Journal {
    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn spend_create_budget(&mut self) -> Result<()> {
        if let Some(budget) = self.create_budget.as_mut() {
            if *budget == 0 {
                bail!("out of device memory");
            }
            *budget -= 1;
        }
        Ok(())
    }
}

pub struct FakeHost {
    anchor: Viewport,
    dpr: f32,
    attached: bool,
    next_handle: u64,
    next_listener: u64,
    journal: Rc<RefCell<Journal>>,
}

impl FakeHost {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            anchor: Viewport::new(width, height),
            dpr,
            attached: false,
            next_handle: 0,
            next_listener: 0,
            journal: Rc::new(RefCell::new(Journal::default())),
        }
    }

    pub fn journal(&self) -> Ref<'_, Journal> {
        self.journal.borrow()
    }

    pub fn journal_mut(&self) -> RefMut<'_, Journal> {
        self.journal.borrow_mut()
    }

    pub fn set_anchor(&mut self, width: f32, height: f32) {
        self.anchor = Viewport::new(width, height);
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f32) {
        self.dpr = dpr;
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.journal().listeners.values().any(|&k| k == kind)
    }

    /// Delivers the oldest outstanding frame callback, as a host event loop would.
    pub fn fire_frame(&mut self) -> Option<FrameHandle> {
        let mut j = self.journal.borrow_mut();
        if j.outstanding.is_empty() {
            return None;
        }
        Some(j.outstanding.remove(0))
    }
}

impl Host for FakeHost {
    type Surface = FakeSurface;

    fn anchor_size(&self) -> Viewport {
        self.anchor
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn attach_surface(&mut self, size: SurfaceSize) -> Result<FakeSurface> {
        ensure!(!self.attached, "anchor already has a rendering surface");
        self.attached = true;

        let mut j = self.journal.borrow_mut();
        j.surfaces_attached += 1;
        j.attach_sizes.push(size);

        Ok(FakeSurface {
            size,
            next_id: 0,
            live_geometries: HashSet::new(),
            live_materials: HashSet::new(),
            journal: self.journal.clone(),
        })
    }

    fn detach_surface(&mut self) {
        if self.attached {
            self.attached = false;
            let mut j = self.journal.borrow_mut();
            j.surfaces_detached += 1;
            j.calls.push(Call::DetachSurface);
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle::new(self.next_handle);

        let mut j = self.journal.borrow_mut();
        j.issued.push(handle);
        j.outstanding.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut j = self.journal.borrow_mut();
        j.cancelled.push(handle);
        j.calls.push(Call::CancelFrame);
        j.outstanding.retain(|&h| h != handle);
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId::new(self.next_listener);

        let mut j = self.journal.borrow_mut();
        j.listeners.insert(id, kind);
        j.listeners_added += 1;
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        let mut j = self.journal.borrow_mut();
        if j.listeners.remove(&id).is_some() {
            j.listeners_removed += 1;
            j.calls.push(Call::RemoveListener);
        }
    }
}

pub struct FakeSurface {
    size: SurfaceSize,
    next_id: u32,
    live_geometries: HashSet<u32>,
    live_materials: HashSet<u32>,
    journal: Rc<RefCell<Journal>>,
}

impl FakeSurface {
    pub fn live_resources(&self) -> usize {
        self.live_geometries.len() + self.live_materials.len()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl RenderSurface for FakeSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() || size == self.size {
            return;
        }
        self.size = size;
        self.journal.borrow_mut().resizes.push(size);
    }

    fn create_geometry(&mut self, _geometry: &Geometry) -> Result<GeometryId> {
        self.journal.borrow_mut().spend_create_budget()?;
        let id = self.next_id();
        self.live_geometries.insert(id);
        self.journal.borrow_mut().geometries_created += 1;
        Ok(GeometryId(id))
    }

    fn create_material(&mut self, _material: &Material) -> Result<MaterialId> {
        self.journal.borrow_mut().spend_create_budget()?;
        let id = self.next_id();
        self.live_materials.insert(id);
        self.journal.borrow_mut().materials_created += 1;
        Ok(MaterialId(id))
    }

    fn render(&mut self, frame: &FrameParams, draws: &mut DrawList) -> FrameStatus {
        let count = draws.iter_in_paint_order().count();

        let mut j = self.journal.borrow_mut();
        j.renders += 1;
        j.last_frame = Some(*frame);
        j.last_draw_count = count;
        j.render_status
    }

    fn dispose_geometry(&mut self, id: GeometryId) {
        assert!(self.live_geometries.remove(&id.0), "geometry {id:?} disposed twice");
        let mut j = self.journal.borrow_mut();
        j.geometries_disposed.push(id);
        j.calls.push(Call::DisposeGeometry);
    }

    fn dispose_material(&mut self, id: MaterialId) {
        assert!(self.live_materials.remove(&id.0), "material {id:?} disposed twice");
        let mut j = self.journal.borrow_mut();
        j.materials_disposed.push(id);
        j.calls.push(Call::DisposeMaterial);
    }

    fn dispose(&mut self) {
        let mut j = self.journal.borrow_mut();
        j.surfaces_disposed += 1;
        j.calls.push(Call::DisposeSurface);
    }
}
