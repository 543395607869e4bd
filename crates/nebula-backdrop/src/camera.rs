use glam::{Mat4, Vec3};

use crate::input::PointerState;

/// How far the camera follows the normalized pointer.
const POINTER_FOLLOW: f32 = 0.5;

/// Right-handed perspective camera looking at `target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view, in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y: 75.0,
            aspect,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
        }
    }

    /// Returns `false` and keeps the previous aspect for a degenerate value.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if !(aspect.is_finite() && aspect > 0.0) {
            return false;
        }
        self.aspect = aspect;
        true
    }

    /// Offsets the camera in x/y towards the pointer; depth is unchanged.
    pub fn follow_pointer(&mut self, pointer: PointerState) {
        self.position.x = pointer.x * POINTER_FOLLOW;
        self.position.y = pointer.y * POINTER_FOLLOW;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cam = PerspectiveCamera::new(800.0 / 600.0);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(cam.fov_y, 75.0);
        assert!(cam.projection().is_finite());
    }

    #[test]
    fn degenerate_aspect_is_ignored() {
        let mut cam = PerspectiveCamera::new(2.0);
        let before = cam.projection();

        assert!(!cam.set_aspect(0.0));
        assert!(!cam.set_aspect(f32::NAN));
        assert!(!cam.set_aspect(f32::INFINITY));
        assert_eq!(cam.projection(), before);

        assert!(cam.set_aspect(1.0));
        assert_ne!(cam.projection(), before);
    }

    #[test]
    fn follows_half_the_pointer() {
        let mut cam = PerspectiveCamera::new(1.0);
        cam.follow_pointer(PointerState { x: 1.0, y: -0.5 });
        assert_eq!(cam.position, Vec3::new(0.5, -0.25, 5.0));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = PerspectiveCamera::new(1.5);
        let clip = cam.projection() * cam.view() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
