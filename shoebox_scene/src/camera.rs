// Perspective camera looking at the world origin.
//
// Right-handed, Y up, looking down −Z from a point in front of and slightly
// above the building. The aspect ratio tracks the viewport; resizing never
// touches scene geometry.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraParams;
use crate::input::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(params: &CameraParams, viewport: Viewport) -> Self {
        Self {
            position: Vec3::new(0.0, params.height, params.distance),
            target: Vec3::ZERO,
            fov_y: params.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: params.near,
            far: params.far,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-6), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to pixel coordinates (origin top-left).
    /// Returns `None` for points outside the near/far range.
    pub fn project(&self, view_projection: &Mat4, point: Vec3, viewport: Viewport) -> Option<Vec2> {
        let clip = *view_projection * point.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.width as f32,
            (0.5 - ndc.y * 0.5) * viewport.height as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_follows_viewport() {
        let mut cam = Camera::new(&CameraParams::default(), Viewport::new(800, 600));
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
        cam.set_viewport(Viewport::new(1600, 900));
        assert!((cam.aspect - 1600.0 / 900.0).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_near_screen_centre() {
        let vp = Viewport::new(800, 600);
        let cam = Camera::new(&CameraParams::default(), vp);
        let px = cam.project(&cam.view_projection(), Vec3::ZERO, vp).unwrap();
        assert!((px.x - 400.0).abs() < 1.0, "{px}");
        assert!((px.y - 300.0).abs() < 1.0, "{px}");
    }

    #[test]
    fn points_behind_camera_are_rejected() {
        let vp = Viewport::new(800, 600);
        let cam = Camera::new(&CameraParams::default(), vp);
        let behind = cam.position + (cam.position - cam.target);
        assert!(cam.project(&cam.view_projection(), behind, vp).is_none());
    }

    #[test]
    fn up_is_up_on_screen() {
        let vp = Viewport::new(800, 600);
        let cam = Camera::new(&CameraParams::default(), vp);
        let vpm = cam.view_projection();
        let low = cam.project(&vpm, Vec3::new(0.0, -1.0, 0.0), vp).unwrap();
        let high = cam.project(&vpm, Vec3::new(0.0, 1.0, 0.0), vp).unwrap();
        assert!(high.y < low.y);
    }
}
