//! Perspective camera for 3D point cloud viewports

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use viewcrate_algorithms::{compute_screen_distance_px, find_closest_to_ray, RayHit};
use viewcrate_core::{Point3d, Vector3d};

use crate::controller::CameraPose;

/// A Y-up perspective camera looking at a target
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3d,
    pub target: Point3d,
    pub up: Vector3d,
    /// Vertical field of view in radians
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

/// A picked sample together with how far it lands from the pointer on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPick {
    pub hit: RayHit,
    pub screen_distance_px: f64,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3d,
        target: Point3d,
        up: Vector3d,
        fov: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f64 {
        (self.position - self.target).norm()
    }

    /// World-space ray leaving the camera through a point given in NDC.
    ///
    /// Returns the camera position and an unnormalized direction, or `None` when the
    /// view-projection matrix is singular.
    pub fn ray_through_ndc(&self, ndc_x: f64, ndc_y: f64) -> Option<(Point3d, Vector3d)> {
        let inverse = (self.projection_matrix() * self.view_matrix()).try_inverse()?;
        let far_clip = inverse * Point3::new(ndc_x, ndc_y, 1.0).to_homogeneous();
        let far_point = Point3::from_homogeneous(far_clip)?;

        let direction: Vector3<f64> = far_point - self.position;
        Some((self.position, direction))
    }

    /// Project a world-space point to NDC; `None` for points behind the camera
    pub fn project_to_ndc(&self, point: &Point3d) -> Option<(f64, f64)> {
        let clip = self.projection_matrix() * self.view_matrix() * point.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        Some((clip.x / clip.w, clip.y / clip.w))
    }

    /// Resolve a pointer position in a viewport to the nearest sample under it.
    ///
    /// `max_distance_sq` bounds the perpendicular distance between the pick ray and the
    /// sample, in world units squared.
    pub fn pick_sample(
        &self,
        samples: &[Point3d],
        pointer: (f64, f64),
        viewport: (f64, f64),
        max_distance_sq: f64,
    ) -> Option<ScreenPick> {
        let (width, height) = viewport;
        if !(width > 0.0 && height > 0.0) {
            return None;
        }

        let ndc_x = pointer.0 / width * 2.0 - 1.0;
        let ndc_y = 1.0 - pointer.1 / height * 2.0;
        let (origin, direction) = self.ray_through_ndc(ndc_x, ndc_y)?;
        let hit = find_closest_to_ray(samples, &origin, &direction, max_distance_sq)?;

        let (hit_x, hit_y) = self.project_to_ndc(&hit.position)?;
        let screen_distance_px =
            compute_screen_distance_px(hit_x, hit_y, width, height, pointer.0, pointer.1);

        Some(ScreenPick {
            hit,
            screen_distance_px,
        })
    }
}

impl CameraPose for Camera {
    fn position(&self) -> Point3d {
        self.position
    }

    fn set_position(&mut self, position: Point3d) {
        self.position = position;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3d::new(0.0, 0.0, 5.0),
            Point3d::new(0.0, 0.0, 0.0),
            Vector3d::new(0.0, 1.0, 0.0),
            std::f64::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_distance() {
        assert_relative_eq!(Camera::default().distance(), 5.0);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::default();
        let (origin, direction) = camera.ray_through_ndc(0.0, 0.0).unwrap();
        assert_eq!(origin, camera.position);

        let direction = direction.normalize();
        assert_relative_eq!(direction, Vector3d::new(0.0, 0.0, -1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_projection_of_target_is_center() {
        let camera = Camera::default();
        let (x, y) = camera.project_to_ndc(&camera.target).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_behind_camera_does_not_project() {
        let camera = Camera::default();
        assert!(camera.project_to_ndc(&Point3d::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_ray_and_projection_agree() {
        let camera = Camera::default();
        let point = Point3d::new(0.4, -0.3, -1.0);
        let (x, y) = camera.project_to_ndc(&point).unwrap();

        let (origin, direction) = camera.ray_through_ndc(x, y).unwrap();
        let hit = find_closest_to_ray(&[point], &origin, &direction, f64::INFINITY).unwrap();
        assert!(hit.distance_sq < 1e-12);
    }

    #[test]
    fn test_pick_sample_under_pointer() {
        let camera = Camera::default();
        let samples = [
            Point3d::new(1.5, 0.0, 0.0),
            Point3d::new(0.01, 0.0, 0.0),
            Point3d::new(0.0, -1.0, 0.0),
        ];

        let pick = camera
            .pick_sample(&samples, (400.0, 225.0), (800.0, 450.0), 0.01)
            .unwrap();
        assert_eq!(pick.hit.index, 1);
        assert!(pick.screen_distance_px < 2.0);
    }

    #[test]
    fn test_pick_sample_rejects_empty_viewport() {
        let camera = Camera::default();
        let samples = [Point3d::origin()];
        assert!(camera.pick_sample(&samples, (0.0, 0.0), (0.0, 450.0), 1.0).is_none());
    }
}
