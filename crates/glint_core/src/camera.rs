//! Camera and primary ray generation.
//!
//! The camera keeps its image-plane basis in sync with its inputs: every
//! setter validates the new configuration and recomputes the basis, so the
//! basis is never stale and never edited on its own.

use glint_math::{Ray, Vec3};
use thiserror::Error;

/// Errors for camera configurations that cannot produce rays.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Camera resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("Vertical field of view must be within (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("Camera target coincides with its position")]
    TargetAtPosition,

    #[error("Camera up vector is parallel to the view direction")]
    UpParallelToView,
}

/// Near-plane basis in world space.
///
/// A point on the image plane is `origin + right_span * ndc_x + up_span * ndc_y`
/// with `ndc_x, ndc_y` in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlane {
    /// Center of the image plane
    pub origin: Vec3,
    /// Half-width vector along the camera's right direction
    pub right_span: Vec3,
    /// Half-height vector along the camera's true up direction
    pub up_span: Vec3,
}

/// Pinhole camera.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov_y: f32, // Vertical field of view in degrees
    width: u32,
    height: u32,
    plane: ImagePlane,
}

impl Default for Camera {
    fn default() -> Self {
        let position = Vec3::ZERO;
        let target = Vec3::new(0.0, 0.0, -1.0);
        let up = Vec3::Y;
        let fov_y = 45.0;
        let (width, height) = (512, 512);

        Self {
            position,
            target,
            up,
            fov_y,
            width,
            height,
            plane: image_plane(position, target, up, fov_y, width, height),
        }
    }
}

impl Camera {
    /// Create a camera. `fov_y` is the vertical field of view in degrees.
    pub fn new(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y: f32,
        width: u32,
        height: u32,
    ) -> Result<Self, CameraError> {
        validate(position, target, up, fov_y, width, height)?;
        Ok(Self {
            position,
            target,
            up,
            fov_y,
            width,
            height,
            plane: image_plane(position, target, up, fov_y, width, height),
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Vertical field of view in degrees.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of primary rays, one per pixel.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// The derived image-plane basis.
    pub fn image_plane(&self) -> &ImagePlane {
        &self.plane
    }

    /// Move the camera. On error the camera is left unchanged.
    pub fn set_view(&mut self, position: Vec3, target: Vec3, up: Vec3) -> Result<(), CameraError> {
        self.reconfigure(position, target, up, self.fov_y, self.width, self.height)
    }

    /// Change the vertical field of view (degrees).
    pub fn set_fov(&mut self, fov_y: f32) -> Result<(), CameraError> {
        self.reconfigure(self.position, self.target, self.up, fov_y, self.width, self.height)
    }

    /// Change the image resolution.
    pub fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        self.reconfigure(self.position, self.target, self.up, self.fov_y, width, height)
    }

    fn reconfigure(
        &mut self,
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y: f32,
        width: u32,
        height: u32,
    ) -> Result<(), CameraError> {
        *self = Self::new(position, target, up, fov_y, width, height)?;
        Ok(())
    }

    /// Ray through a continuous image position.
    ///
    /// `x` runs right over [0, width] and `y` runs down over [0, height];
    /// the centre of pixel (i, j) is (i + 0.5, j + 0.5).
    pub fn unproject(&self, x: f32, y: f32) -> Ray {
        let ndc_x = (x / self.width as f32) * 2.0 - 1.0;
        let ndc_y = ((self.height as f32 - y) / self.height as f32) * 2.0 - 1.0;

        let plane = &self.plane;
        let on_plane = plane.origin + plane.right_span * ndc_x + plane.up_span * ndc_y;
        Ray::new(self.position, on_plane - self.position)
    }

    /// Ray through the centre of pixel (x, y). Row 0 is the top scanline.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        self.unproject(x as f32 + 0.5, y as f32 + 0.5)
    }

    /// Lazy row-major sequence of one primary ray per pixel.
    ///
    /// Calling this again restarts the sequence.
    pub fn rays(&self) -> PrimaryRays<'_> {
        PrimaryRays {
            camera: self,
            next: 0,
            end: self.pixel_count(),
        }
    }
}

/// A primary ray together with the pixel it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryRay {
    pub x: u32,
    pub y: u32,
    pub ray: Ray,
}

/// Iterator over a camera's primary rays.
#[derive(Debug, Clone)]
pub struct PrimaryRays<'a> {
    camera: &'a Camera,
    next: usize,
    end: usize,
}

impl Iterator for PrimaryRays<'_> {
    type Item = PrimaryRay;

    fn next(&mut self) -> Option<PrimaryRay> {
        if self.next >= self.end {
            return None;
        }

        let width = self.camera.width as usize;
        let x = (self.next % width) as u32;
        let y = (self.next / width) as u32;
        self.next += 1;

        Some(PrimaryRay {
            x,
            y,
            ray: self.camera.ray_for_pixel(x, y),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PrimaryRays<'_> {}

fn validate(
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov_y: f32,
    width: u32,
    height: u32,
) -> Result<(), CameraError> {
    if width == 0 || height == 0 {
        return Err(CameraError::ZeroResolution { width, height });
    }
    if !(fov_y > 0.0 && fov_y < 180.0) {
        return Err(CameraError::InvalidFov(fov_y));
    }

    let view = target - position;
    if view.length_squared() <= f32::EPSILON || !view.is_finite() {
        return Err(CameraError::TargetAtPosition);
    }
    if view.normalize().cross(up).length_squared() <= f32::EPSILON {
        return Err(CameraError::UpParallelToView);
    }
    Ok(())
}

/// Compute the image-plane basis for a validated configuration.
///
/// The plane sits at the target distance along the view direction, so the
/// target projects to the image centre.
fn image_plane(
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov_y: f32,
    width: u32,
    height: u32,
) -> ImagePlane {
    let view = target - position;
    let distance = view.length();

    let forward = view / distance;
    let right = forward.cross(up).normalize();
    let true_up = right.cross(forward);

    let span_y = distance * (fov_y.to_radians() * 0.5).tan();
    let span_x = span_y * width as f32 / height as f32;

    ImagePlane {
        origin: position + forward * distance,
        right_span: right * span_x,
        up_span: true_up * span_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera(width: u32, height: u32) -> Camera {
        Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), Vec3::Y, 90.0, width, height).unwrap()
    }

    #[test]
    fn test_image_plane_basis() {
        let camera = test_camera(4, 2);
        let plane = camera.image_plane();

        assert!((plane.origin - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        // Right-handed: looking down +Z with +Y up, right is -X
        assert!((plane.up_span - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-4);
        assert!((plane.right_span - Vec3::new(-20.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_basis_follows_view_not_world_axes() {
        let target = Vec3::new(5.0, 0.0, 0.0);
        let camera = Camera::new(Vec3::ZERO, target, Vec3::Y, 60.0, 8, 8).unwrap();
        let plane = camera.image_plane();

        assert!(plane.right_span.normalize().dot(camera.forward()).abs() < 1e-5);
        assert!(plane.up_span.normalize().dot(camera.forward()).abs() < 1e-5);
        assert!((plane.right_span.normalize() - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_center_ray_points_forward() {
        for (position, target) in [
            (Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)),
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 7.0)),
            (Vec3::new(0.0, 5.0, -5.0), Vec3::ZERO),
        ] {
            let camera = Camera::new(position, target, Vec3::Y, 50.0, 640, 480).unwrap();
            let ray = camera.unproject(320.0, 240.0);

            assert_eq!(ray.origin(), position);
            assert!((ray.direction() - camera.forward()).length() < 1e-5);
        }
    }

    #[test]
    fn test_two_by_two_rays_diverge() {
        let camera = test_camera(2, 2);
        let rays: Vec<PrimaryRay> = camera.rays().collect();
        assert_eq!(rays.len(), 4);

        for primary in &rays {
            assert!((primary.ray.direction().length() - 1.0).abs() < 1e-5);
            assert!(primary.ray.direction().z > 0.0);
        }
        for i in 0..rays.len() {
            for j in (i + 1)..rays.len() {
                let a = rays[i].ray.direction();
                let b = rays[j].ray.direction();
                assert!((a - b).length() > 1e-3, "rays {i} and {j} coincide");
            }
        }

        // Pixel (0, 0) is the top-left corner: up and to the camera's left
        let top_left = rays[0].ray.direction();
        let expected = Vec3::new(5.0, 5.0, 10.0).normalize();
        assert!((top_left - expected).length() < 1e-5);
    }

    #[test]
    fn test_rays_are_row_major_and_restartable() {
        let camera = test_camera(3, 2);
        let coords: Vec<(u32, u32)> = camera.rays().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);

        let mut rays = camera.rays();
        assert_eq!(rays.len(), 6);
        rays.next();
        assert_eq!(rays.len(), 5);
        assert_eq!(camera.rays().next().map(|p| (p.x, p.y)), Some((0, 0)));
    }

    #[test]
    fn test_row_zero_looks_up() {
        let camera = test_camera(1, 3);
        let top = camera.ray_for_pixel(0, 0);
        let bottom = camera.ray_for_pixel(0, 2);
        assert!(top.direction().y > 0.0);
        assert!(bottom.direction().y < 0.0);
    }

    #[test]
    fn test_setters_recompute_basis() {
        let mut camera = test_camera(2, 2);
        camera.set_resolution(4, 2).unwrap();
        assert!((camera.image_plane().right_span.length() - 20.0).abs() < 1e-3);

        camera.set_fov(60.0).unwrap();
        let expected = 10.0 * 30.0_f32.to_radians().tan();
        assert!((camera.image_plane().up_span.length() - expected).abs() < 1e-3);

        camera.set_view(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0), Vec3::Y).unwrap();
        assert!((camera.image_plane().origin - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_invalid_configurations() {
        assert_eq!(
            Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 45.0, 0, 10).unwrap_err(),
            CameraError::ZeroResolution { width: 0, height: 10 }
        );
        assert_eq!(
            Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 180.0, 10, 10).unwrap_err(),
            CameraError::InvalidFov(180.0)
        );
        assert_eq!(
            Camera::new(Vec3::ONE, Vec3::ONE, Vec3::Y, 45.0, 10, 10).unwrap_err(),
            CameraError::TargetAtPosition
        );
        assert_eq!(
            Camera::new(Vec3::ZERO, Vec3::Y, Vec3::Y, 45.0, 10, 10).unwrap_err(),
            CameraError::UpParallelToView
        );
    }

    #[test]
    fn test_failed_setter_keeps_camera() {
        let mut camera = test_camera(2, 2);
        let before = *camera.image_plane();
        assert!(camera.set_resolution(0, 2).is_err());
        assert_eq!(camera.width(), 2);
        assert_eq!(*camera.image_plane(), before);
    }
}
