// Transform utilities for Mat4
//
// Scene-graph composition (scale, XYZ Euler rotation, translation) and the
// checks the sphere primitive needs on a finalized world transform.
// Note: glam::Mat4 already provides transform_point3(), transform_vector3()
// and inverse()

use glam::{Mat3, Mat4, Vec3};

/// Relative tolerance used when deciding whether a linear part is a
/// similarity (rotation times uniform scale).
const SIMILARITY_EPSILON: f32 = 1e-4;

/// Build a rotation from XYZ Euler angles in radians.
///
/// Points are rotated about X first, then Y, then Z.
pub fn rotation_xyz(angles: Vec3) -> Mat4 {
    Mat4::from_rotation_z(angles.z)
        * Mat4::from_rotation_y(angles.y)
        * Mat4::from_rotation_x(angles.x)
}

/// Compose a local transform from scale, XYZ Euler rotation (radians) and
/// translation.
///
/// Order: Scale -> Rotate -> Translate, i.e. `T * R * S` applied to points.
pub fn compose_srt(scale: Vec3, rotate: Vec3, translate: Vec3) -> Mat4 {
    Mat4::from_translation(translate) * rotation_xyz(rotate) * Mat4::from_scale(scale)
}

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// The translation component (fourth column).
    fn translation(&self) -> Vec3;

    /// Inverse-transpose of the upper 3x3, used to carry surface normals.
    ///
    /// Returns `None` when the linear part is singular.
    fn normal_matrix(&self) -> Option<Mat3>;

    /// The uniform scale factor if the linear part is a rotation times a
    /// uniform scale, `None` for non-uniform scale or shear.
    fn uniform_scale(&self) -> Option<f32>;
}

impl Mat4Ext for Mat4 {
    fn translation(&self) -> Vec3 {
        self.w_axis.truncate()
    }

    fn normal_matrix(&self) -> Option<Mat3> {
        let linear = Mat3::from_mat4(*self);
        let det = linear.determinant();
        if det.abs() <= f32::EPSILON || !det.is_finite() {
            return None;
        }
        Some(linear.inverse().transpose())
    }

    fn uniform_scale(&self) -> Option<f32> {
        let x = self.x_axis.truncate();
        let y = self.y_axis.truncate();
        let z = self.z_axis.truncate();

        let sx = x.length_squared();
        let sy = y.length_squared();
        let sz = z.length_squared();
        let tolerance = SIMILARITY_EPSILON * sx.max(sy).max(sz);

        // Equal axis lengths
        if (sx - sy).abs() > tolerance || (sx - sz).abs() > tolerance {
            return None;
        }
        // Mutually orthogonal axes (a parent's non-uniform scale under a
        // child's rotation shows up as shear)
        if x.dot(y).abs() > tolerance || x.dot(z).abs() > tolerance || y.dot(z).abs() > tolerance {
            return None;
        }

        Some(sx.sqrt())
    }
}
