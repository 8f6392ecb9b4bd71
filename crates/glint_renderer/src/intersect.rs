//! Analytic ray-sphere intersection.

use glint_math::{Ray, Vec3};

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray
    pub t: f32,
    /// World-space hit position
    pub position: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
}

/// Intersect a ray with a sphere using the geometric method.
///
/// Returns the smallest non-negative root. A ray starting inside the
/// sphere reports the exit point. Grazing rays (`d² == r²`) count as hits.
/// Degenerate inputs (zero or non-finite radius, zero-length direction)
/// never hit.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<Hit> {
    if ray.is_degenerate() || !(radius > 0.0 && radius.is_finite()) {
        return None;
    }

    let radius2 = radius * radius;
    let l = center - ray.origin();
    let tca = l.dot(ray.direction());
    let d2 = l.dot(l) - tca * tca;

    // Also rejects NaN
    if !(d2 <= radius2) {
        return None;
    }

    let thc = (radius2 - d2).sqrt();
    let (mut t0, mut t1) = (tca - thc, tca + thc);
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    // Behind the origin: fall back to the far root
    let t = if t0 < 0.0 { t1 } else { t0 };
    if t < 0.0 {
        return None;
    }

    let position = ray.at(t);
    let normal = (position - center).normalize_or_zero();
    Some(Hit { t, position, normal })
}
