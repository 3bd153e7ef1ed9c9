use iris_explorer::config::ViewAngle;

// ---------------------------------------------------------------------------
// Orthographic camera for the 3D charts
// ---------------------------------------------------------------------------

/// A point after projection: screen coordinates and distance towards the
/// viewer (larger is closer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub u: f64,
    pub v: f64,
    pub depth: f64,
}

impl Projected {
    pub fn xy(self) -> [f64; 2] {
        [self.u, self.v]
    }
}

/// Looks at the origin from elevation `elev` above the x-y plane and
/// azimuth `azim` around the z axis (degrees, measured from +x).
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    sin_elev: f64,
    cos_elev: f64,
    sin_azim: f64,
    cos_azim: f64,
}

impl Camera {
    pub fn new(view: ViewAngle) -> Self {
        let (sin_elev, cos_elev) = view.elev.to_radians().sin_cos();
        let (sin_azim, cos_azim) = view.azim.to_radians().sin_cos();
        Camera {
            sin_elev,
            cos_elev,
            sin_azim,
            cos_azim,
        }
    }

    pub fn project(&self, [x, y, z]: [f64; 3]) -> Projected {
        let horizontal = x * self.cos_azim + y * self.sin_azim;
        Projected {
            u: -x * self.sin_azim + y * self.cos_azim,
            v: -horizontal * self.sin_elev + z * self.cos_elev,
            depth: horizontal * self.cos_elev + z * self.sin_elev,
        }
    }
}

// ---------------------------------------------------------------------------
// Data bounds → unit cube
// ---------------------------------------------------------------------------

/// Axis-aligned data box mapped onto the cube `[-0.5, 0.5]³`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds3 {
    /// Tight bounds of the finite points; `None` when there are none.
    pub fn from_points(points: &[[f64; 3]]) -> Option<Self> {
        let mut finite = points.iter().filter(|p| p.iter().all(|c| c.is_finite()));
        let first = *finite.next()?;
        let (mut min, mut max) = (first, first);
        for p in finite {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some(Bounds3 { min, max })
    }

    pub fn normalize(&self, p: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for axis in 0..3 {
            let span = self.max[axis] - self.min[axis];
            out[axis] = if span > 0.0 {
                (p[axis] - self.min[axis]) / span - 0.5
            } else {
                0.0
            };
        }
        out
    }
}

/// The four side faces and the top face of an upright box, each as four
/// corners in drawing order.
pub fn box_faces(x: (f64, f64), y: (f64, f64), z: (f64, f64)) -> [[[f64; 3]; 4]; 5] {
    let (x0, x1) = x;
    let (y0, y1) = y;
    let (z0, z1) = z;
    [
        [[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]],
        [[x1, y0, z0], [x1, y1, z0], [x1, y1, z1], [x1, y0, z1]],
        [[x1, y1, z0], [x0, y1, z0], [x0, y1, z1], [x1, y1, z1]],
        [[x0, y1, z0], [x0, y0, z0], [x0, y0, z1], [x0, y1, z1]],
        [[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn side_view_maps_y_and_z_to_screen() {
        let cam = Camera::new(ViewAngle { elev: 0.0, azim: 0.0 });
        let p = cam.project([3.0, 1.0, 2.0]);
        assert!(close(p.u, 1.0));
        assert!(close(p.v, 2.0));
        assert!(close(p.depth, 3.0));
    }

    #[test]
    fn top_view_hides_height() {
        let cam = Camera::new(ViewAngle { elev: 90.0, azim: 0.0 });
        let low = cam.project([0.2, 0.3, 0.0]);
        let high = cam.project([0.2, 0.3, 1.0]);
        assert!(close(low.u, high.u));
        assert!(close(low.v, high.v));
        assert!(high.depth > low.depth);
    }

    #[test]
    fn normalize_spans_unit_cube() {
        let b = Bounds3::from_points(&[[0.0, 4.0, 1.0], [7.0, 8.0, 1.0], [f64::NAN, 0.0, 0.0]]).unwrap();
        assert_eq!(b.normalize([0.0, 4.0, 1.0]), [-0.5, -0.5, 0.0]);
        assert_eq!(b.normalize([7.0, 8.0, 1.0]), [0.5, 0.5, 0.0]);
        assert!(Bounds3::from_points(&[]).is_none());
    }

    #[test]
    fn box_has_four_sides_and_a_top() {
        let faces = box_faces((0.0, 1.0), (0.0, 1.0), (0.0, 2.0));
        let top = faces[4];
        assert!(top.iter().all(|c| c[2] == 2.0));
        for side in &faces[..4] {
            assert_eq!(side.iter().filter(|c| c[2] == 0.0).count(), 2);
        }
    }
}
