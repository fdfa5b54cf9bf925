use nalgebra::{Point3, Vector3};

/// Euclidean distance between two points in Ångström.
#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Cosine of the angle between the vectors `p2 - p1` and `p4 - p3`.
///
/// Returns 0 when either vector is degenerate.
pub fn cosinus_angle(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> f64 {
    let v1 = p2 - p1;
    let v2 = p4 - p3;
    let x = v1.norm_squared() * v2.norm_squared();
    if x > 0.0 {
        (v1.dot(&v2) / x.sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Bond angle at `b` formed by `a-b-c`, in degrees.
pub fn bond_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let ba = a - b;
    let bc = c - b;
    let denom = ba.norm() * bc.norm();
    if denom <= 0.0 {
        return 0.0;
    }
    (ba.dot(&bc) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Signed dihedral angle of the four points `a-b-c-d` in degrees, in (-180, 180].
///
/// Follows the IUPAC sign convention: looking from `b` towards `c`, a clockwise
/// rotation of `d` relative to `a` is positive.
pub fn dihedral_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let b0 = a - b;
    let b1 = (c - b).normalize();
    let b2 = d - c;

    let v = b0 - b0.dot(&b1) * b1;
    let w = b2 - b2.dot(&b1) * b1;

    let x = v.dot(&w);
    let y = b1.cross(&v).dot(&w);
    y.atan2(x).to_degrees()
}

/// Places a new atom from internal coordinates.
///
/// The new position lies at `bond_length` from `c`, forming `bond_angle_deg`
/// with `b-c`, and the dihedral `a-b-c-new` equals `torsion_deg`.
pub fn position_from_internal(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    bond_length: f64,
    bond_angle_deg: f64,
    torsion_deg: f64,
) -> Point3<f64> {
    let theta = bond_angle_deg.to_radians();
    let chi = torsion_deg.to_radians();

    let local = Vector3::new(
        -bond_length * theta.cos(),
        bond_length * theta.sin() * chi.cos(),
        bond_length * theta.sin() * chi.sin(),
    );

    let bc = (c - b).normalize();
    let n = (b - a).cross(&bc).normalize();
    let m = n.cross(&bc);

    c + bc * local.x + m * local.y + n * local.z
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn distance_between_axis_points() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!(f64_approx_equal(distance(&a, &b), 5.0));
    }

    #[test]
    fn cosinus_angle_of_parallel_vectors_is_one() {
        let o = Point3::origin();
        let x1 = Point3::new(1.0, 0.0, 0.0);
        let x2 = Point3::new(2.0, 0.0, 0.0);
        assert!(f64_approx_equal(cosinus_angle(&o, &x1, &o, &x2), 1.0));
    }

    #[test]
    fn cosinus_angle_of_orthogonal_vectors_is_zero() {
        let o = Point3::origin();
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        assert!(f64_approx_equal(cosinus_angle(&o, &x, &o, &y), 0.0));
    }

    #[test]
    fn cosinus_angle_degenerate_vector_is_zero() {
        let o = Point3::origin();
        let x = Point3::new(1.0, 0.0, 0.0);
        assert!(f64_approx_equal(cosinus_angle(&o, &o, &o, &x), 0.0));
    }

    #[test]
    fn bond_angle_of_right_angle_is_ninety() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::origin();
        let c = Point3::new(0.0, 1.0, 0.0);
        assert!(f64_approx_equal(bond_angle(&a, &b, &c), 90.0));
    }

    #[test]
    fn dihedral_of_planar_cis_points_is_zero() {
        let a = Point3::new(1.0, 1.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        let d = Point3::new(2.0, 1.0, 0.0);
        assert!(dihedral_angle(&a, &b, &c, &d).abs() < 1e-9);
    }

    #[test]
    fn dihedral_of_planar_trans_points_is_180() {
        let a = Point3::new(1.0, 1.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        let d = Point3::new(2.0, -1.0, 0.0);
        assert!(f64_approx_equal(dihedral_angle(&a, &b, &c, &d).abs(), 180.0));
    }

    #[test]
    fn dihedral_sign_follows_right_hand_convention() {
        let a = Point3::origin();
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let d = Point3::new(1.0, 1.0, 1.0);
        assert!(f64_approx_equal(dihedral_angle(&a, &b, &c, &d), 90.0));
    }

    #[test]
    fn placed_atom_reproduces_internal_coordinates() {
        let a = Point3::new(0.3, -1.2, 0.7);
        let b = Point3::new(1.4, 0.1, -0.3);
        let c = Point3::new(2.2, 1.3, 0.4);

        let placed = position_from_internal(&a, &b, &c, 1.52, 111.2, -57.0);

        assert!((distance(&c, &placed) - 1.52).abs() < 1e-9);
        assert!((bond_angle(&b, &c, &placed) - 111.2).abs() < 1e-6);
        assert!((dihedral_angle(&a, &b, &c, &placed) - (-57.0)).abs() < 1e-6);
    }
}
