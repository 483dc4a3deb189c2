//! Local spin-rotation frames.
//!
//! Each site's ordered moment is rotated onto the global quantisation axis
//! $\hat{z}$; the rows of that rotation give the transverse frame vector
//! $u = R_{0,:} + i R_{1,:}$ and the local quantisation axis $v = R_{2,:}$,
//! which equals the moment direction. The Hamiltonian assembler contracts
//! all coupling blocks through these vectors.

use num_complex::Complex64;

use crate::types::SpinFrame;

/// Directions closer than this to ±z are treated as exactly (anti)parallel.
const AXIS_EPS: f64 = 1e-12;

/// Rotation matrix (row-major) mapping `dir` onto the global z axis.
///
/// Rodrigues' formula about the axis `dir × z`:
/// $R = c\,\mathbf{I} + s\,\text{skew}(\hat{n}) + (1-c)\,\hat{n}\hat{n}^T$
/// with $c = \hat{d}\cdot\hat{z}$ and $s = |\hat{d}\times\hat{z}|$.
///
/// `dir` must be normalised and non-zero; the model builder guarantees this.
pub fn rotation_to_z(dir: &[f64; 3]) -> [[f64; 3]; 3] {
    let c = dir[2]; // dir · z

    if c > 1.0 - AXIS_EPS {
        // Parallel to z: identity.
        return [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    }
    if c < -1.0 + AXIS_EPS {
        // Antiparallel: 180° about any axis perpendicular to z; pick y.
        return [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]];
    }

    // axis = normalize(dir × z), s = |dir × z|
    let cross = [dir[1], -dir[0], 0.0];
    let s = (cross[0] * cross[0] + cross[1] * cross[1]).sqrt();
    let n = [cross[0] / s, cross[1] / s, 0.0];

    let mut r = [[0.0; 3]; 3];
    for a in 0..3 {
        for b in 0..3 {
            r[a][b] = (1.0 - c) * n[a] * n[b];
            if a == b {
                r[a][b] += c;
            }
        }
    }
    // + s · skew(n)
    r[0][1] -= s * n[2];
    r[0][2] += s * n[1];
    r[1][0] += s * n[2];
    r[1][2] -= s * n[0];
    r[2][0] -= s * n[1];
    r[2][1] += s * n[0];

    r
}

/// Build the spin frame `(u, v)` for a normalised moment direction.
pub fn spin_frame(dir: &[f64; 3]) -> SpinFrame {
    let r = rotation_to_z(dir);

    let u = [
        Complex64::new(r[0][0], r[1][0]),
        Complex64::new(r[0][1], r[1][1]),
        Complex64::new(r[0][2], r[1][2]),
    ];
    let v = r[2];

    SpinFrame { u, v }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalise(v: [f64; 3]) -> [f64; 3] {
        let n = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        [v[0] / n, v[1] / n, v[2] / n]
    }

    fn assert_orthogonal_det_one(r: &[[f64; 3]; 3]) {
        // R Rᵀ = I
        for a in 0..3 {
            for b in 0..3 {
                let dot: f64 = (0..3).map(|k| r[a][k] * r[b][k]).sum();
                let expect = if a == b { 1.0 } else { 0.0 };
                assert!(
                    (dot - expect).abs() < 1e-12,
                    "R Rᵀ deviates at ({a},{b}): {dot}"
                );
            }
        }
        // det(R) = +1
        let det = r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0]);
        assert!((det - 1.0).abs() < 1e-12, "det(R) = {det}");
    }

    #[test]
    fn test_rotation_is_orthogonal_with_unit_determinant() {
        let dirs = [
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [-0.3, 0.7, -0.2],
        ];
        for dir in dirs {
            let d = normalise(dir);
            let r = rotation_to_z(&d);
            assert_orthogonal_det_one(&r);
        }
    }

    #[test]
    fn test_rotation_maps_direction_onto_z() {
        let d = normalise([0.4, -0.5, 0.3]);
        let r = rotation_to_z(&d);
        let mapped = [
            r[0][0] * d[0] + r[0][1] * d[1] + r[0][2] * d[2],
            r[1][0] * d[0] + r[1][1] * d[1] + r[1][2] * d[2],
            r[2][0] * d[0] + r[2][1] * d[1] + r[2][2] * d[2],
        ];
        assert!(mapped[0].abs() < 1e-12);
        assert!(mapped[1].abs() < 1e-12);
        assert!((mapped[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_invariants() {
        for dir in [
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
            [1.0, 0.0, 0.0],
            [0.2, -0.9, 0.5],
        ] {
            let d = normalise(dir);
            let frame = spin_frame(&d);

            // u·u = 0 and u·u* = 2
            let uu: Complex64 = frame.u.iter().map(|c| c * c).sum();
            let uuc: f64 = frame.u.iter().map(|c| c.norm_sqr()).sum();
            assert!(uu.norm() < 1e-12, "u·u = {uu} for dir {d:?}");
            assert!((uuc - 2.0).abs() < 1e-12, "u·u* = {uuc} for dir {d:?}");

            // v is the moment direction itself
            for k in 0..3 {
                assert!((frame.v[k] - d[k]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_ferromagnetic_reference_frame() {
        // Moment along +z must give the textbook frame u = (1, i, 0), v = ẑ.
        let frame = spin_frame(&[0.0, 0.0, 1.0]);
        assert!((frame.u[0] - Complex64::new(1.0, 0.0)).norm() < 1e-15);
        assert!((frame.u[1] - Complex64::new(0.0, 1.0)).norm() < 1e-15);
        assert!(frame.u[2].norm() < 1e-15);
        assert_eq!(frame.v, [0.0, 0.0, 1.0]);
    }
}
