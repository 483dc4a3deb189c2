//! Core types shared across the Spindrift framework.
//!
//! This module defines the fundamental data structures used throughout the
//! calculation pipeline: magnetic sites, exchange couplings, rotation frames,
//! and spectrum records.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Momentum transfer in reciprocal lattice units (h, k, l).
pub type QVec = [f64; 3];

/// Stack-allocated 3×3 complex block (zero heap allocation).
///
/// The Fourier-transformed coupling matrices $J(\mathbf{Q})$ are $N \times N$
/// arrays of these blocks; keeping them on the stack avoids per-block heap
/// traffic in the $O(N^2)$ assembly loop.
pub type Block3 = [[Complex64; 3]; 3];

/// Bohr magneton in meV/T, used by the Zeeman term.
pub const MU_B_MEV_PER_T: f64 = 0.057_883_818_06;

/// Free-electron g-factor, the default for magnetic sites.
pub const G_E: f64 = 2.002_319_304_36;

/// A magnetic site (one ordered moment in the magnetic unit cell).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Human-readable identifier, unique within a model.
    pub name: String,
    /// Spin magnitude $S > 0$.
    pub spin: f64,
    /// Ordered-moment direction. Normalised at model finalisation; a zero
    /// vector is rejected there.
    pub direction: [f64; 3],
    /// Landé g-factor entering the Zeeman term.
    pub g_factor: f64,
}

impl Site {
    /// Create a site with the free-electron g-factor.
    pub fn new(name: impl Into<String>, spin: f64, direction: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            spin,
            direction,
            g_factor: G_E,
        }
    }
}

/// The local spin-rotation frame of a site.
///
/// `u` and `v` are the complex transverse vector and real quantisation axis
/// obtained from the rotation aligning the moment with the global z axis:
/// `u·u = 0`, `u·u* = 2`, and `v` equals the (normalised) moment direction.
#[derive(Debug, Clone)]
pub struct SpinFrame {
    /// Transverse frame vector, $u = R_{0,:} + i R_{1,:}$.
    pub u: [Complex64; 3],
    /// Local quantisation axis, $v = R_{2,:}$.
    pub v: [f64; 3],
}

/// An exchange coupling (bond) between two sites.
///
/// The stored matrix describes the bond from `site_i` to the `site_j` image
/// translated by `dist` unit cells. The Hermitian-conjugate bond
/// `(j, i, -dist)` is never stored; the Fourier assembler places its
/// transpose automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupling {
    /// Human-readable identifier.
    pub name: String,
    /// Index of the first site.
    pub site_i: usize,
    /// Index of the second site (may equal `site_i` for a self-coupling
    /// across a lattice translation).
    pub site_j: usize,
    /// Lattice translation locating the coupled neighbour's unit cell,
    /// in reduced lattice units.
    pub dist: [f64; 3],
    /// Real 3×3 interaction matrix: symmetric exchange plus antisymmetric
    /// Dzyaloshinskii-Moriya part. Row-major.
    pub matrix: [[f64; 3]; 3],
}

impl Coupling {
    /// Create a coupling from a full interaction matrix.
    pub fn from_matrix(
        name: impl Into<String>,
        site_i: usize,
        site_j: usize,
        dist: [f64; 3],
        matrix: [[f64; 3]; 3],
    ) -> Self {
        Self {
            name: name.into(),
            site_i,
            site_j,
            dist,
            matrix,
        }
    }

    /// Create a coupling from an isotropic Heisenberg constant `j` and a
    /// DMI vector `dmi`, encoded as
    ///
    /// $$J = j \mathbf{I} + \begin{pmatrix} 0 & D_z & -D_y \\
    /// -D_z & 0 & D_x \\ D_y & -D_x & 0 \end{pmatrix}$$
    ///
    /// Negative `j` is ferromagnetic, positive antiferromagnetic.
    pub fn heisenberg(
        name: impl Into<String>,
        site_i: usize,
        site_j: usize,
        dist: [f64; 3],
        j: f64,
        dmi: [f64; 3],
    ) -> Self {
        let [dx, dy, dz] = dmi;
        let matrix = [
            [j, dz, -dy],
            [-dz, j, dx],
            [dy, -dx, j],
        ];
        Self::from_matrix(name, site_i, site_j, dist, matrix)
    }
}

/// A uniform external magnetic field (Zeeman term).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalField {
    /// Field direction (normalised at model finalisation).
    pub direction: [f64; 3],
    /// Field magnitude in Tesla.
    pub magnitude: f64,
}

/// One magnon branch at a single momentum transfer.
///
/// `energy` is sign-significant: positive branches are magnon creation,
/// negative ones annihilation. `weight` is the bare spectral weight; Bose
/// occupation and form factors are applied by downstream convolution layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyAndWeight {
    /// Magnon energy (meV).
    pub energy: f64,
    /// Spectral weight, ≥ 0.
    pub weight: f64,
}

// ---------------------------------------------------------------------------
// 3×3 block helpers
// ---------------------------------------------------------------------------

/// The zero block.
pub fn block_zero() -> Block3 {
    [[Complex64::new(0.0, 0.0); 3]; 3]
}

/// Promote a real 3×3 matrix to a complex block.
pub fn block_from_real(m: &[[f64; 3]; 3]) -> Block3 {
    let mut out = block_zero();
    for r in 0..3 {
        for c in 0..3 {
            out[r][c] = Complex64::from(m[r][c]);
        }
    }
    out
}

/// Transpose of a real 3×3 matrix.
pub fn real_transpose(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for r in 0..3 {
        for c in 0..3 {
            out[r][c] = m[c][r];
        }
    }
    out
}

/// Accumulate `b` scaled by `s` into `a`.
pub fn block_add_scaled(a: &mut Block3, b: &Block3, s: Complex64) {
    for r in 0..3 {
        for c in 0..3 {
            a[r][c] += b[r][c] * s;
        }
    }
}

/// Bilinear form $l \cdot (M r)$ without conjugation of either vector.
///
/// The Hamiltonian matrix elements contract frame vectors around the
/// Fourier-transformed coupling blocks with this product; conjugation is
/// applied explicitly by the caller where the formalism requires it.
pub fn sandwich(l: &[Complex64; 3], m: &Block3, r: &[Complex64; 3]) -> Complex64 {
    let mut acc = Complex64::new(0.0, 0.0);
    for a in 0..3 {
        for b in 0..3 {
            acc += l[a] * m[a][b] * r[b];
        }
    }
    acc
}

/// Conjugate of a complex 3-vector.
pub fn conj3(v: &[Complex64; 3]) -> [Complex64; 3] {
    [v[0].conj(), v[1].conj(), v[2].conj()]
}

/// Promote a real 3-vector to complex.
pub fn complex3(v: &[f64; 3]) -> [Complex64; 3] {
    [
        Complex64::from(v[0]),
        Complex64::from(v[1]),
        Complex64::from(v[2]),
    ]
}

/// Euclidean dot product of two real 3-vectors.
pub fn dot3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heisenberg_matrix_encodes_dmi_as_skew_part() {
        let c = Coupling::heisenberg("J1", 0, 1, [1.0, 0.0, 0.0], -1.0, [0.2, 0.3, 0.4]);
        // Symmetric part is the isotropic exchange
        for r in 0..3 {
            assert_eq!(c.matrix[r][r], -1.0);
        }
        // Antisymmetric part is the DMI skew matrix
        for r in 0..3 {
            for s in 0..3 {
                if r != s {
                    assert!((c.matrix[r][s] + c.matrix[s][r]).abs() < 1e-15);
                }
            }
        }
        assert_eq!(c.matrix[0][1], 0.4);
        assert_eq!(c.matrix[1][2], 0.2);
        assert_eq!(c.matrix[2][0], 0.3);
    }

    #[test]
    fn test_sandwich_matches_manual_contraction() {
        let m = block_from_real(&[[1.0, 2.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 3.0]]);
        let l = [
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, 0.0),
        ];
        let r = l;
        // l·(M r) = l0*(r0 + 2 r1) + l1*r1 + 3 l2*r2
        let expect = l[0] * (r[0] + r[1] * 2.0) + l[1] * r[1];
        assert!((sandwich(&l, &m, &r) - expect).norm() < 1e-15);
    }
}
