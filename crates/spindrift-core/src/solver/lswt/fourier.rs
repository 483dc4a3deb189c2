//! Fourier transform of the exchange couplings.
//!
//! For a momentum transfer Q, every coupling contributes to the reciprocal
//! interaction matrices with a phase from its lattice translation `dist`:
//!
//! $$J(\mathbf{Q})_{ij} \mathrel{+}= J\,e^{-i 2\pi\,\mathbf{d}\cdot\mathbf{Q}},
//! \qquad J(\mathbf{Q})_{ji} \mathrel{+}= J^T e^{+i 2\pi\,\mathbf{d}\cdot\mathbf{Q}}$$
//!
//! and likewise without phases for the $\mathbf{Q}\to 0$ limit $J(0)$.
//! Contributions accumulate: several couplings between the same site pair
//! (at different translations) sum into the same block.

use num_complex::Complex64;

use crate::model::Model;
use crate::types::{
    block_add_scaled, block_from_real, block_zero, dot3, real_transpose, Block3, QVec,
};

/// The two N×N arrays of 3×3 blocks, `J(Q)` and `J(0)`, in row-major layout.
pub struct ReciprocalCouplings {
    n: usize,
    j_q: Vec<Block3>,
    j_0: Vec<Block3>,
}

impl ReciprocalCouplings {
    /// Block of `J(Q)` at site pair (i, j).
    pub fn j_q(&self, i: usize, j: usize) -> &Block3 {
        &self.j_q[i * self.n + j]
    }

    /// Block of `J(0)` at site pair (i, j).
    pub fn j_0(&self, i: usize, j: usize) -> &Block3 {
        &self.j_0[i * self.n + j]
    }
}

/// Fourier-transform all couplings of the model at the given Q.
pub fn reciprocal_couplings(model: &Model, q: QVec) -> ReciprocalCouplings {
    let n = model.num_sites();
    let mut j_q = vec![block_zero(); n * n];
    let mut j_0 = vec![block_zero(); n * n];

    let one = Complex64::new(1.0, 0.0);

    for coupling in model.couplings() {
        let (i, j) = (coupling.site_i, coupling.site_j);

        let block = block_from_real(&coupling.matrix);
        let block_t = block_from_real(&real_transpose(&coupling.matrix));

        // phase = exp(-i 2π d·Q); the conjugate bond carries the inverse.
        let arg = -2.0 * std::f64::consts::PI * dot3(&coupling.dist, &q);
        let phase = Complex64::new(0.0, arg).exp();

        block_add_scaled(&mut j_q[i * n + j], &block, phase);
        block_add_scaled(&mut j_q[j * n + i], &block_t, phase.conj());

        block_add_scaled(&mut j_0[i * n + j], &block, one);
        block_add_scaled(&mut j_0[j * n + i], &block_t, one);
    }

    ReciprocalCouplings { n, j_q, j_0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;
    use crate::types::{Coupling, Site};

    fn single_site_chain(j: f64) -> Model {
        let mut builder = ModelBuilder::new();
        builder.add_site(Site::new("A", 1.0, [0.0, 0.0, 1.0]));
        builder.add_coupling(Coupling::heisenberg(
            "J1",
            0,
            0,
            [1.0, 0.0, 0.0],
            j,
            [0.0; 3],
        ));
        builder.finalize().unwrap()
    }

    #[test]
    fn test_self_coupling_gives_cosine_block() {
        // J(Q)[0][0] = J e^{-iφ} + Jᵀ e^{+iφ} = 2 J cos φ for symmetric J.
        let model = single_site_chain(-1.0);
        let q = [0.25, 0.0, 0.0];
        let recip = reciprocal_couplings(&model, q);

        let phi = 2.0 * std::f64::consts::PI * 0.25;
        let expect = -2.0 * phi.cos();
        for d in 0..3 {
            let got = recip.j_q(0, 0)[d][d];
            assert!((got.re - expect).abs() < 1e-12);
            assert!(got.im.abs() < 1e-12);
        }
        // J(0)[0][0] = 2 J
        assert!((recip.j_0(0, 0)[0][0].re + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_conjugate_bond_is_hermitian_transpose() {
        let mut builder = ModelBuilder::new();
        builder.add_site(Site::new("A", 1.0, [0.0, 0.0, 1.0]));
        builder.add_site(Site::new("B", 1.0, [0.0, 0.0, -1.0]));
        // DMI makes the matrix non-symmetric, exercising the transpose.
        builder.add_coupling(Coupling::heisenberg(
            "J1",
            0,
            1,
            [1.0, 0.0, 0.0],
            1.0,
            [0.0, 0.0, 0.3],
        ));
        let model = builder.finalize().unwrap();

        let recip = reciprocal_couplings(&model, [0.13, 0.0, 0.0]);
        // J(Q)[1][0] must equal J(Q)[0][1]† (conjugate transpose).
        for r in 0..3 {
            for c in 0..3 {
                let a = recip.j_q(1, 0)[r][c];
                let b = recip.j_q(0, 1)[c][r].conj();
                assert!((a - b).norm() < 1e-12, "block mismatch at ({r},{c})");
            }
        }
    }

    #[test]
    fn test_multiple_couplings_accumulate() {
        let mut builder = ModelBuilder::new();
        builder.add_site(Site::new("A", 1.0, [0.0, 0.0, 1.0]));
        builder.add_coupling(Coupling::heisenberg(
            "Jx",
            0,
            0,
            [1.0, 0.0, 0.0],
            -1.0,
            [0.0; 3],
        ));
        builder.add_coupling(Coupling::heisenberg(
            "Jy",
            0,
            0,
            [0.0, 1.0, 0.0],
            -0.5,
            [0.0; 3],
        ));
        let model = builder.finalize().unwrap();

        let recip = reciprocal_couplings(&model, [0.0, 0.0, 0.0]);
        // At Q = 0 both couplings contribute 2 J each on the diagonal.
        let expect = 2.0 * (-1.0) + 2.0 * (-0.5);
        assert!((recip.j_q(0, 0)[0][0].re - expect).abs() < 1e-12);
        assert!((recip.j_0(0, 0)[0][0].re - expect).abs() < 1e-12);
    }
}
