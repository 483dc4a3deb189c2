//! Bosonic Hamiltonian assembly.
//!
//! Builds the $2N \times 2N$ complex Hamiltonian of linear spin-wave theory
//! from the per-site rotation frames and the Fourier-transformed couplings,
//! with block structure
//!
//! $$H = \begin{pmatrix} H^{00} & H^{0N} \\ (H^{0N})^\dagger & H^{NN} \end{pmatrix}$$
//!
//! where each block contracts the coupling blocks through the frame vectors
//! `u`, `v`. The diagonal self-energy correction accumulates over *all*
//! couplings touching a site, which is what makes multi-coupling models
//! (several translations between the same pair) come out right. The lower-left
//! block is the Hermitian conjugate of the upper-right one, so $H = H^\dagger$
//! holds by construction.

use ndarray::Array2;
use num_complex::Complex64;

use crate::model::Model;
use crate::types::{complex3, conj3, dot3, sandwich, QVec, MU_B_MEV_PER_T};

use super::fourier::reciprocal_couplings;

/// Assemble the full $2N \times 2N$ Hamiltonian at the given momentum transfer.
pub fn assemble_hamiltonian(model: &Model, q: QVec) -> Array2<Complex64> {
    let n = model.num_sites();
    let recip = reciprocal_couplings(model, q);

    let mut h = Array2::<Complex64>::zeros((2 * n, 2 * n));

    for i in 0..n {
        let site_i = &model.sites()[i];
        let frame_i = &model.frames()[i];
        let u_i = frame_i.u;
        let uc_i = conj3(&u_i);
        let v_i = complex3(&frame_i.v);

        for j in 0..n {
            let site_j = &model.sites()[j];
            let frame_j = &model.frames()[j];
            let u_j = frame_j.u;
            let uc_j = conj3(&u_j);
            let v_j = complex3(&frame_j.v);

            let s_ij = Complex64::from(0.5 * (site_i.spin * site_j.spin).sqrt());

            let j_q = recip.j_q(i, j);
            h[[i, j]] += s_ij * sandwich(&u_i, j_q, &uc_j);
            h[[n + i, n + j]] += s_ij * sandwich(&uc_i, j_q, &u_j);
            h[[i, n + j]] += s_ij * sandwich(&u_i, j_q, &u_j);

            // Diagonal self-energy correction, summed over all j partners.
            let j_0 = recip.j_0(i, j);
            let corr = Complex64::from(site_j.spin) * sandwich(&v_i, j_0, &v_j);
            h[[i, i]] -= corr;
            h[[n + i, n + i]] -= corr;
        }

        // Zeeman term: H_ii -= µ_B (B · g_i v_i) with B = -dir·mag.
        if let Some(field) = model.field() {
            let b_dot_v = -field.magnitude * dot3(&field.direction, &frame_i.v);
            let zeeman = Complex64::from(MU_B_MEV_PER_T * site_i.g_factor * b_dot_v);
            h[[i, i]] -= zeeman;
            h[[n + i, n + i]] -= zeeman.conj();
        }
    }

    // Lower-left block: Hermitian conjugate of the upper-right block.
    for i in 0..n {
        for j in 0..n {
            h[[n + i, j]] = h[[j, n + i]].conj();
        }
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;
    use crate::types::{Coupling, ExternalField, Site};

    fn hermiticity_deviation(h: &Array2<Complex64>) -> f64 {
        let dim = h.nrows();
        let mut max = 0.0_f64;
        for r in 0..dim {
            for c in 0..dim {
                max = max.max((h[[r, c]] - h[[c, r]].conj()).norm());
            }
        }
        max
    }

    #[test]
    fn test_hamiltonian_is_hermitian_for_dmi_model() {
        let mut builder = ModelBuilder::new();
        builder.add_site(Site::new("A", 1.0, [0.0, 0.0, 1.0]));
        builder.add_site(Site::new("B", 1.5, [0.0, 0.0, -1.0]));
        builder.add_site(Site::new("C", 0.5, [1.0, 0.0, 0.0]));
        builder.add_coupling(Coupling::heisenberg(
            "J1",
            0,
            1,
            [1.0, 0.0, 0.0],
            1.0,
            [0.1, -0.2, 0.3],
        ));
        builder.add_coupling(Coupling::heisenberg(
            "J2",
            1,
            2,
            [0.0, 1.0, 0.0],
            -0.7,
            [0.0, 0.0, 0.2],
        ));
        builder.add_coupling(Coupling::heisenberg(
            "J3",
            2,
            2,
            [0.0, 0.0, 1.0],
            -0.4,
            [0.0; 3],
        ));
        let model = builder.finalize().unwrap();

        for q in [
            [0.0, 0.0, 0.0],
            [0.1, 0.2, 0.3],
            [-0.35, 0.0, 0.6],
            [0.5, 0.5, 0.5],
        ] {
            let h = assemble_hamiltonian(&model, q);
            let dev = hermiticity_deviation(&h);
            assert!(dev < 1e-9, "H not Hermitian at Q {q:?}: deviation {dev:.2e}");
        }
    }

    #[test]
    fn test_ferromagnetic_chain_diagonal() {
        // Single site, J = -1 along (1,0,0): H = (2 - 2 cos 2πh) · I₂.
        let mut builder = ModelBuilder::new();
        builder.add_site(Site::new("A", 1.0, [0.0, 0.0, 1.0]));
        builder.add_coupling(Coupling::heisenberg(
            "J1",
            0,
            0,
            [1.0, 0.0, 0.0],
            -1.0,
            [0.0; 3],
        ));
        let model = builder.finalize().unwrap();

        let h = assemble_hamiltonian(&model, [0.25, 0.0, 0.0]);
        let expect = 2.0; // 2 - 2 cos(π/2)
        assert!((h[[0, 0]].re - expect).abs() < 1e-12);
        assert!((h[[1, 1]].re - expect).abs() < 1e-12);
        assert!(h[[0, 1]].norm() < 1e-12);
        assert!(h[[1, 0]].norm() < 1e-12);
    }

    #[test]
    fn test_zeeman_term_shifts_diagonal() {
        let mut builder = ModelBuilder::new();
        builder.add_site(Site::new("A", 1.0, [0.0, 0.0, 1.0]));
        builder.add_coupling(Coupling::heisenberg(
            "J1",
            0,
            0,
            [1.0, 0.0, 0.0],
            -1.0,
            [0.0; 3],
        ));
        builder.field(ExternalField {
            direction: [0.0, 0.0, 1.0],
            magnitude: 2.0,
        });
        let model = builder.finalize().unwrap();

        let h0 = {
            let mut b = ModelBuilder::new();
            b.add_site(Site::new("A", 1.0, [0.0, 0.0, 1.0]));
            b.add_coupling(Coupling::heisenberg(
                "J1",
                0,
                0,
                [1.0, 0.0, 0.0],
                -1.0,
                [0.0; 3],
            ));
            assemble_hamiltonian(&b.finalize().unwrap(), [0.1, 0.0, 0.0])
        };
        let h = assemble_hamiltonian(&model, [0.1, 0.0, 0.0]);

        // Field along the moment adds g µ_B B to each diagonal element.
        let gap = crate::types::G_E * MU_B_MEV_PER_T * 2.0;
        assert!((h[[0, 0]].re - h0[[0, 0]].re - gap).abs() < 1e-12);
        assert!((h[[1, 1]].re - h0[[1, 1]].re - gap).abs() < 1e-12);
    }
}
