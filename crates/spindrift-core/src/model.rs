//! Model construction and validation.
//!
//! A [`Model`] is the frozen input to every solve: the ordered list of
//! magnetic sites (with their precomputed rotation frames), the exchange
//! couplings between them, and an optional external field. Models are built
//! through [`ModelBuilder`], which validates everything up front so that the
//! solver can assume a consistent model and never fail on structural errors.

use thiserror::Error;

use crate::solver::lswt::frame::spin_frame;
use crate::types::{Coupling, ExternalField, Site, SpinFrame};

/// Structural errors detected at model-construction time.
///
/// These are fatal: a model that fails to finalise is not usable, in
/// contrast to the per-Q numerical failures in
/// [`SolverError`](crate::solver::SolverError).
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("site '{name}' has a zero-length moment direction")]
    InvalidSiteDirection { name: String },

    #[error("site '{name}' has non-positive spin magnitude {spin}")]
    InvalidSpinMagnitude { name: String, spin: f64 },

    #[error("coupling '{name}' references site index {index}, but the model has {count} sites")]
    CouplingSiteOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },

    #[error("external field has a zero-length direction")]
    InvalidFieldDirection,

    #[error("model contains no magnetic sites")]
    EmptyModel,
}

/// A finalised magnetic model. Immutable; all solving borrows it.
#[derive(Debug, Clone)]
pub struct Model {
    sites: Vec<Site>,
    frames: Vec<SpinFrame>,
    couplings: Vec<Coupling>,
    field: Option<ExternalField>,
}

impl Model {
    /// Number of magnetic sites N.
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// The magnetic sites, in index order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Per-site rotation frames, index-aligned with [`Model::sites`].
    pub fn frames(&self) -> &[SpinFrame] {
        &self.frames
    }

    /// The exchange couplings.
    pub fn couplings(&self) -> &[Coupling] {
        &self.couplings
    }

    /// The external field, if any.
    pub fn field(&self) -> Option<&ExternalField> {
        self.field.as_ref()
    }

    /// Look up a site index by name.
    pub fn site_index(&self, name: &str) -> Option<usize> {
        self.sites.iter().position(|s| s.name == name)
    }
}

/// Builder for [`Model`]. Used once, before any solve call.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    sites: Vec<Site>,
    couplings: Vec<Coupling>,
    field: Option<ExternalField>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a magnetic site; returns its index.
    pub fn add_site(&mut self, site: Site) -> usize {
        self.sites.push(site);
        self.sites.len() - 1
    }

    /// Add an exchange coupling.
    pub fn add_coupling(&mut self, coupling: Coupling) -> &mut Self {
        self.couplings.push(coupling);
        self
    }

    /// Set the external field.
    pub fn field(&mut self, field: ExternalField) -> &mut Self {
        self.field = Some(field);
        self
    }

    /// Validate everything and freeze the model.
    ///
    /// Checks site spins and moment directions, coupling index ranges, and
    /// the field direction; normalises all direction vectors and precomputes
    /// the per-site rotation frames.
    pub fn finalize(self) -> Result<Model, ModelError> {
        if self.sites.is_empty() {
            return Err(ModelError::EmptyModel);
        }

        let mut sites = self.sites;
        let mut frames = Vec::with_capacity(sites.len());
        for site in &mut sites {
            if site.spin <= 0.0 {
                return Err(ModelError::InvalidSpinMagnitude {
                    name: site.name.clone(),
                    spin: site.spin,
                });
            }
            let norm = crate::types::dot3(&site.direction, &site.direction).sqrt();
            if norm < 1e-12 {
                return Err(ModelError::InvalidSiteDirection {
                    name: site.name.clone(),
                });
            }
            for c in &mut site.direction {
                *c /= norm;
            }
            frames.push(spin_frame(&site.direction));
        }

        let count = sites.len();
        for coupling in &self.couplings {
            for index in [coupling.site_i, coupling.site_j] {
                if index >= count {
                    return Err(ModelError::CouplingSiteOutOfRange {
                        name: coupling.name.clone(),
                        index,
                        count,
                    });
                }
            }
        }

        let field = match self.field {
            Some(mut f) => {
                let norm = crate::types::dot3(&f.direction, &f.direction).sqrt();
                if norm < 1e-12 {
                    return Err(ModelError::InvalidFieldDirection);
                }
                for c in &mut f.direction {
                    *c /= norm;
                }
                Some(f)
            }
            None => None,
        };

        Ok(Model {
            sites,
            frames,
            couplings: self.couplings,
            field,
        })
    }
}
