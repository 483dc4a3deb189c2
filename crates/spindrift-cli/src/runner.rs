//! Scan runner: ties together model construction, solver, and backend.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use spindrift_compute::{ScanBackend, SerialBackend};
use spindrift_core::model::{Model, ModelBuilder};
use spindrift_core::scan::{q_path, QPoint};
use spindrift_core::solver::lswt::LswtSolver;
use spindrift_core::solver::SpinWaveSolver;
use spindrift_core::types::{Coupling, ExternalField, Site};

use crate::config::{InteractionConfig, JobConfig};

/// Results from a dispersion run.
pub struct ScanOutput {
    pub points: Vec<QPoint>,
}

/// Translate the TOML model section into a validated [`Model`].
///
/// Couplings reference sites by name; unknown names fail here, before any
/// numerical work starts.
pub fn build_model(job: &JobConfig) -> Result<Model> {
    let mut builder = ModelBuilder::new();

    for site in &job.model.site {
        let mut s = Site::new(&site.name, site.spin, site.direction);
        if let Some(g) = site.g_factor {
            s.g_factor = g;
        }
        builder.add_site(s);
    }

    // Site name -> index, in declaration order
    let names: Vec<&str> = job.model.site.iter().map(|s| s.name.as_str()).collect();
    let resolve = |name: &str, coupling: &str| -> Result<usize> {
        names
            .iter()
            .position(|n| *n == name)
            .with_context(|| format!("coupling '{}' references unknown site '{}'", coupling, name))
    };

    for c in &job.model.coupling {
        let i = resolve(&c.sites[0], &c.name)?;
        let j = resolve(&c.sites[1], &c.name)?;
        let coupling = match &c.interaction {
            InteractionConfig::Matrix { matrix } => {
                Coupling::from_matrix(&c.name, i, j, c.dist, *matrix)
            }
            InteractionConfig::Heisenberg { j: jval, dmi } => {
                Coupling::heisenberg(&c.name, i, j, c.dist, *jval, *dmi)
            }
        };
        builder.add_coupling(coupling);
    }

    if let Some(f) = &job.model.field {
        builder.field(ExternalField {
            direction: f.direction,
            magnitude: f.magnitude,
        });
    }

    builder.finalize().context("model validation failed")
}

/// Run a full dispersion scan from a parsed job configuration.
pub fn run_scan(job: &JobConfig) -> Result<ScanOutput> {
    let model = build_model(job)?;
    println!(
        "Model: {} sites, {} couplings{}",
        model.num_sites(),
        model.couplings().len(),
        if model.field().is_some() {
            ", external field"
        } else {
            ""
        }
    );

    let mut solver = LswtSolver::new();
    solver.eps = job.solver.eps;
    solver.unite_degenerate = job.solver.unite_degenerate;
    println!("Method: {}", solver.method_name());

    let backend = create_backend(&job.scan.backend);

    let path = q_path(job.scan.start, job.scan.end, job.scan.points);
    println!(
        "Scan: ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3}), {} points",
        job.scan.start[0],
        job.scan.start[1],
        job.scan.start[2],
        job.scan.end[0],
        job.scan.end[1],
        job.scan.end[2],
        path.len()
    );

    let points = backend.scan(&solver, &model, &path);

    let failed = points.iter().filter(|p| p.result.is_err()).count();
    if failed > 0 {
        eprintln!("Warning: {} of {} scan points failed", failed, points.len());
        for point in points.iter().filter(|p| p.result.is_err()).take(3) {
            if let Err(e) = &point.result {
                eprintln!("  {}", e);
            }
        }
    }

    Ok(ScanOutput { points })
}

/// Create a scan backend based on the user's preference string.
///
/// - `"serial"` — single-threaded.
/// - `"cpu"` (default) — Rayon thread pool.
fn create_backend(preference: &str) -> Arc<dyn ScanBackend> {
    match preference {
        "serial" => {
            let backend = SerialBackend::new();
            println!("Backend: {}", backend.device_info().name);
            Arc::new(backend)
        }
        _ => {
            // "cpu" or any unrecognised value
            #[cfg(feature = "cpu")]
            {
                let backend = spindrift_compute::CpuBackend::new();
                println!("Backend: {}", backend.device_info().name);
                return Arc::new(backend);
            }
            #[cfg(not(feature = "cpu"))]
            {
                let backend = SerialBackend::new();
                println!("Backend: {} (built without cpu feature)", backend.device_info().name);
                Arc::new(backend)
            }
        }
    }
}

/// Write the dispersion to a CSV file with a metadata header.
///
/// One row per branch per Q point; failed points are recorded as comment
/// lines so the Q grid stays reconstructible.
pub fn write_dispersion_csv(points: &[QPoint], path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# Spindrift — Magnon Dispersion")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    for site in &job.model.site {
        writeln!(
            file,
            "# site '{}': S={}, direction=({}, {}, {})",
            site.name, site.spin, site.direction[0], site.direction[1], site.direction[2]
        )?;
    }
    writeln!(file, "#")?;
    writeln!(file, "h,k,l,energy_meV,weight")?;

    for point in points {
        match &point.result {
            Ok(branches) => {
                for b in branches {
                    writeln!(
                        file,
                        "{:.6},{:.6},{:.6},{:.8e},{:.8e}",
                        point.q[0], point.q[1], point.q[2], b.energy, b.weight
                    )?;
                }
            }
            Err(e) => {
                writeln!(
                    file,
                    "# failed at ({:.6}, {:.6}, {:.6}): {}",
                    point.q[0], point.q[1], point.q[2], e
                )?;
            }
        }
    }

    println!("Dispersion written to: {}", path.display());
    Ok(())
}

#[derive(Serialize)]
struct JsonPoint<'a> {
    q: [f64; 3],
    branches: Option<&'a [spindrift_core::types::EnergyAndWeight]>,
    error: Option<String>,
}

/// Write the dispersion to a JSON file.
pub fn write_dispersion_json(points: &[QPoint], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let records: Vec<JsonPoint> = points
        .iter()
        .map(|p| match &p.result {
            Ok(branches) => JsonPoint {
                q: p.q,
                branches: Some(branches),
                error: None,
            },
            Err(e) => JsonPoint {
                q: p.q,
                branches: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Dispersion (JSON) written to: {}", path.display());
    Ok(())
}
