//! TOML configuration deserialisation for dispersion jobs.

use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub model: ModelConfig,
    pub scan: ScanConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Magnetic model from TOML.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    pub site: Vec<SiteConfig>,
    #[serde(default)]
    pub coupling: Vec<CouplingConfig>,
    pub field: Option<FieldConfig>,
}

/// A single magnetic site.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub spin: f64,
    /// Ordered-moment direction (need not be normalised).
    pub direction: [f64; 3],
    /// Landé g-factor. Defaults to the free-electron value.
    pub g_factor: Option<f64>,
}

/// A single exchange coupling, referencing sites by name.
#[derive(Debug, Deserialize)]
pub struct CouplingConfig {
    pub name: String,
    /// The two coupled site names, `[from, to]`.
    pub sites: [String; 2],
    /// Lattice translation locating the neighbour's unit cell.
    pub dist: [f64; 3],
    /// Interaction specification (Heisenberg scalar or full matrix).
    #[serde(flatten)]
    pub interaction: InteractionConfig,
}

/// Interaction specification: either a Heisenberg constant with an optional
/// DMI vector, or a full 3x3 matrix.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InteractionConfig {
    Matrix { matrix: [[f64; 3]; 3] },
    Heisenberg {
        j: f64,
        #[serde(default)]
        dmi: [f64; 3],
    },
}

/// External field (Zeeman term).
#[derive(Debug, Deserialize)]
pub struct FieldConfig {
    pub direction: [f64; 3],
    /// Field magnitude in Tesla.
    pub magnitude: f64,
}

/// Scan parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct ScanConfig {
    /// Path start in reciprocal lattice units (h, k, l).
    pub start: [f64; 3],
    /// Path end (inclusive).
    pub end: [f64; 3],
    #[serde(default = "default_points")]
    pub points: usize,
    /// Compute backend: "cpu" or "serial". Default: "cpu".
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_points() -> usize {
    128
}
fn default_backend() -> String {
    "cpu".into()
}

/// Solver parameters.
#[derive(Debug, Deserialize)]
pub struct SolverConfig {
    /// Tolerance for degeneracy detection and spectrum cleanup.
    #[serde(default = "default_eps")]
    pub eps: f64,
    /// Merge degenerate branches, summing their weights (default: false).
    #[serde(default)]
    pub unite_degenerate: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            eps: default_eps(),
            unite_degenerate: false,
        }
    }
}

fn default_eps() -> f64 {
    1e-6
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the dispersion as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also save the dispersion as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
