//! Configuration handling for the mumalign CLI
//!
//! Parameters come from an optional mumalign.toml, then a `--preset`, then
//! individual command-line flags, later sources overriding earlier ones.

use anyhow::{anyhow, Context, Result};
use mumalign_core::{
    AlignMode, AlignParams, Alphabet, ClusterParams, GapCost, MatchMode, ScoringScheme, SeedParams,
    SimilarityMatrix, TieBreak,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub align: AlignConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Alphabet of every input sequence (dna, rna, protein)
    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    /// Worker threads, 0 for one per core
    #[serde(default)]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Preset the remaining values were taken from
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Alignment mode (nucmer or mummer)
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Largest gap bridged between clusters and reach of flank extension
    #[serde(default = "default_break_length")]
    pub break_length: usize,

    /// Longest gap side aligned by DP in one piece
    #[serde(default = "default_max_gap_fill")]
    pub max_gap_fill: usize,

    /// Chain tie-break rule (longer_seed or first_seen)
    #[serde(default = "default_tie_break")]
    pub tie_break: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Minimum MUM length
    #[serde(default = "default_min_mum_length")]
    pub min_mum_length: usize,

    /// Report repeated matches too
    #[serde(default)]
    pub maxmatch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default = "default_minimum_score")]
    pub minimum_score: usize,

    #[serde(default = "default_fixed_separation")]
    pub fixed_separation: usize,

    #[serde(default = "default_maximum_separation")]
    pub maximum_separation: usize,

    #[serde(default = "default_separation_factor")]
    pub separation_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_match_score")]
    pub match_score: i32,

    #[serde(default = "default_mismatch_score")]
    pub mismatch_score: i32,

    /// Gap cost model (affine or linear)
    #[serde(default = "default_gap_model")]
    pub gap_model: String,

    /// Cost of the first gap column; ignored by the linear model
    #[serde(default = "default_gap_open")]
    pub gap_open: i32,

    /// Cost of each further gap column, or of every column for the linear model
    #[serde(default = "default_gap_extend")]
    pub gap_extend: i32,
}

// Default value functions
fn default_alphabet() -> String { "dna".to_string() }
fn default_preset() -> String { "nucmer".to_string() }
fn default_mode() -> String { "nucmer".to_string() }
fn default_break_length() -> usize { 200 }
fn default_max_gap_fill() -> usize { 2000 }
fn default_tie_break() -> String { "longer_seed".to_string() }
fn default_min_mum_length() -> usize { 20 }
fn default_minimum_score() -> usize { 200 }
fn default_fixed_separation() -> usize { 5 }
fn default_maximum_separation() -> usize { 1000 }
fn default_separation_factor() -> f32 { 0.05 }
fn default_match_score() -> i32 { 5 }
fn default_mismatch_score() -> i32 { -4 }
fn default_gap_model() -> String { "affine".to_string() }
fn default_gap_open() -> i32 { -13 }
fn default_gap_extend() -> i32 { -8 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            alphabet: default_alphabet(),
            threads: 0,
        }
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            mode: default_mode(),
            break_length: default_break_length(),
            max_gap_fill: default_max_gap_fill(),
            tie_break: default_tie_break(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            min_mum_length: default_min_mum_length(),
            maxmatch: false,
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            minimum_score: default_minimum_score(),
            fixed_separation: default_fixed_separation(),
            maximum_separation: default_maximum_separation(),
            separation_factor: default_separation_factor(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match_score(),
            mismatch_score: default_mismatch_score(),
            gap_model: default_gap_model(),
            gap_open: default_gap_open(),
            gap_extend: default_gap_extend(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("mumalign.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: mumalign.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Replace every alignment setting with the named preset, keeping `[general]`.
    pub fn with_preset(self, name: &str) -> Result<Self> {
        let params = AlignParams::from_preset(name).ok_or_else(|| {
            anyhow!(
                "Unknown preset: {}. Available presets: {}",
                name,
                AlignParams::presets().join(", ")
            )
        })?;

        let mut config = Self::from_params(&params);
        config.general = self.general;
        Ok(config)
    }

    /// Configuration that reproduces `params`.
    pub fn from_params(params: &AlignParams) -> Self {
        let (gap_model, gap_open, gap_extend) = match params.scoring.gap_cost {
            GapCost::Affine { open, extend } => ("affine", open, extend),
            GapCost::Linear { penalty } => ("linear", penalty, penalty),
        };

        Self {
            general: GeneralConfig::default(),
            align: AlignConfig {
                preset: params.preset.clone(),
                mode: mode_name(params.mode).to_string(),
                break_length: params.break_length,
                max_gap_fill: params.max_gap_fill,
                tie_break: match params.tie_break {
                    TieBreak::FirstSeen => "first_seen".to_string(),
                    _ => "longer_seed".to_string(),
                },
            },
            seed: SeedConfig {
                min_mum_length: params.seed.min_mum_length,
                maxmatch: params.seed.maximum_match_enabled(),
            },
            cluster: ClusterConfig {
                minimum_score: params.cluster.minimum_score,
                fixed_separation: params.cluster.fixed_separation,
                maximum_separation: params.cluster.maximum_separation,
                separation_factor: params.cluster.separation_factor,
            },
            scoring: ScoringConfig {
                match_score: params.scoring.matrix.score(b'A', b'A'),
                mismatch_score: params.scoring.matrix.score(b'A', b'C'),
                gap_model: gap_model.to_string(),
                gap_open,
                gap_extend,
            },
        }
    }

    pub fn alphabet(&self) -> Result<Alphabet> {
        Ok(self.general.alphabet.parse()?)
    }

    /// Core parameters described by this configuration. Values are checked
    /// again when the assembler is built.
    pub fn to_align_params(&self) -> Result<AlignParams> {
        let mode = parse_mode(&self.align.mode)?;
        let tie_break = match self.align.tie_break.as_str() {
            "longer_seed" => TieBreak::LongerSeed,
            "first_seen" => TieBreak::FirstSeen,
            other => return Err(anyhow!("Unknown tie-break rule: {}", other)),
        };
        let gap_cost = match self.scoring.gap_model.as_str() {
            "affine" => GapCost::Affine {
                open: self.scoring.gap_open,
                extend: self.scoring.gap_extend,
            },
            "linear" => GapCost::Linear {
                penalty: self.scoring.gap_extend,
            },
            other => return Err(anyhow!("Unknown gap model: {}", other)),
        };
        let matrix = SimilarityMatrix::diagonal(self.scoring.match_score, self.scoring.mismatch_score);

        Ok(AlignParams {
            preset: self.align.preset.clone(),
            mode,
            seed: SeedParams {
                min_mum_length: self.seed.min_mum_length,
                mode: if self.seed.maxmatch {
                    MatchMode::Maximal
                } else {
                    MatchMode::Unique
                },
            },
            cluster: ClusterParams {
                minimum_score: self.cluster.minimum_score,
                fixed_separation: self.cluster.fixed_separation,
                maximum_separation: self.cluster.maximum_separation,
                separation_factor: self.cluster.separation_factor,
            },
            scoring: ScoringScheme::new(matrix, gap_cost)?,
            break_length: self.align.break_length,
            max_gap_fill: self.align.max_gap_fill,
            tie_break,
        })
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        Self::default().to_toml()
    }
}

pub fn parse_mode(name: &str) -> Result<AlignMode> {
    match name.to_ascii_lowercase().as_str() {
        "nucmer" => Ok(AlignMode::Nucmer),
        "mummer" => Ok(AlignMode::Mummer),
        other => Err(anyhow!("Unknown alignment mode: {} (expected nucmer or mummer)", other)),
    }
}

pub fn mode_name(mode: AlignMode) -> &'static str {
    match mode {
        AlignMode::Nucmer => "nucmer",
        AlignMode::Mummer => "mummer",
    }
}
