//! Veilshare Configuration
//!
//! Masker configuration: prime size, polynomial degree, security parameter
//! and the ordered party roster.
//!
//! Handles loading configuration from:
//! 1. VEILSHARE_CONFIG env var (explicit path)
//! 2. ./veilshare.toml (current directory)
//! 3. ~/.veilshare/veilshare.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};
use veilshare_field::SafePrime;
use veilshare_threshold::PartyId;

const CONFIG_FILE_NAME: &str = "veilshare.toml";
const CONFIG_DIR_NAME: &str = ".veilshare";

// ============================================================================
// Default Constants
// ============================================================================

const DEFAULT_DEGREE: usize = 1;
const DEFAULT_KAPPA: u32 = 40;

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskerConfig {
    #[serde(default)]
    pub masker: MaskerSection,
    #[serde(default)]
    pub parties: Vec<PartyEntry>,
}

/// `[masker]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskerSection {
    #[serde(default)]
    pub prime: SafePrime,
    #[serde(default = "default_degree")]
    pub degree: usize,
    #[serde(default = "default_kappa")]
    pub kappa: u32,
    /// Refuse to unmask unless every roster party contributed
    #[serde(default)]
    pub require_full_roster: bool,
    #[serde(default)]
    pub ecdsa_key_field: KeyField,
    #[serde(default)]
    pub eddsa_key_field: KeyField,
}

impl Default for MaskerSection {
    fn default() -> Self {
        Self {
            prime: SafePrime::default(),
            degree: DEFAULT_DEGREE,
            kappa: DEFAULT_KAPPA,
            require_full_roster: false,
            ecdsa_key_field: KeyField::default(),
            eddsa_key_field: KeyField::default(),
        }
    }
}

fn default_degree() -> usize {
    DEFAULT_DEGREE
}

fn default_kappa() -> u32 {
    DEFAULT_KAPPA
}

/// Field that private-key scalars are shared in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KeyField {
    /// The curve's prime group order
    #[default]
    Curve,
    /// The masker's own safe prime
    Masker,
}

/// `[[parties]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartyEntry {
    /// Hex-encoded party identifier
    pub id: String,
}

impl From<&PartyId> for PartyEntry {
    fn from(party: &PartyId) -> Self {
        Self {
            id: party.to_string(),
        }
    }
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Set field from a variable if present and parseable
fn var_parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    field: &mut T,
) {
    if let Some(v) = lookup(key) {
        match v.parse() {
            Ok(parsed) => *field = parsed,
            Err(_) => log::warn!("Ignoring unparseable {}={}", key, v),
        }
    }
}

/// Truthy values are "1" or "true"
fn var_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

// ============================================================================
// Implementation
// ============================================================================

impl MaskerConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading masker config from: {}", path.display());
                Self::read(&path)?
            }
            None => {
                log::info!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from TOML text, without env overrides
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse masker config")
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check VEILSHARE_CONFIG env var
        if let Ok(path) = env::var("VEILSHARE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check ./veilshare.toml (current directory)
        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.veilshare/veilshare.toml
        Self::default_config_path().filter(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        var_parse(&lookup, "VEILSHARE_PRIME", &mut self.masker.prime);
        var_parse(&lookup, "VEILSHARE_DEGREE", &mut self.masker.degree);
        var_parse(&lookup, "VEILSHARE_KAPPA", &mut self.masker.kappa);
        if let Some(v) = var_bool(&lookup, "VEILSHARE_REQUIRE_FULL_ROSTER") {
            self.masker.require_full_roster = v;
        }
    }

    /// Decode the roster, in file order
    pub fn party_ids(&self) -> Result<Vec<PartyId>> {
        if self.parties.is_empty() {
            bail!("No parties configured");
        }
        self.parties
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                PartyId::from_hex(&entry.id)
                    .with_context(|| format!("Invalid hex id for party #{index}: {}", entry.id))
            })
            .collect()
    }

    /// Replace the roster
    pub fn with_parties<'a>(mut self, parties: impl IntoIterator<Item = &'a PartyId>) -> Self {
        self.parties = parties.into_iter().map(PartyEntry::from).collect();
        self
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        let sample = Self::default().with_parties(&[
            PartyId::new(vec![0x01]),
            PartyId::new(vec![0x02]),
            PartyId::new(vec![0x03]),
        ]);
        toml::to_string_pretty(&sample).unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
