use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

use crate::config::{MIN_CONVERGENCE_DURATION, MIN_SPRING_FREQUENCY};

use super::types::{ChannelParams, SpeciesProfile};

/// Key of the profile every unknown species falls back to.
pub const DEFAULT_SPECIES: &str = "default";

const BUILTIN_PROFILES: &str = include_str!("../../assets/species_profiles.json");

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while building a `SpeciesProfileTable`.
#[derive(Debug)]
pub enum SpeciesTableError {
    /// The profile document is not valid JSON or does not match the schema.
    Parse(serde_json::Error),
    /// The document has no `default` profile.
    MissingDefault,
    /// An alias points at a species that is not defined.
    UnknownAlias { alias: String, target: String },
}

impl fmt::Display for SpeciesTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesTableError::Parse(e) => write!(f, "Species profile parse error: {e}"),
            SpeciesTableError::MissingDefault => {
                write!(f, "Species profiles must define a '{DEFAULT_SPECIES}' entry")
            }
            SpeciesTableError::UnknownAlias { alias, target } => {
                write!(f, "Species alias '{alias}' points at unknown species '{target}'")
            }
        }
    }
}

impl std::error::Error for SpeciesTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpeciesTableError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SpeciesTableError {
    fn from(e: serde_json::Error) -> Self {
        SpeciesTableError::Parse(e)
    }
}

// =============================================================================
// Table
// =============================================================================

#[derive(Deserialize)]
struct ProfileDocument {
    species: HashMap<String, SpeciesProfile>,
    #[serde(default)]
    aliases: HashMap<String, String>,
}

/// Immutable species → profile lookup with a guaranteed `default` entry.
#[derive(Resource, Debug, Clone)]
pub struct SpeciesProfileTable {
    profiles: HashMap<String, SpeciesProfile>,
}

impl SpeciesProfileTable {
    /// The profiles shipped with the game.
    pub fn builtin() -> Result<Self, SpeciesTableError> {
        Self::from_json(BUILTIN_PROFILES)
    }

    /// Parse a profile document: `{ "species": {..}, "aliases": {..} }`.
    ///
    /// Degenerate spring parameters are clamped (and logged) rather than
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, SpeciesTableError> {
        let document: ProfileDocument = serde_json::from_str(json)?;
        let mut profiles = document.species;

        for (alias, target) in &document.aliases {
            let Some(profile) = profiles.get(target).cloned() else {
                return Err(SpeciesTableError::UnknownAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            };
            profiles.insert(alias.clone(), profile);
        }

        Self::from_profiles(profiles)
    }

    pub fn from_profiles(
        mut profiles: HashMap<String, SpeciesProfile>,
    ) -> Result<Self, SpeciesTableError> {
        if !profiles.contains_key(DEFAULT_SPECIES) {
            return Err(SpeciesTableError::MissingDefault);
        }
        for (name, profile) in profiles.iter_mut() {
            if sanitize_profile(profile) {
                warn!(
                    "Species '{}': degenerate spring parameters clamped to safe values",
                    name
                );
            }
        }
        Ok(Self { profiles })
    }

    /// Profile for `species`, or the `default` profile when the key is unknown.
    /// Silent: callers that see new species names report the fallback.
    pub fn lookup(&self, species: &str) -> &SpeciesProfile {
        self.profiles
            .get(species)
            .unwrap_or_else(|| self.default_profile())
    }

    pub fn default_profile(&self) -> &SpeciesProfile {
        // Presence is checked in `from_profiles`.
        &self.profiles[DEFAULT_SPECIES]
    }

    pub fn contains(&self, species: &str) -> bool {
        self.profiles.contains_key(species)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Species keys in sorted order.
    pub fn species(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Clamp parameters that would otherwise produce NaN or negative-duration
/// behavior. Returns true if anything changed.
fn sanitize_profile(profile: &mut SpeciesProfile) -> bool {
    let mut changed = false;
    changed |= clamp_min(&mut profile.growth_duration, 0.0);
    changed |= clamp_min(&mut profile.shrink_duration, 0.0);
    changed |= clamp_min(&mut profile.convergence_duration, 0.0);
    changed |= clamp_min(&mut profile.convergence_frequency, MIN_SPRING_FREQUENCY);
    changed |= clamp_min(&mut profile.convergence_damping, 0.0);
    changed |= clamp_min(&mut profile.height_margin, 0.0);
    changed |= clamp_min(&mut profile.baseline_scale, 0.0);
    if profile.convergence_duration > 0.0 && profile.convergence_duration < MIN_CONVERGENCE_DURATION
    {
        profile.convergence_duration = 0.0;
        changed = true;
    }
    for (_, params) in profile.growth_channels.iter_mut() {
        changed |= sanitize_channel(params);
    }
    for (_, params) in profile.shrink_channels.iter_mut() {
        changed |= sanitize_channel(params);
    }
    changed
}

fn sanitize_channel(params: &mut ChannelParams) -> bool {
    let mut changed = false;
    changed |= clamp_min(&mut params.pd_frequency, MIN_SPRING_FREQUENCY);
    changed |= clamp_min(&mut params.pd_damping, 0.0);
    changed |= clamp_min(&mut params.margin, 0.0);
    changed |= clamp_min(&mut params.delayed_start_fraction, 0.0);
    if params.delayed_start_fraction > 1.0 {
        params.delayed_start_fraction = 1.0;
        changed = true;
    }
    changed
}

/// Raise `value` to `min`; NaN is replaced by `min` as well.
fn clamp_min(value: &mut f32, min: f32) -> bool {
    if value.is_nan() || *value < min {
        *value = min;
        true
    } else {
        false
    }
}
