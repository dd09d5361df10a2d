//! Tunable arena configuration.
//!
//! Every field defaults to the value in [`crate::core::constants`], so an
//! empty or partial JSON file is a valid config. Files live in `~/.arena/`
//! unless a path is given on the command line.

use crate::core::constants::*;
use crate::entities::Tier;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating an [`ArenaConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Base stats the player starts with (and returns to on restart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerBase {
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub speed: f64,
    pub speed_cap: f64,
}

impl Default for PlayerBase {
    fn default() -> Self {
        Self {
            max_hp: PLAYER_BASE_MAX_HP,
            atk: PLAYER_BASE_ATK,
            def: PLAYER_BASE_DEF,
            speed: PLAYER_BASE_SPEED,
            speed_cap: PLAYER_SPEED_CAP,
        }
    }
}

/// Contact damage settings for one monster tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierScaling {
    /// Fraction of the player's max hp dealt per contact hit.
    pub damage_percent: f64,
    /// Minimum simulated milliseconds between two hits from the same monster.
    pub cooldown_ms: u64,
}

fn default_tier_table() -> [TierScaling; 5] {
    TIER_CONTACT_TABLE.map(|(damage_percent, cooldown_ms)| TierScaling {
        damage_percent,
        cooldown_ms,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub arena_width: f64,
    pub arena_height: f64,
    pub player: PlayerBase,
    pub attack_range: f64,
    pub attack_cooldown_ms: u64,
    pub monster_base_speed: f64,
    pub monster_speed_per_tier: f64,
    pub monster_base_hp: u32,
    pub monster_hp_per_tier: u32,
    pub heart_drop_chance: f64,
    pub heart_heal_percent: f64,
    pub heart_ttl_ms: u64,
    pub tiers: [TierScaling; 5],
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player: PlayerBase::default(),
            attack_range: PLAYER_ATTACK_RANGE,
            attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
            monster_base_speed: MONSTER_BASE_SPEED,
            monster_speed_per_tier: MONSTER_SPEED_PER_TIER,
            monster_base_hp: MONSTER_BASE_HP,
            monster_hp_per_tier: MONSTER_HP_PER_TIER,
            heart_drop_chance: HEART_DROP_CHANCE,
            heart_heal_percent: HEART_HEAL_PERCENT,
            heart_ttl_ms: HEART_TTL_MS,
            tiers: default_tier_table(),
        }
    }
}

impl ArenaConfig {
    /// Contact damage settings for a tier.
    pub fn tier(&self, tier: Tier) -> &TierScaling {
        &self.tiers[tier.index()]
    }

    /// Monster movement speed per frame for a tier.
    pub fn monster_speed(&self, tier: Tier) -> f64 {
        self.monster_base_speed + f64::from(tier.get()) * self.monster_speed_per_tier
    }

    /// Monster max hp for a tier.
    pub fn monster_max_hp(&self, tier: Tier) -> u32 {
        u32::from(tier.get())
            .saturating_mul(self.monster_hp_per_tier)
            .saturating_add(self.monster_base_hp)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `path` if given, otherwise `~/.arena/config.json`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = persistence::arena_path(CONFIG_FILENAME)?;
        match fs::read_to_string(&default_path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", default_path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_width = SPAWN_SPAN_INSET_X + MONSTER_SIZE;
        let min_height = SPAWN_SPAN_INSET_Y + MONSTER_SIZE;
        if !(self.arena_width >= min_width && self.arena_height >= min_height) {
            return Err(ConfigError::Invalid(format!(
                "arena must be at least {}x{}, got {}x{}",
                min_width, min_height, self.arena_width, self.arena_height
            )));
        }
        if self.player.max_hp == 0 {
            return Err(ConfigError::Invalid("player max_hp must be positive".into()));
        }
        if !(self.player.speed >= 0.0 && self.player.speed <= self.player.speed_cap) {
            return Err(ConfigError::Invalid(format!(
                "player speed {} must be within [0, {}]",
                self.player.speed, self.player.speed_cap
            )));
        }
        if !(self.attack_range >= 0.0) || !(self.monster_base_speed >= 0.0) {
            return Err(ConfigError::Invalid(
                "attack range and monster speed must be non-negative".into(),
            ));
        }
        for (name, p) in [
            ("heart_drop_chance", self.heart_drop_chance),
            ("heart_heal_percent", self.heart_heal_percent),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("{} must be within [0, 1]", name)));
            }
        }
        let top_tier_hp = u32::from(MAX_TIER)
            .checked_mul(self.monster_hp_per_tier)
            .and_then(|hp| hp.checked_add(self.monster_base_hp));
        if top_tier_hp.is_none() {
            return Err(ConfigError::Invalid(format!(
                "monster hp overflows at tier {}: base {} + {} per tier",
                MAX_TIER, self.monster_base_hp, self.monster_hp_per_tier
            )));
        }
        if i64::try_from(self.heart_ttl_ms).is_err() {
            return Err(ConfigError::Invalid(format!(
                "heart_ttl_ms must be at most {}, got {}",
                i64::MAX,
                self.heart_ttl_ms
            )));
        }
        for (i, tier) in self.tiers.iter().enumerate() {
            if !(0.0..=1.0).contains(&tier.damage_percent) {
                return Err(ConfigError::Invalid(format!(
                    "tier {} damage_percent must be within [0, 1]",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
