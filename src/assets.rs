//! Sprite catalog consulted by the renderer.
//!
//! Every [`SpriteId`] resolves to a [`SpriteStatus`]. Built-in glyph art is
//! always available; `~/.arena/sprites.json` may override individual sprites.
//! The simulation core never looks at this module.

use crate::core::constants::SPRITES_FILENAME;
use crate::entities::{SpriteId, Tier};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// One-cell glyph plus its truecolor tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteArt {
    pub glyph: char,
    pub rgb: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteStatus {
    Loading,
    Ready(SpriteArt),
    Failed,
}

impl SpriteStatus {
    pub fn art(self) -> Option<SpriteArt> {
        match self {
            SpriteStatus::Ready(art) => Some(art),
            SpriteStatus::Loading | SpriteStatus::Failed => None,
        }
    }
}

/// Key used for a sprite in the overrides file, e.g. `player_3` or `heart`.
pub fn sprite_key(id: SpriteId) -> String {
    match id {
        SpriteId::Player(tier) => format!("player_{}", tier.get()),
        SpriteId::Monster(tier) => format!("monster_{}", tier.get()),
        SpriteId::Heart => "heart".to_string(),
        SpriteId::Background => "background".to_string(),
        SpriteId::GameOver => "game_over".to_string(),
    }
}

/// Every sprite the catalog tracks.
pub fn all_sprite_ids() -> Vec<SpriteId> {
    let mut ids = Vec::with_capacity(13);
    ids.extend(Tier::ALL.iter().map(|&t| SpriteId::Player(t)));
    ids.extend(Tier::ALL.iter().map(|&t| SpriteId::Monster(t)));
    ids.extend([SpriteId::Heart, SpriteId::Background, SpriteId::GameOver]);
    ids
}

/// Art shipped with the binary.
pub fn builtin_art(id: SpriteId) -> SpriteArt {
    let (glyph, rgb) = match id {
        // Leather, iron, gold, diamond, legendary
        SpriteId::Player(tier) => match tier.get() {
            1 => ('@', [176, 124, 76]),
            2 => ('@', [190, 196, 204]),
            3 => ('@', [232, 190, 48]),
            4 => ('@', [96, 220, 232]),
            _ => ('@', [214, 92, 232]),
        },
        SpriteId::Monster(tier) => match tier.get() {
            1 => ('s', [110, 200, 90]),
            2 => ('g', [150, 110, 200]),
            3 => ('O', [80, 140, 230]),
            4 => ('T', [230, 140, 40]),
            _ => ('D', [220, 40, 40]),
        },
        SpriteId::Heart => ('♥', [240, 60, 90]),
        SpriteId::Background => ('·', [40, 70, 40]),
        SpriteId::GameOver => ('☠', [200, 30, 30]),
    };
    SpriteArt { glyph, rgb }
}

/// Status of every sprite, keyed by id.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    entries: HashMap<SpriteId, SpriteStatus>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetCatalog {
    /// A catalog where nothing has loaded yet.
    pub fn new() -> Self {
        let entries = all_sprite_ids()
            .into_iter()
            .map(|id| (id, SpriteStatus::Loading))
            .collect();
        Self { entries }
    }

    /// A catalog with only the built-in art, all Ready.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.load_builtin();
        catalog
    }

    /// Load built-in art, then apply overrides from `path` or from
    /// `~/.arena/sprites.json`. Override problems are logged and never fatal.
    pub fn load(path: Option<&Path>) -> Self {
        let mut catalog = Self::builtin();
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match persistence::arena_path(SPRITES_FILENAME) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("sprite overrides unavailable: {}", e);
                    return catalog;
                }
            },
        };
        match fs::read_to_string(&path) {
            Ok(json) => {
                if let Err(e) = catalog.apply_overrides_json(&json) {
                    log::warn!("ignoring {}: {}", path.display(), e);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no sprite overrides at {}", path.display());
            }
            Err(e) => log::warn!("could not read {}: {}", path.display(), e),
        }
        catalog
    }

    pub fn load_builtin(&mut self) {
        for (id, status) in self.entries.iter_mut() {
            *status = SpriteStatus::Ready(builtin_art(*id));
        }
    }

    /// Apply a JSON object of `key -> {glyph, rgb}` overrides. A malformed
    /// entry marks its sprite Failed; unknown keys are skipped. Returns the
    /// number of sprites replaced.
    pub fn apply_overrides_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut applied = 0;
        for id in all_sprite_ids() {
            let Some(value) = raw.get(&sprite_key(id)) else {
                continue;
            };
            let status = match serde_json::from_value::<SpriteArt>(value.clone()) {
                Ok(art) if !art.glyph.is_control() => {
                    applied += 1;
                    SpriteStatus::Ready(art)
                }
                Ok(_) => {
                    log::warn!("sprite {}: control characters cannot be drawn", sprite_key(id));
                    SpriteStatus::Failed
                }
                Err(e) => {
                    log::warn!("sprite {}: {}", sprite_key(id), e);
                    SpriteStatus::Failed
                }
            };
            self.entries.insert(id, status);
        }
        for key in raw.keys() {
            if !all_sprite_ids().iter().any(|&id| sprite_key(id) == *key) {
                log::warn!("unknown sprite key {:?}", key);
            }
        }
        Ok(applied)
    }

    pub fn status(&self, id: SpriteId) -> SpriteStatus {
        self.entries
            .get(&id)
            .copied()
            .unwrap_or(SpriteStatus::Loading)
    }

    pub fn ready_count(&self) -> usize {
        self.entries
            .values()
            .filter(|s| matches!(s, SpriteStatus::Ready(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_catalog_is_loading() {
        let catalog = AssetCatalog::new();
        assert_eq!(catalog.ready_count(), 0);
        assert_eq!(catalog.status(SpriteId::Heart), SpriteStatus::Loading);
    }

    #[test]
    fn test_builtin_catalog_is_ready() {
        let catalog = AssetCatalog::builtin();
        assert_eq!(catalog.ready_count(), 13);
        assert_eq!(
            catalog.status(SpriteId::Monster(Tier::new(5))).art(),
            Some(builtin_art(SpriteId::Monster(Tier::new(5))))
        );
    }

    #[test]
    fn test_sprite_keys_are_unique() {
        let mut keys: Vec<String> = all_sprite_ids().into_iter().map(sprite_key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 13);
        assert!(keys.contains(&"player_4".to_string()));
        assert!(keys.contains(&"game_over".to_string()));
    }

    #[test]
    fn test_override_replaces_art() {
        let mut catalog = AssetCatalog::builtin();
        let applied = catalog
            .apply_overrides_json(r#"{"monster_3": {"glyph": "X", "rgb": [1, 2, 3]}}"#)
            .unwrap();
        assert_eq!(applied, 1);
        assert_eq!(
            catalog.status(SpriteId::Monster(Tier::new(3))),
            SpriteStatus::Ready(SpriteArt {
                glyph: 'X',
                rgb: [1, 2, 3]
            })
        );
        assert_eq!(catalog.ready_count(), 13);
    }

    #[test]
    fn test_malformed_override_marks_failed() {
        let mut catalog = AssetCatalog::builtin();
        let applied = catalog
            .apply_overrides_json(r#"{"heart": {"glyph": "too long", "rgb": [1, 2, 3]}, "bogus": 1}"#)
            .unwrap();
        assert_eq!(applied, 0);
        assert_eq!(catalog.status(SpriteId::Heart), SpriteStatus::Failed);
        assert_eq!(catalog.status(SpriteId::Heart).art(), None);
        assert_eq!(catalog.ready_count(), 12);
    }

    #[test]
    fn test_control_glyph_rejected() {
        let mut catalog = AssetCatalog::builtin();
        catalog
            .apply_overrides_json(r#"{"background": {"glyph": "\n", "rgb": [0, 0, 0]}}"#)
            .unwrap();
        assert_eq!(catalog.status(SpriteId::Background), SpriteStatus::Failed);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let mut catalog = AssetCatalog::builtin();
        assert!(catalog.apply_overrides_json("not json").is_err());
        assert_eq!(catalog.ready_count(), 13);
    }

    #[test]
    fn test_load_missing_path_keeps_builtin() {
        let path = std::env::temp_dir().join("arena_missing_sprites_test.json");
        let _ = fs::remove_file(&path);
        let catalog = AssetCatalog::load(Some(&path));
        assert_eq!(catalog.ready_count(), 13);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("arena_sprites_load_test.json");
        fs::write(&path, r#"{"player_1": {"glyph": "P", "rgb": [9, 9, 9]}}"#).unwrap();
        let catalog = AssetCatalog::load(Some(&path));
        assert_eq!(
            catalog.status(SpriteId::Player(Tier::new(1))).art().map(|a| a.glyph),
            Some('P')
        );
        let _ = fs::remove_file(&path);
    }
}
