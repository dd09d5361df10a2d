//! Upgrade choices offered on level-up.

use serde::{Deserialize, Serialize};

/// One of the five mutually exclusive level-up rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Atk,
    Hp,
    Def,
    Spd,
    Exp,
}

impl UpgradeKind {
    /// Menu order; the frontend binds keys 1-5 in this order.
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Atk,
        UpgradeKind::Hp,
        UpgradeKind::Def,
        UpgradeKind::Spd,
        UpgradeKind::Exp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Atk => "Attack +4",
            Self::Hp => "Max HP +45 (full heal)",
            Self::Def => "Defense +2",
            Self::Spd => "Speed +0.35",
            Self::Exp => "XP gain +25%",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Atk => "atk",
            Self::Hp => "hp",
            Self::Def => "def",
            Self::Spd => "spd",
            Self::Exp => "exp",
        }
    }

    /// Parse the short name used on the simulator command line.
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.short_name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_roundtrip() {
        for kind in UpgradeKind::ALL {
            assert_eq!(UpgradeKind::from_short_name(kind.short_name()), Some(kind));
        }
        assert_eq!(UpgradeKind::from_short_name("SPD"), Some(UpgradeKind::Spd));
        assert_eq!(UpgradeKind::from_short_name("mana"), None);
    }

    #[test]
    fn test_labels_not_empty() {
        for kind in UpgradeKind::ALL {
            assert!(!kind.label().is_empty());
        }
    }
}
