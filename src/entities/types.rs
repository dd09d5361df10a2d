//! Player, monster and heart records plus the tier and sprite identifiers.

use crate::core::config::ArenaConfig;
use crate::core::constants::*;

/// Monster tier (and player sprite tier), always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u8);

impl Tier {
    pub const ALL: [Tier; 5] = [Tier(1), Tier(2), Tier(3), Tier(4), Tier(5)];

    /// Build a tier, clamping out-of-range values into 1..=5.
    pub fn new(value: i32) -> Self {
        Tier(value.clamp(1, i32::from(MAX_TIER)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-tier tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Shift by `delta`, clamped.
    pub fn offset(self, delta: i32) -> Self {
        Tier::new(i32::from(self.0) + delta)
    }

    /// Base tier of a wave spawned while the player is at `level`.
    pub fn for_wave_level(level: u32) -> Self {
        match level {
            39.. => Tier(5),
            30..=38 => Tier(4),
            20..=29 => Tier(3),
            10..=19 => Tier(2),
            _ => Tier(1),
        }
    }

    /// Sprite tier shown for a player at `level`.
    pub fn for_player_level(level: u32) -> Self {
        match level {
            40.. => Tier(5),
            30..=39 => Tier(4),
            20..=29 => Tier(3),
            10..=19 => Tier(2),
            _ => Tier(1),
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier(1)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Opaque reference to a sprite. The core stores these; only the renderer
/// resolves them through [`crate::assets::AssetCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player(Tier),
    Monster(Tier),
    Heart,
    Background,
    GameOver,
}

/// Axis-aligned box in arena units. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Aabb {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Inclusive overlap: touching edges count.
    pub fn touches(&self, other: &Aabb) -> bool {
        !(self.x + self.w < other.x
            || self.x > other.x + other.w
            || self.y + self.h < other.y
            || self.y > other.y + other.h)
    }

    /// Distance between the two box centers.
    pub fn center_distance(&self, other: &Aabb) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }
}

/// The single player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub max_hp: u32,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub speed: f64,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub xp_multiplier: f64,
    pub sprite: SpriteId,
}

impl Player {
    /// A fresh level-1 player at the start position.
    pub fn new(config: &ArenaConfig) -> Self {
        let base = &config.player;
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
            max_hp: base.max_hp,
            hp: base.max_hp,
            atk: base.atk,
            def: base.def,
            speed: base.speed,
            level: 1,
            xp: 0,
            xp_to_next: BASE_XP_TO_NEXT,
            xp_multiplier: 1.0,
            sprite: SpriteId::Player(Tier::for_player_level(1)),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        self.bounds().center()
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    /// Progress toward the next level, clamped to [0, 1].
    pub fn xp_ratio(&self) -> f64 {
        if self.xp_to_next == 0 {
            return 1.0;
        }
        (f64::from(self.xp) / f64::from(self.xp_to_next)).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Heal without exceeding max hp. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }
}

/// A chasing enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub tier: Tier,
    pub max_hp: u32,
    pub hp: u32,
    pub speed: f64,
    /// Simulated time of the last contact hit; `None` until the first hit.
    pub last_hit_at: Option<u64>,
    /// Overlapped the player after this frame's seek, before push-back.
    pub in_contact: bool,
    pub sprite: SpriteId,
}

impl Monster {
    pub fn new(tier: Tier, x: f64, y: f64, config: &ArenaConfig) -> Self {
        let max_hp = config.monster_max_hp(tier);
        Self {
            x,
            y,
            w: MONSTER_SIZE,
            h: MONSTER_SIZE,
            tier,
            max_hp,
            hp: max_hp,
            speed: config.monster_speed(tier),
            last_hit_at: None,
            in_contact: false,
            sprite: SpriteId::Monster(tier),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        self.bounds().center()
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// XP granted for a kill, before the player's multiplier.
    pub fn xp_reward(&self) -> u32 {
        XP_PER_TIER * u32::from(self.tier.get())
    }
}

/// A healing pickup dropped by a dying monster.
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Remaining lifetime in simulated milliseconds.
    pub ttl_ms: i64,
}

impl Heart {
    /// A heart dropped where `monster` died.
    pub fn dropped_by(monster: &Monster, config: &ArenaConfig) -> Self {
        Self {
            x: monster.x + HEART_DROP_OFFSET,
            y: monster.y + HEART_DROP_OFFSET,
            w: HEART_SIZE,
            h: HEART_SIZE,
            ttl_ms: i64::try_from(config.heart_ttl_ms).unwrap_or(i64::MAX),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_clamps() {
        assert_eq!(Tier::new(0).get(), 1);
        assert_eq!(Tier::new(-4).get(), 1);
        assert_eq!(Tier::new(9).get(), 5);
        assert_eq!(Tier::new(1).offset(-1).get(), 1);
        assert_eq!(Tier::new(5).offset(1).get(), 5);
        assert_eq!(Tier::new(3).offset(1).get(), 4);
    }

    #[test]
    fn test_wave_tier_thresholds() {
        assert_eq!(Tier::for_wave_level(1).get(), 1);
        assert_eq!(Tier::for_wave_level(9).get(), 1);
        assert_eq!(Tier::for_wave_level(10).get(), 2);
        assert_eq!(Tier::for_wave_level(20).get(), 3);
        assert_eq!(Tier::for_wave_level(30).get(), 4);
        assert_eq!(Tier::for_wave_level(38).get(), 4);
        assert_eq!(Tier::for_wave_level(39).get(), 5);
    }

    #[test]
    fn test_player_sprite_thresholds() {
        assert_eq!(Tier::for_player_level(9).get(), 1);
        assert_eq!(Tier::for_player_level(10).get(), 2);
        assert_eq!(Tier::for_player_level(29).get(), 3);
        assert_eq!(Tier::for_player_level(39).get(), 4);
        assert_eq!(Tier::for_player_level(40).get(), 5);
    }

    #[test]
    fn test_overlap_is_strict_and_touch_is_inclusive() {
        let a = Aabb { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let edge = Aabb { x: 10.0, y: 0.0, w: 10.0, h: 10.0 };
        assert!(!a.overlaps(&edge));
        assert!(a.touches(&edge));

        let inside = Aabb { x: 5.0, y: 5.0, w: 10.0, h: 10.0 };
        assert!(a.overlaps(&inside));
        assert!(a.touches(&inside));

        let far = Aabb { x: 30.0, y: 30.0, w: 5.0, h: 5.0 };
        assert!(!a.overlaps(&far));
        assert!(!a.touches(&far));
    }

    #[test]
    fn test_monster_stats_follow_tier() {
        let config = ArenaConfig::default();
        for tier in Tier::ALL {
            let m = Monster::new(tier, 0.0, 0.0, &config);
            let t = u32::from(tier.get());
            assert_eq!(m.max_hp, 60 + 50 * t);
            assert_eq!(m.hp, m.max_hp);
            assert!((m.speed - (0.28 + 0.06 * f64::from(t))).abs() < 1e-9);
            assert_eq!(m.xp_reward(), 18 * t);
            assert_eq!(m.sprite, SpriteId::Monster(tier));
            assert!(m.last_hit_at.is_none());
            assert!(!m.in_contact);
        }
    }

    #[test]
    fn test_new_player_defaults() {
        let p = Player::new(&ArenaConfig::default());
        assert_eq!(p.level, 1);
        assert_eq!(p.hp, 350);
        assert_eq!(p.max_hp, 350);
        assert_eq!(p.xp_to_next, 50);
        assert!((p.xp_multiplier - 1.0).abs() < f64::EPSILON);
        assert_eq!(p.sprite, SpriteId::Player(Tier::new(1)));
        assert!((p.hp_ratio() - 1.0).abs() < f64::EPSILON);
        assert_eq!(p.xp_ratio(), 0.0);
    }

    #[test]
    fn test_player_damage_and_heal_clamp() {
        let mut p = Player::new(&ArenaConfig::default());
        p.take_damage(500);
        assert_eq!(p.hp, 0);
        assert!(!p.is_alive());
        assert_eq!(p.heal(7), 7);
        p.hp = 348;
        assert_eq!(p.heal(7), 2);
        assert_eq!(p.hp, 350);
    }

    #[test]
    fn test_heart_drops_offset_from_monster() {
        let config = ArenaConfig::default();
        let m = Monster::new(Tier::new(1), 100.0, 200.0, &config);
        let h = Heart::dropped_by(&m, &config);
        assert!((h.x - 108.0).abs() < f64::EPSILON);
        assert!((h.y - 208.0).abs() < f64::EPSILON);
        assert_eq!(h.ttl_ms, 12_000);
        assert!((h.w - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heart_ttl_saturates_instead_of_wrapping() {
        let config = ArenaConfig {
            heart_ttl_ms: u64::MAX,
            ..ArenaConfig::default()
        };
        let m = Monster::new(Tier::new(1), 0.0, 0.0, &config);
        assert_eq!(Heart::dropped_by(&m, &config).ttl_ms, i64::MAX);
    }

    #[test]
    fn test_tier_index_stays_in_table() {
        for value in [-3, 0, 1, 3, 5, 6, 200] {
            assert!(Tier::new(value).index() < Tier::ALL.len());
        }
        for (i, tier) in Tier::ALL.iter().enumerate() {
            assert_eq!(tier.index(), i);
        }
    }
}
