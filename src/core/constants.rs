// Arena geometry
pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 600.0;

// Frame timing: one simulation step per 16ms frame (~60 FPS)
pub const FRAME_MS: u64 = 16;
pub const MAX_FRAME_DELTA_MS: u64 = 100;

// Player base stats (restored on restart)
pub const PLAYER_START_X: f64 = 380.0;
pub const PLAYER_START_Y: f64 = 280.0;
pub const PLAYER_SIZE: f64 = 48.0;
pub const PLAYER_BASE_MAX_HP: u32 = 350;
pub const PLAYER_BASE_ATK: u32 = 14;
pub const PLAYER_BASE_DEF: u32 = 6;
pub const PLAYER_BASE_SPEED: f64 = 2.2;
pub const PLAYER_SPEED_CAP: f64 = 6.0;

// Player attack
pub const PLAYER_ATTACK_RANGE: f64 = 72.0;
pub const PLAYER_ATTACK_COOLDOWN_MS: u64 = 220;
pub const MIN_ATTACK_DAMAGE: u32 = 2;
pub const TIER_ARMOR_FACTOR: f64 = 0.3;

// Leveling
pub const MAX_LEVEL: u32 = 40;
pub const BASE_XP_TO_NEXT: u32 = 50;
pub const XP_TO_NEXT_GROWTH: f64 = 1.32;
pub const MIN_XP_TO_NEXT: u32 = 10;
pub const XP_PER_TIER: u32 = 18;

// Upgrades
pub const UPGRADE_ATK_BONUS: u32 = 4;
pub const UPGRADE_HP_BONUS: u32 = 45;
pub const UPGRADE_DEF_BONUS: u32 = 2;
pub const UPGRADE_SPEED_BONUS: f64 = 0.35;
pub const UPGRADE_XP_MULTIPLIER: f64 = 1.25;

// Monsters
pub const MONSTER_SIZE: f64 = 54.0;
pub const MONSTER_BASE_SPEED: f64 = 0.28;
pub const MONSTER_SPEED_PER_TIER: f64 = 0.06;
pub const MONSTER_BASE_HP: u32 = 60;
pub const MONSTER_HP_PER_TIER: u32 = 50;
pub const MAX_TIER: u8 = 5;

// Contact damage by tier: (percent of player max hp, cooldown ms)
pub const TIER_CONTACT_TABLE: [(f64, u64); 5] = [
    (0.03, 2000), // Tier 1
    (0.06, 1900), // Tier 2
    (0.09, 1700), // Tier 3
    (0.12, 1500), // Tier 4
    (0.35, 3000), // Tier 5
];

// Waves
pub const MAX_WAVE_SIZE: usize = 7;
pub const BASE_WAVE_SIZE: usize = 2;
pub const LEVELS_PER_EXTRA_MONSTER: u32 = 8;
pub const TIER_DOWN_CHANCE: f64 = 0.12;
pub const TIER_UP_CHANCE: f64 = 0.12;
pub const SPAWN_MARGIN_LEFT: f64 = 40.0;
pub const SPAWN_MARGIN_TOP: f64 = 80.0;
pub const SPAWN_SPAN_INSET_X: f64 = 100.0;
pub const SPAWN_SPAN_INSET_Y: f64 = 150.0;
pub const SPAWN_SAFE_RADIUS: f64 = 80.0;
pub const SPAWN_NUDGE_X: f64 = 120.0;
pub const SPAWN_NUDGE_Y: f64 = 80.0;

// Collision
pub const SEEK_STOP_DISTANCE: f64 = 2.0;
pub const PUSH_BACK_FORCE: f64 = 1.4;
pub const MONSTER_MIN_SEPARATION: f64 = 48.0;

// Hearts
pub const HEART_DROP_CHANCE: f64 = 0.18;
pub const HEART_HEAL_PERCENT: f64 = 0.02;
pub const HEART_TTL_MS: u64 = 12_000;
pub const HEART_SIZE: f64 = 28.0;
pub const HEART_DROP_OFFSET: f64 = 8.0;

// Held-key bridging: frames a direction stays held after a key press (~200ms)
pub const INPUT_HOLD_TICKS: u32 = 12;

// Frontend
pub const EVENT_LOG_CAPACITY: usize = 8;
pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "arena.log";
pub const SPRITES_FILENAME: &str = "sprites.json";
