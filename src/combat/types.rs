/// What a successful player attack did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Monsters within range that took damage.
    pub hits: usize,
    /// Total damage dealt across all hits.
    pub damage: u32,
    /// Monsters killed by this attack.
    pub kills: usize,
    /// Hearts dropped by the kills.
    pub hearts_dropped: usize,
    /// True if the field emptied and a new wave was spawned.
    pub wave_cleared: bool,
}

/// Why an attack did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackBlocked {
    /// Game over or an upgrade choice is pending.
    NotPlaying,
    /// The attack cooldown has not elapsed; carries the remaining ms.
    Cooldown(u64),
}
