//! Bounded log of recent game events shown under the play field.

use crate::core::constants::EVENT_LOG_CAPACITY;
use crate::core::TickEvent;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTone {
    Good,
    Bad,
    Neutral,
}

impl LogTone {
    fn of(event: &TickEvent) -> Self {
        match event {
            TickEvent::MonsterKilled { .. }
            | TickEvent::HeartPickedUp { .. }
            | TickEvent::LeveledUp { .. }
            | TickEvent::UpgradeApplied { .. } => LogTone::Good,
            TickEvent::PlayerHit { .. } | TickEvent::GameOver { .. } | TickEvent::HeartExpired => {
                LogTone::Bad
            }
            _ => LogTone::Neutral,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<(LogTone, String)>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, event: &TickEvent) {
        // Swings are too frequent to be worth a line; kills carry the signal.
        if matches!(event, TickEvent::PlayerAttack { .. }) {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((LogTone::of(event), event.message()));
    }

    pub fn extend<'a>(&mut self, events: impl IntoIterator<Item = &'a TickEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &(LogTone, String)> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Tier;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = EventLog::with_capacity(3);
        for level in 2..=6 {
            log.push(&TickEvent::LeveledUp { new_level: level });
        }
        assert_eq!(log.len(), 3);
        let first = log.recent(3).next().unwrap();
        assert!(first.1.contains("level 4"));
    }

    #[test]
    fn test_attack_swings_are_skipped() {
        let mut log = EventLog::default();
        log.push(&TickEvent::PlayerAttack { hits: 2, damage: 14 });
        assert!(log.is_empty());
    }

    #[test]
    fn test_tones() {
        let mut log = EventLog::default();
        log.extend(&[
            TickEvent::PlayerHit {
                tier: Tier::new(3),
                damage: 31,
            },
            TickEvent::HeartPickedUp { healed: 7 },
            TickEvent::HeartDropped,
        ]);
        let tones: Vec<LogTone> = log.recent(8).map(|(tone, _)| *tone).collect();
        assert_eq!(tones, vec![LogTone::Bad, LogTone::Good, LogTone::Neutral]);
    }

    #[test]
    fn test_recent_returns_newest_in_order() {
        let mut log = EventLog::default();
        log.push(&TickEvent::HeartDropped);
        log.push(&TickEvent::HeartExpired);
        log.push(&TickEvent::Restarted);
        let recent: Vec<&String> = log.recent(2).map(|(_, msg)| msg).collect();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1], &TickEvent::Restarted.message());
    }
}
