use crate::combat_log::{ActorId, StatusId};

/// Pending dots are keyed by who applied which status.
pub type DotKey = (ActorId, StatusId);

/// A dot whose per-tick magnitude has been estimated from the applying action
/// but whose status-start record has not arrived yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDot {
    pub status: StatusId,
    pub source: ActorId,
    /// Estimated damage of one tick, used only as a weight when splitting.
    pub edge_damage: f64,
}

impl PendingDot {
    pub fn key(&self) -> DotKey {
        (self.source, self.status)
    }

    pub fn confirm(self, start_time: i64, duration_secs: f64) -> Dot {
        Dot {
            status: self.status,
            source: self.source,
            edge_damage: self.edge_damage,
            start_time,
            duration_secs,
        }
    }
}

/// An active damage-over-time instance on a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub status: StatusId,
    pub source: ActorId,
    pub edge_damage: f64,
    pub start_time: i64,
    pub duration_secs: f64,
}

impl Dot {
    pub fn expires_at(&self) -> i64 {
        self.start_time
            .saturating_add((self.duration_secs * 1000.0) as i64)
    }

    /// A dot is live strictly before its expiry time.
    #[inline]
    pub fn is_active_at(&self, time: i64) -> bool {
        self.expires_at() > time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_dot_expires_after_duration() {
        let pending = PendingDot {
            status: 248,
            source: 0x1000_0001,
            edge_damage: 120.0,
        };
        assert_eq!(pending.key(), (0x1000_0001, 248));

        let dot = pending.confirm(10_000, 15.0);
        assert_eq!(dot.expires_at(), 25_000);
        assert!(dot.is_active_at(24_999));
        assert!(!dot.is_active_at(25_000));
    }

    #[test]
    fn oversized_duration_saturates_expiry() {
        let pending = PendingDot {
            status: 248,
            source: 0x1000_0001,
            edge_damage: 120.0,
        };
        let dot = pending.confirm(10_000, f64::MAX);
        assert_eq!(dot.expires_at(), i64::MAX);
        assert!(dot.is_active_at(i64::MAX - 1));
    }
}
