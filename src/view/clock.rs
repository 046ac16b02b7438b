// src/view/clock.rs

use time::OffsetDateTime;

/// A wall-clock moment reduced to what view filtering needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
    /// Minutes since midnight, local time (0-1439).
    pub minutes: u16,
}

impl Moment {
    pub const fn new(weekday: u8, minutes: u16) -> Self {
        Self { weekday, minutes }
    }
}

/// Abstract wall-clock access.
///
/// Production code uses [`SystemClock`]; tests pin a [`FixedClock`] so the
/// schedule gating is reproducible.
pub trait Clock: Send + Sync {
    fn now(&self) -> Moment;
}

/// Reads the local system time. Falls back to UTC when the local offset
/// cannot be determined (e.g. multi-threaded environments on some Unixes).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Moment {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Moment {
            weekday: now.weekday().number_days_from_sunday(),
            minutes: u16::from(now.hour()) * 60 + u16::from(now.minute()),
        }
    }
}

/// A clock stuck at one moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Moment);

impl Clock for FixedClock {
    fn now(&self) -> Moment {
        self.0
    }
}
