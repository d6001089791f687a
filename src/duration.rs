//! Expiry durations.
//!
//! A [`Duration`] is either [`Duration::ETERNAL`] (never expires) or a
//! non-negative amount of a [`TimeUnit`].  [`Duration::ZERO`] is the
//! "already expired" value a policy returns to force immediate removal.
//!
//! Equality, hashing and ordering compare the length a duration denotes, not
//! the unit it was written in, so `60 seconds == 1 minute`.
//!
//! # Example
//! ```
//! use lapse::{Duration, TimeUnit};
//!
//! let a = Duration::new(TimeUnit::Seconds, 60).unwrap();
//! assert_eq!(a, Duration::ONE_MINUTE);
//! assert!(Duration::new(TimeUnit::Seconds, -1).is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{ExpiryError, ExpiryResult};

const NANOS_PER_SEC: u128 = 1_000_000_000;

// ---------------------------------------------------------------------------
// TimeUnit
// ---------------------------------------------------------------------------

/// Granularity of a finite [`Duration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Number of nanoseconds in one unit.
    pub const fn nanos_per_unit(self) -> u64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60_000_000_000,
            TimeUnit::Hours => 3_600_000_000_000,
            TimeUnit::Days => 86_400_000_000_000,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Duration
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
enum Span {
    Eternal,
    Finite { unit: TimeUnit, amount: u64 },
}

/// How long a cache entry stays valid after a lifecycle event.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "DurationRepr", into = "DurationRepr")]
pub struct Duration {
    span: Span,
}

impl Duration {
    /// The entry never expires.
    pub const ETERNAL: Duration = Duration { span: Span::Eternal };
    /// The entry is already expired.
    pub const ZERO: Duration = Duration::of(TimeUnit::Seconds, 0);
    pub const ONE_MINUTE: Duration = Duration::of(TimeUnit::Minutes, 1);
    pub const FIVE_MINUTES: Duration = Duration::of(TimeUnit::Minutes, 5);
    pub const TEN_MINUTES: Duration = Duration::of(TimeUnit::Minutes, 10);
    pub const TWENTY_MINUTES: Duration = Duration::of(TimeUnit::Minutes, 20);
    pub const THIRTY_MINUTES: Duration = Duration::of(TimeUnit::Minutes, 30);
    pub const ONE_HOUR: Duration = Duration::of(TimeUnit::Hours, 1);
    pub const ONE_DAY: Duration = Duration::of(TimeUnit::Days, 1);

    /// Builds a finite duration from a signed amount.
    ///
    /// Fails with [`ExpiryError::InvalidArgument`] if `amount` is negative.
    pub fn new(unit: TimeUnit, amount: i64) -> ExpiryResult<Self> {
        let amount = u64::try_from(amount).map_err(|_| {
            ExpiryError::invalid(format!("duration amount must not be negative, got {amount}"))
        })?;
        Ok(Duration::of(unit, amount))
    }

    /// Builds a finite duration.  Infallible: the amount is already unsigned.
    pub const fn of(unit: TimeUnit, amount: u64) -> Self {
        Duration {
            span: Span::Finite { unit, amount },
        }
    }

    /// Length of the interval from `start` to `end`, at millisecond
    /// resolution.
    pub fn between(start: Instant, end: Instant) -> ExpiryResult<Self> {
        let elapsed = end
            .checked_duration_since(start)
            .ok_or_else(|| ExpiryError::invalid("interval end precedes its start"))?;
        let millis = u64::try_from(elapsed.as_millis())
            .map_err(|_| ExpiryError::invalid("interval too long to express in milliseconds"))?;
        Ok(Duration::of(TimeUnit::Milliseconds, millis))
    }

    pub const fn is_eternal(&self) -> bool {
        matches!(self.span, Span::Eternal)
    }

    /// `true` for any finite duration of length zero, whatever its unit.
    pub const fn is_zero(&self) -> bool {
        matches!(self.span, Span::Finite { amount: 0, .. })
    }

    /// The unit of a finite duration; `None` for [`Duration::ETERNAL`].
    pub const fn unit(&self) -> Option<TimeUnit> {
        match self.span {
            Span::Eternal => None,
            Span::Finite { unit, .. } => Some(unit),
        }
    }

    /// The amount in [`unit`](Self::unit); `0` for [`Duration::ETERNAL`].
    pub const fn amount(&self) -> u64 {
        match self.span {
            Span::Eternal => 0,
            Span::Finite { amount, .. } => amount,
        }
    }

    /// Normalized length, or `None` for an eternal duration.
    fn total_nanos(&self) -> Option<u128> {
        match self.span {
            Span::Eternal => None,
            Span::Finite { unit, amount } => {
                Some(amount as u128 * unit.nanos_per_unit() as u128)
            }
        }
    }

    /// Converts to a [`std::time::Duration`].  `None` means "never expires".
    ///
    /// Lengths beyond what `std::time::Duration` can hold saturate to
    /// `std::time::Duration::MAX`.
    pub fn as_std(&self) -> Option<std::time::Duration> {
        let nanos = self.total_nanos()?;
        let secs = u64::try_from(nanos / NANOS_PER_SEC);
        Some(match secs {
            Ok(secs) => std::time::Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
            Err(_) => std::time::Duration::MAX,
        })
    }

    /// The deadline of an entry timed from `start` with this duration.
    ///
    /// `None` means the entry never expires, either because the duration is
    /// eternal or because the deadline lies beyond what `Instant` can
    /// represent.
    pub fn expires_at(&self, start: Instant) -> Option<Instant> {
        start.checked_add(self.as_std()?)
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.total_nanos() == other.total_nanos()
    }
}

impl Eq for Duration {}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_nanos().hash(state);
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.total_nanos(), other.total_nanos()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Span::Eternal => f.write_str("eternal"),
            Span::Finite { unit, amount } => write!(f, "{amount} {unit}"),
        }
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = ExpiryError;

    /// Picks the coarsest unit that represents `d` exactly.
    fn try_from(d: std::time::Duration) -> ExpiryResult<Self> {
        let subsec = d.subsec_nanos();
        let (unit, amount) = if subsec == 0 {
            (TimeUnit::Seconds, d.as_secs() as u128)
        } else if subsec % 1_000_000 == 0 {
            (TimeUnit::Milliseconds, d.as_millis())
        } else if subsec % 1_000 == 0 {
            (TimeUnit::Microseconds, d.as_micros())
        } else {
            (TimeUnit::Nanoseconds, d.as_nanos())
        };
        let amount = u64::try_from(amount).map_err(|_| {
            ExpiryError::invalid(format!("{d:?} cannot be expressed as a whole number of {unit}"))
        })?;
        Ok(Duration::of(unit, amount))
    }
}

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

/// `"eternal"` or `{ unit = "...", amount = N }`.
///
/// Negative amounts decode into their own variant so the error reported is
/// the constructor's, not a generic integer-range failure.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Sentinel(Sentinel),
    Finite { unit: TimeUnit, amount: u64 },
    Signed { unit: TimeUnit, amount: i64 },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Sentinel {
    Eternal,
}

impl From<Duration> for DurationRepr {
    fn from(d: Duration) -> Self {
        match d.span {
            Span::Eternal => DurationRepr::Sentinel(Sentinel::Eternal),
            Span::Finite { unit, amount } => DurationRepr::Finite { unit, amount },
        }
    }
}

impl TryFrom<DurationRepr> for Duration {
    type Error = ExpiryError;

    fn try_from(repr: DurationRepr) -> ExpiryResult<Self> {
        match repr {
            DurationRepr::Sentinel(Sentinel::Eternal) => Ok(Duration::ETERNAL),
            DurationRepr::Finite { unit, amount } => Ok(Duration::of(unit, amount)),
            DurationRepr::Signed { unit, amount } => Duration::new(unit, amount),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
