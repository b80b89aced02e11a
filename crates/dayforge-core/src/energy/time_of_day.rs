//! Coarse day segments used for human-readable energy reporting.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// One of six fixed segments of the day.
///
/// Every hour 0-23 belongs to exactly one segment. `Night` wraps past
/// midnight (22:00-03:59). Variant order is the tie-break order used when
/// comparing segments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// All segments in declaration order.
    pub const ALL: [TimeOfDay; 6] = [
        TimeOfDay::EarlyMorning,
        TimeOfDay::Morning,
        TimeOfDay::Midday,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Segment containing `hour` (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            4..=6 => TimeOfDay::EarlyMorning,
            7..=11 => TimeOfDay::Morning,
            12..=14 => TimeOfDay::Midday,
            15..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Storage key, e.g. `early_morning`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::EarlyMorning => "early_morning",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Midday => "midday",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    /// Label shown to users: the key with underscores replaced by spaces.
    pub fn display_label(&self) -> &'static str {
        match self {
            TimeOfDay::EarlyMorning => "early morning",
            other => other.as_str(),
        }
    }

    /// Hours covered, as start..=end on the clock. `Night` reads 22..=3.
    pub fn hours(&self) -> RangeInclusive<u32> {
        match self {
            TimeOfDay::EarlyMorning => 4..=6,
            TimeOfDay::Morning => 7..=11,
            TimeOfDay::Midday => 12..=14,
            TimeOfDay::Afternoon => 15..=17,
            TimeOfDay::Evening => 18..=21,
            TimeOfDay::Night => 22..=3,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}
