use chrono::NaiveDateTime;
use serde::Serialize;

/// Highest level a kata can reach.
pub const MAX_LEVEL: u8 = 5;

const SYMBOLS: [&str; (MAX_LEVEL + 1) as usize] = ["", "+", "++", "+++", "++++", "+++++"];

/// Skill level of a kata, always within `0..=MAX_LEVEL`.
///
/// Level 0 means the kata was never practiced or its practice has fully decayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Mastery(u8);

impl Mastery {
    pub const NONE: Mastery = Mastery(0);

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> &'static str {
        level_to_symbol(self.0 as i64)
    }

    /// Arithmetic mean of the given levels, truncated. Empty input yields level 0.
    pub fn average<I>(levels: I) -> Mastery
    where
        I: IntoIterator<Item = Mastery>,
    {
        let (sum, count) = levels
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), m| (sum + m.0 as u64, count + 1));
        if count == 0 {
            return Mastery::NONE;
        }
        // mean of values in 0..=5 stays in range
        Mastery((sum / count) as u8)
    }
}

impl std::fmt::Display for Mastery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Render a level as a run of `+` characters. Levels outside `0..=5` render empty.
pub fn level_to_symbol(level: i64) -> &'static str {
    usize::try_from(level)
        .ok()
        .and_then(|i| SYMBOLS.get(i))
        .copied()
        .unwrap_or("")
}

/// Whole days between `last_done_at` and `now`, truncated toward zero.
///
/// Negative when `last_done_at` lies in the future.
pub fn days_between(last_done_at: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - last_done_at).num_hours() / 24
}

/// Score a kata from how often and how recently it was done.
///
/// `now` is injected so the result depends on nothing but the arguments.
pub fn mastery(times_done: usize, last_done_at: Option<NaiveDateTime>, now: NaiveDateTime) -> Mastery {
    let base: u8 = match times_done {
        0 => return Mastery::NONE,
        1..=2 => 1,
        3..=5 => 2,
        6..=9 => 3,
        10..=14 => 4,
        _ => MAX_LEVEL,
    };

    // a count without a date is treated as done just now
    let days_ago = last_done_at.map_or(0, |at| days_between(at, now));
    let decay: u8 = match days_ago {
        i64::MIN..=3 => 0,
        4..=7 => 1,
        8..=14 => 2,
        _ => 3,
    };

    Mastery(base.saturating_sub(decay))
}
