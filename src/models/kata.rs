use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::mastery::{self, Mastery};

/// Storage format for completion dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recurring programming exercise and the days it was done on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kata {
    pub id: i64,
    pub name: String,
    pub url: String,
    /// Completion dates, oldest first.
    pub done: Vec<NaiveDate>,
}

impl Kata {
    pub fn times_done(&self) -> usize {
        self.done.len()
    }

    pub fn last_done(&self) -> Option<NaiveDate> {
        self.done.iter().max().copied()
    }

    /// Start of the day of the latest completion.
    pub fn last_done_at(&self) -> Option<NaiveDateTime> {
        self.last_done().map(|d| d.and_time(NaiveTime::MIN))
    }

    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.done.contains(&date)
    }

    pub fn days_since_last(&self, now: NaiveDateTime) -> Option<i64> {
        self.last_done_at().map(|at| mastery::days_between(at, now))
    }

    pub fn mastery(&self, now: NaiveDateTime) -> Mastery {
        mastery::mastery(self.times_done(), self.last_done_at(), now)
    }
}

/// A kata as listed in the built-in defaults or added from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKata {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn kata(done: Vec<NaiveDate>) -> Kata {
        Kata {
            id: 1,
            name: "bowling".to_string(),
            url: "https://example.com/bowling".to_string(),
            done,
        }
    }

    #[test]
    fn empty_history() {
        let k = kata(vec![]);
        assert_eq!(k.times_done(), 0);
        assert_eq!(k.last_done(), None);
        assert_eq!(k.days_since_last(date(5, 1).and_time(NaiveTime::MIN)), None);
        assert_eq!(k.mastery(date(5, 1).and_time(NaiveTime::MIN)), Mastery::NONE);
    }

    #[test]
    fn derives_inputs_from_history() {
        let k = kata(vec![date(4, 1), date(4, 20), date(4, 28)]);
        let now = date(5, 1).and_hms_opt(18, 30, 0).unwrap();

        assert_eq!(k.times_done(), 3);
        assert_eq!(k.last_done(), Some(date(4, 28)));
        assert_eq!(k.days_since_last(now), Some(3));
        assert_eq!(k.mastery(now).level(), 2);
        assert!(k.is_done_on(date(4, 20)));
        assert!(!k.is_done_on(date(4, 21)));
    }

    #[test]
    fn last_done_is_latest_date() {
        let k = kata(vec![date(4, 28), date(4, 1)]);
        assert_eq!(k.last_done(), Some(date(4, 28)));
    }
}
