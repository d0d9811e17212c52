use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::mastery::Mastery;
use crate::models::Kata;

/// Totals across every tracked kata, shown below the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub katas: usize,
    pub total_done: usize,
    pub last_done: Option<NaiveDate>,
    pub average_mastery: Mastery,
}

impl Summary {
    pub fn from_katas(katas: &[Kata], now: NaiveDateTime) -> Self {
        Self {
            katas: katas.len(),
            total_done: katas.iter().map(Kata::times_done).sum(),
            last_done: katas.iter().filter_map(Kata::last_done).max(),
            average_mastery: Mastery::average(katas.iter().map(|k| k.mastery(now))),
        }
    }
}
