pub mod calculator;

pub use calculator::{Mastery, days_between, mastery};
