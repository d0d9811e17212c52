pub mod kata;
pub mod stats;

pub use kata::{DATE_FORMAT, Kata, NewKata};
pub use stats::Summary;
