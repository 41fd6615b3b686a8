//! Small presentation helpers: date, score, and difficulty formatting, plus a
//! debouncer for interactive input.

pub mod debounce;
pub mod format;

pub use debounce::Debouncer;
pub use format::{Difficulty, Tone, format_date, format_date_time, format_score, format_time};
