//! Evaluation domain
//!
//! Scores given by a judge model to a finished run, and how several rounds
//! of scoring are merged into one verdict.

pub mod judgment;

pub use judgment::{JUDGMENT_SCORE_MAX, JUDGMENT_SCORE_MIN, Judgment};
