//! Control-loop services
//!
//! Each service wraps one kind of decision the run driver asks for:
//!
//! | Service | Operation | Model call |
//! |---------|-----------|------------|
//! | [`GoalService`] | `generate_goal(state)` | free text |
//! | [`Orchestrator`] | `select_next_action(state)` | structured |
//! | [`Skipper`] | `should_skip(state, kind)` | structured, unless capability-gated |
//! | [`Terminator`] | `should_terminate(state)` | structured, unless the ceiling is reached |
//! | [`HistorySummarizer`] | `needs_compaction` / `compact` | token count / free text |
//! | [`RunJudge`] | `judge(problem, goal, records, content)` | structured, once per round |

pub mod goal;
pub mod judge;
pub mod orchestrator;
pub(crate) mod shared;
pub mod skipper;
pub mod summarizer;
pub mod terminator;

pub use goal::GoalService;
pub use judge::RunJudge;
pub use orchestrator::Orchestrator;
pub use skipper::Skipper;
pub use summarizer::{CompactionBackoff, HistorySummarizer};
pub use terminator::Terminator;
