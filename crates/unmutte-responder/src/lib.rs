//! Unmutte responder
//!
//! Canned, non-judgemental replies for the chat endpoint plus the keyword
//! heuristic that decides how heavy a message reads. Both are pure and
//! deterministic; a hosted model would replace `reply` wholesale.

pub mod intensity;
pub mod reply;

pub use intensity::estimate_intensity;
pub use reply::{generate_reply, suggest_break};
