//! Search orchestrator: concurrent fan-out, then dedup and ranking.
//!
//! [`dispatch`] queries every provider concurrently and concatenates what
//! comes back; [`rank`] collapses duplicate URLs, sorts by score and
//! truncates to [`rank::MAX_RANKED_RESULTS`].

pub mod dispatch;
pub mod rank;

pub use dispatch::dispatch;
pub use rank::{rank, rank_with_limit, MAX_RANKED_RESULTS};
