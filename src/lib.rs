//! Cricket performance aggregation engine: turns a ball-by-ball delivery log
//! into derived player statistics (batting and bowling summaries, innings
//! highlights, and breakdowns by opponent, season, venue, and match phase).
//! Pure and request-scoped: callers supply pre-joined delivery rows and the
//! engine neither fetches nor stores anything.

pub mod batting;
pub mod bowling;
pub mod breakdowns;
pub mod delivery;
pub mod highlights;
pub mod innings;
pub mod merge;
pub mod rates;
pub mod report;
pub mod sample_feed;
