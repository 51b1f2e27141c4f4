//! Track acquisition engines
//!
//! The [`TrackAcquirer`] trait is the seam between the dispatcher and
//! whatever actually fetches audio; [`YtDlpAcquirer`] is the production
//! implementation.

mod traits;
mod ytdlp;

pub use traits::{AcquireResult, TrackAcquirer};
pub use ytdlp::YtDlpAcquirer;
