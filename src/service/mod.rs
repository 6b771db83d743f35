//! The MPI entry-point services: batch matching, strict linking, and
//! asynchronous trace submission.

mod linkage;
mod matching;
mod trace_submission;

pub use linkage::LinkageService;
pub use matching::MatchingService;
pub use trace_submission::AsyncTraceSubmissionService;
