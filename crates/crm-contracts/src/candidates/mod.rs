//! Candidate contracts
//!
//! Applications come from anonymous applicants and are only checked for
//! shape. Reviews (approve/reject) are reserved to administrators.

mod application;
mod review;

pub use application::ApplicationContract;
pub use review::ReviewCandidateContract;
