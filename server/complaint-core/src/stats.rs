//! Per-status aggregation over a complaint collection.

use crate::types::{Complaint, Status, StatusCounts};

/// Count records by status. Every record adds to `total`; records with a
/// missing or unrecognized status add to no bucket.
pub fn count_by_status<'a, I>(complaints: I) -> StatusCounts
where
  I: IntoIterator<Item = &'a Complaint>,
{
  let mut counts = StatusCounts::default();
  for complaint in complaints {
    counts.total += 1;
    match complaint.status {
      Some(Status::Pending) => counts.pending += 1,
      Some(Status::Processing) => counts.processing += 1,
      Some(Status::Resolved) => counts.resolved += 1,
      Some(Status::Rejected) => counts.rejected += 1,
      Some(Status::Unknown(_)) | None => {}
    }
  }
  counts
}
