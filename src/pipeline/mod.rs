// Batch feature extraction over many problems.
//
// Each problem gets one representation space per configured vector space,
// all sharing the problem's corpus and one model cache. A problem that fails
// any feature is recorded as failed and skipped; the rest of the batch runs.

pub mod extract;
