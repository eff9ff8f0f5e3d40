// Quill: stylometric and vector-space features for authorship verification
//
// This is the library root. `space` and `style` are the numeric core; the
// remaining modules load problems from disk, drive batches and print results.

pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod problem;
pub mod space;
pub mod style;
