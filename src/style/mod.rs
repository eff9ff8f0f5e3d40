// Stylometry: writing-style measurements taken straight from raw text, and
// their assembly into per-problem feature vectors.

pub mod assembler;
pub mod features;
