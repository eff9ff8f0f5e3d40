// Vector space representations: n-gram TF-IDF models, their cache, and the
// per-problem similarity statistics built on top of them.

pub mod cache;
pub mod config;
pub mod corpus;
pub mod model;
pub mod representation;
pub mod similarity;
pub mod tokenize;
