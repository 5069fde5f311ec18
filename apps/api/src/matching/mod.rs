// Job matching core.
// Implements: lexicon tables, CV fact extraction, TF-IDF ranking, weighted scoring.
// The algorithms are synchronous and CPU-only; only `service` and `handlers` touch the store.

pub mod extractor;
pub mod format;
pub mod handlers;
pub mod lexicon;
pub mod scorer;
pub mod service;
pub mod tfidf;
