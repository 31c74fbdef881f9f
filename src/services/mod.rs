pub mod aggregate;
pub mod normalizer;
pub mod writer;
