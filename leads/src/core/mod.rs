//! Pure engines of the write path: validation, diffing, and the CSV
//! boundary codec. Nothing in here performs I/O.

pub mod csv;
pub mod diff;
pub mod validation;
