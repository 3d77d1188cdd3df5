//! Change-list validators.
//!
//! Every validator takes the loaded corpus and returns a report; none of
//! them touch the file system.

pub mod hygiene;
pub mod laws;
pub mod rdf;
pub mod replay;
