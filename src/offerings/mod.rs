//! Course offering lookup: from a course code to its current offerings and
//! the profile page the extractor reads.

pub mod discover;
pub mod parser;
