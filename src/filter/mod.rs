pub mod matcher;

pub use matcher::{filter_entries, wildcard_match};
