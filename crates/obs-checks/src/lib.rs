#![deny(missing_docs)]
#![doc = "Ready-made predicate builders for values, strings, sequences, maps, channels and errors."]

/// Builders over single values.
pub mod base;
/// Builders over channel buffers.
pub mod channels;
/// Builders over error values and fallible or panicking calls.
pub mod errors;
/// Builders over hash maps.
pub mod maps;
/// Builders over sequences.
pub mod slices;
/// Builders over strings and patterns.
pub mod strings;

mod shared;

pub use base::{deep_equal, equal, none, returns, some, zero};
pub use channels::{channel_length, Buffered};
pub use errors::{error_is, errors, errors_with, panics};
pub use maps::{contains_key, contains_value, map_equal, map_length};
pub use slices::{contains, elements_match, empty, length, sequence_equal};
pub use strings::{
    char_length, contains_substring, empty_string, equal_fold, has_prefix, has_suffix, matches,
    matches_pattern, string_length,
};
