//! Scanner module: File discovery and text scanning primitives
//!
//! Responsible for walking project directories with a configurable skip
//! predicate, and for the delimiter-balanced block extraction every
//! extractor builds on.

mod blocks;
mod filter;
mod text;
mod walker;

pub use blocks::{extract_block, Block, Delimiter};
pub use filter::WalkFilter;
pub use text::{
    find_line_comment, join_snippet, leading_comments, line_number_at, mask_literals,
    relative_path,
};
pub use walker::{DiscoveredFile, Scanner};

#[cfg(test)]
mod tests;
