//! Message formatting pipeline.
//!
//! Raw entry text flows through three stages:
//! - `escape`: neutralize markup-significant characters
//! - `block`: headings, bullet lists and line breaks, line by line
//! - `inline`: strong/emphasis markers within a single line
//!
//! `plain` inverts the output dialect for terminal display.

mod block;
mod escape;
mod inline;
mod plain;

pub use block::{format_block, format_message};
pub use escape::escape_html;
pub use inline::format_inline;
pub use plain::to_plain_text;
