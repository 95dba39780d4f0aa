//! Message rendering: ANSI colors, text normalization, and the bounded-time
//! syntax colorizer shared by the console and HTML facilities.

pub mod color;
pub mod colorize;
pub mod normalize;

pub use color::Color;
pub use colorize::{DeadlineExceeded, LineScan, TokenClass};
pub use normalize::{
    escape_html, flatten_message, normalize_for_html, normalize_for_terminal, normalize_newlines,
    split_lines,
};
