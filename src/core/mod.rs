pub mod text_utils;

pub use text_utils::{add_blanks_to_camel_syntax, extract_verb, split_words};
