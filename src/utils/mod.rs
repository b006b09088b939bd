mod file_utils;
mod regex_patterns;

pub use file_utils::*;
pub use regex_patterns::*;
