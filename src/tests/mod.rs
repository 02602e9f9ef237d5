pub mod common;
pub mod serve_over_stdio;
