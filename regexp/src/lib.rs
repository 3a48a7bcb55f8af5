#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod regexp;

pub mod parser;

pub use automata;
pub use regexp::*;
