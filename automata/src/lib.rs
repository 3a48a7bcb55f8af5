#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod accept;
mod email;
mod epsilon;
mod error;
mod ops;

pub mod convert;
pub mod export;
pub mod nfa;
pub mod table;

pub use error::{Error, Result};
pub use export::Listing;
pub use nfa::{Automaton, Builder, State, Symbol, Transition, EPSILON};
