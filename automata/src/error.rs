/// Alias for [`Result`] for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned when an automaton cannot be built from the given input.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// No transition entries were given, so there is no start state to derive.
    #[error("malformed input: at least one transition entry is required")]
    Empty,
}
