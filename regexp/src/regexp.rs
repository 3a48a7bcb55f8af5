use crate::parser::{NFAParser, ParseResult};

use automata::Automaton;

pub use crate::parser::{ParseError, Span};

/// Compile a regular expression into an NFA. See [Parser](crate::parser::Parser) for the syntax.
///
/// ```
/// let nfa = regexp::from_regex("a*b").unwrap();
/// assert!(nfa.accept("aab"));
/// assert!(!nfa.accept("a"));
/// ```
#[inline]
pub fn from_regex(expr: &str) -> ParseResult<'_, Automaton> {
    NFAParser::new().parse(expr)
}

/// A compiled regular expression for matching strings. It may be used to determine if given
/// strings are within the language described by the regular expression.
#[derive(Clone, Debug)]
pub struct RegExp {
    /// The regular expression represented by this structure.
    expr: String,
    /// The compiled automaton used to evaluate input strings.
    automaton: Automaton,
}

impl RegExp {
    /// Create a compiled regular expression that uses a DFA to evaluate input strings.
    #[inline]
    pub fn new(expr: &str) -> ParseResult<'_, Self> {
        Ok(RegExp::new_nfa(expr)?.with_dfa())
    }

    /// Create a compiled regular expression that uses an NFA to evaluate input strings.
    #[inline]
    pub fn new_nfa(expr: &str) -> ParseResult<'_, Self> {
        Ok(RegExp {
            expr: expr.to_owned(),
            automaton: from_regex(expr)?,
        })
    }

    #[inline]
    pub fn with_dfa(mut self) -> Self {
        self.automaton.determinize();
        self
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.expr
    }

    #[inline]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    #[inline]
    pub fn into_automaton(self) -> Automaton {
        self.automaton
    }

    /// Determine if the given input string is within the language described by the regular
    /// expression.
    #[inline]
    pub fn is_match(&self, input: &str) -> bool {
        self.automaton.is_match(input)
    }
}
