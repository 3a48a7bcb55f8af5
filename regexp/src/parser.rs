use std::fmt;
use std::iter::Peekable;
use std::marker::PhantomData;
use std::str::CharIndices;

use automata::Automaton;
use log::debug;

/// Alias for [`Result`] for [`ParseError`].
pub type ParseResult<'r, T> = std::result::Result<T, ParseError<'r>>;

/// A recursive-descent parser for regular expressions of the form
///
/// ```text
/// expr    := branch ('+' branch)*
/// branch  := postfix*
/// postfix := atom '*'?
/// atom    := literal | '!' | '(' expr ')'
/// ```
///
/// so `*` binds tighter than concatenation, which binds tighter than `+` (union). `!` is the empty
/// string, and any other character is a literal. What the parser builds is decided by the
/// [ParserEngine].
#[derive(Debug)]
pub struct Parser<E>
where
    E: ParserEngine,
{
    _phantom: PhantomData<E>,
}

impl<E> Parser<E>
where
    E: ParserEngine,
{
    #[inline]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn parse<'r>(&self, expr: &'r str) -> ParseResult<'r, E::Output> {
        let mut state: ParserState<E> = ParserState::new();
        state.parse(expr)
    }
}

/// Receives the syntax of a regular expression from the parser, bottom-up, and builds the output.
pub trait ParserEngine {
    type Output;

    fn new() -> Self;

    /// A literal character.
    fn handle_char(&mut self, c: char) -> Self::Output;

    /// `!`, an empty group, or an empty expression.
    fn handle_empty(&mut self) -> Self::Output;

    fn handle_star(&mut self, inner: Self::Output) -> Self::Output;

    fn handle_concat(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output;

    fn handle_union(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output;

    /// Called once on the output for the whole expression.
    #[inline]
    fn finish(&mut self, output: Self::Output) -> Self::Output {
        output
    }
}

#[derive(Debug)]
pub struct ParserState<E>
where
    E: ParserEngine,
{
    engine: E,
}

impl<E> ParserState<E>
where
    E: ParserEngine,
{
    #[inline]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { engine: E::new() }
    }

    /// Compile a regular expresion.
    #[inline]
    pub fn parse<'r>(&mut self, expr: &'r str) -> ParseResult<'r, E::Output> {
        let input = &mut ParseInput::new(expr);
        let output = self.parse_expr(input)?;

        // Only an unmatched ')' stops parse_expr before the end.
        if input.next().is_some() {
            return Err(ParseError::UnbalancedParentheses {
                span: input.current_span(),
            });
        }

        Ok(self.engine.finish(output))
    }

    fn parse_expr<'r>(&mut self, input: &mut ParseInput<'r>) -> ParseResult<'r, E::Output> {
        let mut lhs = self.parse_branch(input)?;

        while input.peek_is('+') {
            input.next();
            let span = input.current_span();

            let l = lhs.ok_or(ParseError::MissingOperand { span })?;
            let r = self
                .parse_branch(input)?
                .ok_or(ParseError::MissingOperand { span })?;
            lhs = Some(self.engine.handle_union(l, r));
        }

        Ok(match lhs {
            Some(output) => output,
            None => self.engine.handle_empty(),
        })
    }

    /// Parse a run of implicitly concatenated terms. Returns None if there are none.
    fn parse_branch<'r>(
        &mut self,
        input: &mut ParseInput<'r>,
    ) -> ParseResult<'r, Option<E::Output>> {
        let mut lhs = None;
        while let Some(term) = self.parse_postfix(input)? {
            lhs = Some(match lhs {
                Some(l) => self.engine.handle_concat(l, term),
                None => term,
            });
        }

        Ok(lhs)
    }

    fn parse_postfix<'r>(
        &mut self,
        input: &mut ParseInput<'r>,
    ) -> ParseResult<'r, Option<E::Output>> {
        let c = match input.peek() {
            Some(&(_, c)) => c,
            None => return Ok(None),
        };

        let atom = match c {
            '+' | ')' => return Ok(None),
            '*' => {
                input.next();
                return Err(ParseError::MissingOperand {
                    span: input.current_span(),
                });
            }
            '(' => self.parse_group(input)?,
            '!' => {
                input.next();
                self.engine.handle_empty()
            }
            _ => {
                input.next();
                self.engine.handle_char(c)
            }
        };

        if input.peek_is('*') {
            input.next();
            Ok(Some(self.engine.handle_star(atom)))
        } else {
            Ok(Some(atom))
        }
    }

    fn parse_group<'r>(&mut self, input: &mut ParseInput<'r>) -> ParseResult<'r, E::Output> {
        let _lparen = input.next();
        let span = input.current_span();

        let expr = self.parse_expr(input)?;
        match input.next() {
            Some((_, ')')) => Ok(expr),
            _ => Err(ParseError::UnbalancedParentheses { span }),
        }
    }
}

struct ParseInput<'r> {
    expr: &'r str,
    input: Peekable<CharIndices<'r>>,

    next_pos: usize,
    char_pos: usize,
}

impl<'r> ParseInput<'r> {
    #[inline]
    fn new(expr: &'r str) -> Self {
        Self {
            expr,
            input: expr.char_indices().peekable(),
            next_pos: 0,
            char_pos: 0,
        }
    }

    #[inline]
    fn next(&mut self) -> Option<(usize, char)> {
        let next = self.input.next();
        if let Some((char_pos, _)) = next {
            self.next_pos += 1;
            self.char_pos = char_pos;
        }

        next
    }

    #[inline]
    fn peek(&mut self) -> Option<&(usize, char)> {
        self.input.peek()
    }

    #[inline]
    fn peek_is(&mut self, expected: char) -> bool {
        match self.peek() {
            Some(peeked) => peeked.1 == expected,
            None => false,
        }
    }

    /// The span of the last character consumed.
    #[inline]
    fn current_span(&mut self) -> Span<'r> {
        let pos = if self.next_pos == 0 {
            0
        } else {
            self.next_pos - 1
        };

        let text = match self.input.peek() {
            Some((end, _)) => &self.expr[self.char_pos..*end],
            None => &self.expr[self.char_pos..],
        };

        Span::new(pos, pos + 1, text)
    }
}

/// Error returned when attempting to parse an invalid regular expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError<'r> {
    /// A `(` is never closed, or a `)` has no matching `(`.
    #[error("unbalanced parentheses at {span}")]
    UnbalancedParentheses { span: Span<'r> },
    /// An operator is missing an operand, e.g. `*a`, `a**`, `+a` or `a+`.
    #[error("missing operand at {span}")]
    MissingOperand { span: Span<'r> },
}

impl<'r> ParseError<'r> {
    #[inline]
    pub fn span(&self) -> Span<'r> {
        match *self {
            Self::UnbalancedParentheses { span } | Self::MissingOperand { span } => span,
        }
    }
}

/// A range of character positions in the expression, with the text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'r> {
    start: usize,
    end: usize,

    text: &'r str,
}

impl<'r> Span<'r> {
    #[inline]
    pub fn new(start: usize, end: usize, text: &'r str) -> Self {
        Self { start, end, text }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn text(&self) -> &'r str {
        self.text
    }
}

impl fmt::Display for Span<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {} (`{}`)", self.start, self.text)
    }
}

pub type NFAParser = Parser<NFAParserEngine>;

/// A regular expression parser that produces an NFA that describes the same language as the
/// regular expression, by Thompson's construction over the set operations of [Automaton]. The
/// finished NFA has its states renamed to short numeric names.
#[derive(Debug)]
pub struct NFAParserEngine {
    /// Number of automata combined so far, for logging.
    combined: usize,
}

impl ParserEngine for NFAParserEngine {
    type Output = Automaton;

    #[inline]
    fn new() -> Self {
        Self { combined: 0 }
    }

    #[inline]
    fn handle_char(&mut self, c: char) -> Self::Output {
        Automaton::new_symbol(c)
    }

    #[inline]
    fn handle_empty(&mut self) -> Self::Output {
        Automaton::new_epsilon()
    }

    #[inline]
    fn handle_star(&mut self, inner: Self::Output) -> Self::Output {
        self.combined += 1;
        Automaton::kleene(&inner)
    }

    #[inline]
    fn handle_concat(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output {
        self.combined += 1;
        // One spliced copy of rhs instead of one per accepting state of lhs.
        Automaton::concat(&lhs.single_accepting(), &rhs)
    }

    #[inline]
    fn handle_union(&mut self, lhs: Self::Output, rhs: Self::Output) -> Self::Output {
        self.combined += 1;
        Automaton::union(&lhs, &rhs)
    }

    fn finish(&mut self, mut output: Self::Output) -> Self::Output {
        output.rename();
        debug!(
            "compiled regular expression with {} operations into {} states",
            self.combined,
            output.state_count()
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders the parse with explicit grouping, to check precedence.
    struct Printer;

    impl ParserEngine for Printer {
        type Output = String;

        fn new() -> Self {
            Printer
        }

        fn handle_char(&mut self, c: char) -> String {
            c.to_string()
        }

        fn handle_empty(&mut self) -> String {
            "!".to_owned()
        }

        fn handle_star(&mut self, inner: String) -> String {
            format!("{}*", inner)
        }

        fn handle_concat(&mut self, lhs: String, rhs: String) -> String {
            format!("[{}{}]", lhs, rhs)
        }

        fn handle_union(&mut self, lhs: String, rhs: String) -> String {
            format!("<{}+{}>", lhs, rhs)
        }
    }

    fn print(expr: &str) -> String {
        Parser::<Printer>::new().parse(expr).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!("<a+b>", print("a+b"));
        assert_eq!("[a*b]", print("a*b"));
        assert_eq!("<[ab]+c*>", print("ab+c*"));
        assert_eq!("<<a+b>+c>", print("a+b+c"));
        assert_eq!("[[ab]c]", print("abc"));
        assert_eq!("[ab]*", print("(ab)*"));
        assert_eq!("[[<!+a>b]c]", print("(!+a)bc"));
    }

    #[test]
    fn test_empty() {
        assert_eq!("!", print(""));
        assert_eq!("!", print("()"));
        assert_eq!("[!a]", print("()a"));
    }

    #[test]
    fn test_error_spans() {
        let parser = Parser::<Printer>::new();

        let err = parser.parse("ab)").unwrap_err();
        assert!(matches!(err, ParseError::UnbalancedParentheses { .. }));
        assert_eq!(2, err.span().start());

        let err = parser.parse("a(b").unwrap_err();
        assert!(matches!(err, ParseError::UnbalancedParentheses { .. }));
        assert_eq!(1, err.span().start());

        let err = parser.parse("a**").unwrap_err();
        assert!(matches!(err, ParseError::MissingOperand { .. }));
        assert_eq!(2, err.span().start());
        assert_eq!("*", err.span().text());

        let err = parser.parse("a+").unwrap_err();
        assert_eq!(ParseError::MissingOperand { span: Span::new(1, 2, "+") }, err);
    }
}
