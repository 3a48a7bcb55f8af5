use crate::nfa::{Automaton, State};

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";

impl Automaton {
    /// A DFA that operates as a simple email address validator: a user name, `@`, then dot
    /// separated domain labels ending in a top-level domain of two or three characters.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let ev = Automaton::email_validator();
    /// assert!(ev.accept("abc@dsu.edu"));
    /// assert!(!ev.accept("ab@ab.abcd"));
    /// ```
    pub fn email_validator() -> Automaton {
        let word = format!("{}{}", LOWER, DIGITS);
        let word = word.as_str();
        let table = [
            ("start", word, "username"),
            ("username", word, "username"),
            ("username", "@", "@"),
            ("@", word, "domain"),
            ("domain", word, "domain"),
            ("domain", ".", "tld length 0"),
            ("tld length 0", word, "tld length 1"),
            ("tld length 1", word, "tld length 2"),
            ("tld length 1", ".", "tld length 0"),
            ("tld length 2", word, "tld length 3"),
            ("tld length 2", ".", "tld length 0"),
            ("tld length 3", word, "domain"),
            ("tld length 3", ".", "tld length 0"),
        ];

        let mut automaton = Automaton::with_start(State::from("start"));
        for &(from, symbols, to) in table.iter() {
            for c in symbols.chars() {
                automaton.add_transition(from.into(), c.into(), to.into());
            }
        }
        automaton.set_accepting("tld length 2".into());
        automaton.set_accepting("tld length 3".into());

        automaton
    }
}
