use crate::error::{Error, Result};
use crate::table::Table;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use im::OrdSet;

/// The character that stands for an epsilon transition in construction input.
pub const EPSILON: char = 'ε';

/// An opaque state identifier. Combinators build new names out of the names of their operands,
/// but names are never parsed back into structure.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct State(String);

impl State {
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A copy of this state with `tag` prepended to its name.
    #[inline]
    pub(crate) fn tagged(&self, tag: &str) -> Self {
        Self(format!("{}{}", tag, self.0))
    }
}

impl From<&str> for State {
    #[inline]
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for State {
    #[inline]
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&State> for State {
    #[inline]
    fn from(state: &State) -> Self {
        state.clone()
    }
}

impl PartialEq<str> for State {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for State {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for State {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The label of a transition.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Symbol {
    /// A transition on some input symbol.
    Char(char),
    /// An epsilon transition allows the automaton to change its state spontaneously without
    /// consuming an input symbol.
    Epsilon,
}

impl Symbol {
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        *self == Symbol::Epsilon
    }
}

impl From<char> for Symbol {
    /// [EPSILON] is reserved and maps to [Symbol::Epsilon].
    #[inline]
    fn from(c: char) -> Self {
        if c == EPSILON {
            Symbol::Epsilon
        } else {
            Symbol::Char(c)
        }
    }
}

impl fmt::Display for Symbol {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::Epsilon => write!(f, "{}", EPSILON),
        }
    }
}

/// A single edge of the transition relation.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Transition {
    pub from: State,
    pub symbol: Symbol,
    pub to: State,
}

/// A finite automaton. The transition relation may hold several targets for the same state and
/// symbol, as well as epsilon transitions; whether a given automaton is deterministic is a derived
/// property (see [Automaton::is_deterministic]).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Automaton {
    /// An automaton has a single start state.
    pub(crate) start: State,
    /// Every state, including those that no transition touches.
    pub(crate) states: OrdSet<State>,
    /// The set of accepting states.
    pub(crate) accepting: OrdSet<State>,
    /// A lookup table for transitions between states. Target sets are never empty.
    pub(crate) transition: Table<State, Symbol, BTreeSet<State>>,
}

impl Automaton {
    /// Build an automaton from `(from, symbols, to)` entries, adding one transition for every
    /// character of `symbols`. The start state is the first entry's source and the only accepting
    /// state is the last entry's target; use [Automaton::builder] to override either.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let dfa = Automaton::new(vec![("q0", "b", "q0"), ("q0", "a", "q1")]).unwrap();
    /// assert!(dfa.accept("a"));
    /// assert!(dfa.accept("bba"));
    /// assert!(!dfa.accept("b"));
    /// ```
    #[inline]
    pub fn new<I, F, S, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, S, T)>,
        F: Into<State>,
        S: AsRef<str>,
        T: Into<State>,
    {
        entries
            .into_iter()
            .fold(Self::builder(), |builder, (from, symbols, to)| {
                builder.transition(from, symbols, to)
            })
            .build()
    }

    #[inline]
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Create a two-state automaton, `0` and accepting `1`, with a single transition between them.
    #[inline]
    pub fn new_symbol<S: Into<Symbol>>(symbol: S) -> Self {
        let mut nfa = Automaton::with_start(State::from("0"));
        let accepting_state = State::from("1");
        nfa.set_accepting(accepting_state.clone());
        nfa.add_transition(nfa.start.clone(), symbol.into(), accepting_state);
        nfa
    }

    /// Create a two-state automaton with an epsilon transition from the start state to the
    /// accepting state. It accepts only the empty string.
    #[inline]
    pub fn new_epsilon() -> Self {
        Self::new_symbol(Symbol::Epsilon)
    }

    /// An automaton with only a start state and no transitions.
    #[inline]
    pub(crate) fn with_start(start: State) -> Self {
        let mut states = OrdSet::new();
        states.insert(start.clone());
        Self {
            start,
            states,
            accepting: OrdSet::new(),
            transition: Table::new(),
        }
    }

    #[inline]
    pub(crate) fn add_state(&mut self, state: State) {
        self.states.insert(state);
    }

    #[inline]
    pub(crate) fn set_accepting(&mut self, state: State) {
        self.states.insert(state.clone());
        self.accepting.insert(state);
    }

    /// Add a transition, adding its endpoints to the state set if necessary.
    #[inline]
    pub(crate) fn add_transition(&mut self, from: State, symbol: Symbol, to: State) {
        self.states.insert(from.clone());
        self.states.insert(to.clone());

        let mut targets = BTreeSet::new();
        targets.insert(to.clone());
        self.transition.set_or(from, symbol, targets, |v| {
            v.insert(to);
        });
    }

    /// Remove all transitions from `from` on `symbol`.
    #[inline]
    pub(crate) fn clear_transitions(&mut self, from: &State, symbol: Symbol) {
        self.transition.remove(from, &symbol);
    }

    /// Rebuild the automaton with every state renamed through `f`. States that `f` maps to the
    /// same name are merged.
    pub(crate) fn map_states<F>(&self, mut f: F) -> Automaton
    where
        F: FnMut(&State) -> State,
    {
        let mut mapped = Automaton::with_start(f(&self.start));
        for state in self.states.iter() {
            mapped.add_state(f(state));
        }
        for state in self.accepting.iter() {
            mapped.set_accepting(f(state));
        }
        for (from, symbol, targets) in &self.transition {
            for to in targets {
                mapped.add_transition(f(from), *symbol, f(to));
            }
        }
        mapped
    }

    /// A copy with every state name prefixed by `tag`.
    #[inline]
    pub(crate) fn tagged(&self, tag: &str) -> Automaton {
        self.map_states(|s| s.tagged(tag))
    }
}

impl Automaton {
    #[inline]
    pub fn start(&self) -> &State {
        &self.start
    }

    /// All states, in sorted order.
    #[inline]
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter()
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Accepting states, in sorted order.
    #[inline]
    pub fn accepting(&self) -> impl Iterator<Item = &State> + '_ {
        self.accepting.iter()
    }

    #[inline]
    pub fn is_accepting(&self, state: &State) -> bool {
        self.accepting.contains(state)
    }

    /// The symbols appearing on non-epsilon transitions.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.transition
            .into_iter()
            .filter_map(|(_, symbol, _)| match symbol {
                Symbol::Char(c) => Some(*c),
                Symbol::Epsilon => None,
            })
            .collect()
    }

    /// Every transition, ordered by source, symbol and target.
    pub fn transitions(&self) -> Vec<Transition> {
        self.transition
            .into_iter()
            .flat_map(|(from, symbol, targets)| {
                targets.iter().map(move |to| Transition {
                    from: from.clone(),
                    symbol: *symbol,
                    to: to.clone(),
                })
            })
            .collect()
    }

    /// The targets of `state` on `symbol`, in sorted order. A state with no such transition
    /// yields nothing.
    #[inline]
    pub fn transitions_on<S>(&self, state: &State, symbol: S) -> impl Iterator<Item = &State> + '_
    where
        S: Into<Symbol>,
    {
        self.transition
            .get(state, &symbol.into())
            .into_iter()
            .flat_map(|targets| targets.iter())
    }

    /// The targets of `state` on epsilon transitions.
    #[inline]
    pub fn epsilon_targets(&self, state: &State) -> impl Iterator<Item = &State> + '_ {
        self.transitions_on(state, Symbol::Epsilon)
    }

    /// The outgoing transitions of `state` as (symbol, target) pairs.
    #[inline]
    pub fn transitions_from(&self, state: &State) -> impl Iterator<Item = (Symbol, &State)> + '_ {
        self.transition
            .get_row(state)
            .flat_map(|(symbol, targets)| targets.iter().map(move |to| (*symbol, to)))
    }

    #[inline]
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transition
            .into_iter()
            .any(|(_, symbol, _)| symbol.is_epsilon())
    }

    /// Whether the automaton is a DFA: no epsilon transitions, and at most one target for every
    /// state and symbol.
    #[inline]
    pub fn is_deterministic(&self) -> bool {
        self.transition
            .into_iter()
            .all(|(_, symbol, targets)| !symbol.is_epsilon() && targets.len() <= 1)
    }

    /// The states reachable from the start state, including the start state.
    pub fn reachable(&self) -> BTreeSet<&State> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![&self.start];
        while let Some(state) = stack.pop() {
            if seen.insert(state) {
                stack.extend(self.transitions_from(state).map(|(_, to)| to));
            }
        }
        seen
    }

    /// Shortens state names.
    ///
    /// Combinators build long names out of the names of their operands. This reassigns every
    /// state a numeric name following the sorted order of the current names.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let mut n = Automaton::new(vec![("big", "a", "names")]).unwrap();
    /// n.rename();
    /// assert_eq!(n.start(), "0");
    /// assert!(n.is_accepting(&"1".into()));
    /// ```
    pub fn rename(&mut self) {
        let ids: BTreeMap<State, State> = self
            .states
            .iter()
            .enumerate()
            .map(|(i, state)| (state.clone(), State::from(i.to_string())))
            .collect();
        *self = self.map_states(|s| ids.get(s).cloned().unwrap_or_else(|| s.clone()));
    }
}

/// Builds an [Automaton] from transition entries, with optional start and accept overrides.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    entries: Vec<(State, String, State)>,
    start: Option<State>,
    accepting: Option<Vec<State>>,
}

impl Builder {
    /// Add one transition from `from` to `to` for every character of `symbols`. [EPSILON] adds an
    /// epsilon transition.
    #[inline]
    pub fn transition<F, S, T>(mut self, from: F, symbols: S, to: T) -> Self
    where
        F: Into<State>,
        S: AsRef<str>,
        T: Into<State>,
    {
        self.entries
            .push((from.into(), symbols.as_ref().to_owned(), to.into()));
        self
    }

    /// Override the start state.
    #[inline]
    pub fn start<S: Into<State>>(mut self, state: S) -> Self {
        self.start = Some(state.into());
        self
    }

    /// Override the set of accepting states. An empty set is honored.
    #[inline]
    pub fn accepting<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.accepting = Some(states.into_iter().map(Into::into).collect());
        self
    }

    /// Fails with [Error::Empty] if no transition entry was given.
    pub fn build(self) -> Result<Automaton> {
        let (first, last) = match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => (first.0.clone(), last.2.clone()),
            _ => return Err(Error::Empty),
        };

        let mut automaton = Automaton::with_start(self.start.unwrap_or(first));
        for (from, symbols, to) in self.entries {
            automaton.add_state(from.clone());
            automaton.add_state(to.clone());
            for c in symbols.chars() {
                automaton.add_transition(from.clone(), c.into(), to.clone());
            }
        }

        for state in self.accepting.unwrap_or_else(|| vec![last]) {
            automaton.set_accepting(state);
        }

        Ok(automaton)
    }
}
