use crate::nfa::{Automaton, State, Symbol};

use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use log::{debug, trace};

/// Bookkeeping for one run of the subset construction: which underlying states each composite
/// stands for, and the composite created for each set of underlying states.
#[derive(Debug, Default)]
struct Composites {
    members: BTreeMap<State, BTreeSet<State>>,
    by_members: BTreeMap<BTreeSet<State>, State>,
}

impl Composites {
    /// The underlying states of `targets`, looking through composites created in this run.
    fn flatten<'a, I>(&self, targets: I) -> BTreeSet<State>
    where
        I: IntoIterator<Item = &'a State>,
    {
        targets
            .into_iter()
            .flat_map(|t| match self.members.get(t) {
                Some(members) => members.iter().cloned().collect::<Vec<_>>(),
                None => iter::once(t.clone()).collect(),
            })
            .collect()
    }
}

impl Automaton {
    /// Converts the automaton into an equivalent DFA in place, using the subset construction.
    ///
    /// Epsilon transitions are eliminated first. Then, while some state has several targets on
    /// the same symbol, those targets are replaced by a single composite state that has the
    /// outgoing transitions of all of them, and accepts if any of them does. Composites are named
    /// `{a,b,...}` after the sorted names of the states they stand for; a composite standing for
    /// the same states is reused rather than created again.
    ///
    /// Does nothing if the automaton is already deterministic.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let mut a = Automaton::new(vec![("0a", "a", "1a"), ("0a", "ba", "0a"), ("1a", "ab", "1a")])
    ///     .unwrap();
    /// a.determinize();
    /// assert!(a.is_deterministic());
    /// assert!(a.accept("aba"));
    /// assert!(a.accept("a"));
    /// assert!(!a.accept("bbb"));
    /// ```
    pub fn determinize(&mut self) {
        self.eliminate_epsilon();

        let before = self.state_count();
        let mut composites = Composites::default();

        while let Some((state, symbol, targets)) = self.first_nondeterministic() {
            let members = composites.flatten(&targets);
            let composite = match composites.by_members.get(&members) {
                Some(existing) => existing.clone(),
                None => {
                    let composite = self.add_composite(&members);
                    composites
                        .members
                        .insert(composite.clone(), members.clone());
                    composites.by_members.insert(members, composite.clone());
                    composite
                }
            };

            trace!("redirecting ({}, {}) to {}", state, symbol, composite);
            self.clear_transitions(&state, symbol);
            self.add_transition(state, symbol, composite);
        }

        debug!(
            "subset construction: {} states -> {} states, {} composites",
            before,
            self.state_count(),
            composites.members.len()
        );
    }

    /// The first (state, symbol) pair with more than one target, in table order.
    fn first_nondeterministic(&self) -> Option<(State, Symbol, BTreeSet<State>)> {
        self.transition
            .into_iter()
            .find(|(_, _, targets)| targets.len() > 1)
            .map(|(state, symbol, targets)| (state.clone(), *symbol, targets.clone()))
    }

    /// Add a composite for `members` with the union of their outgoing transitions.
    fn add_composite(&mut self, members: &BTreeSet<State>) -> State {
        let names: Vec<&str> = members.iter().map(State::as_str).collect();
        let composite = self.fresh_state(format!("{{{}}}", names.join(",")));

        let outgoing: Vec<(Symbol, State)> = members
            .iter()
            .flat_map(|m| self.transitions_from(m).map(|(symbol, to)| (symbol, to.clone())))
            .collect();

        self.add_state(composite.clone());
        for (symbol, to) in outgoing {
            self.add_transition(composite.clone(), symbol, to);
        }
        if members.iter().any(|m| self.is_accepting(m)) {
            self.set_accepting(composite.clone());
        }

        composite
    }

    /// `name`, or `name` with enough `'` appended to be distinct from every existing state.
    pub(crate) fn fresh_state(&self, mut name: String) -> State {
        while self.states.contains(&State::new(name.as_str())) {
            name.push('\'');
        }
        State::new(name)
    }
}
