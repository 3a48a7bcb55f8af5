use crate::nfa::{Automaton, State, Symbol};

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

impl Automaton {
    /// Removes every epsilon transition in place without changing the accepted language.
    ///
    /// States on a common epsilon cycle accept the same language and are merged into one. Every
    /// remaining `(us, ε, them)` is then dropped after `us` inherits the transitions and accept
    /// status of everything in its epsilon-closure. States left unreachable once their incoming
    /// epsilon transitions are gone are removed, so they read as merged into their predecessors.
    ///
    /// Does nothing if there are no epsilon transitions.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let mut n = Automaton::new(vec![
    ///     ("0", "a", "1"), ("0", "ba", "0"), ("1", "ab", "1"), ("0", "ε", "1"), ("1", "b", "2"),
    /// ]).unwrap();
    /// n.eliminate_epsilon();
    /// assert!(!n.has_epsilon_transitions());
    /// assert!(n.accept("aaab"));
    /// assert!(!n.accept("ababababa"));
    /// ```
    pub fn eliminate_epsilon(&mut self) {
        if !self.has_epsilon_transitions() {
            return;
        }

        let before = self.state_count();
        self.merge_epsilon_cycles();

        let closures: BTreeMap<State, BTreeSet<State>> = self
            .states
            .iter()
            .map(|s| {
                let closure = self.epsilon_closure(s).into_iter().cloned().collect();
                (s.clone(), closure)
            })
            .collect();

        let mut eliminated = Automaton::with_start(self.start.clone());
        for (us, closure) in closures.iter() {
            eliminated.add_state(us.clone());
            for them in closure {
                // Move their transitions to ourself.
                for (symbol, to) in self.transitions_from(them) {
                    if !symbol.is_epsilon() {
                        eliminated.add_transition(us.clone(), symbol, to.clone());
                    }
                }

                // Inherit their other properties.
                if self.is_accepting(them) {
                    eliminated.set_accepting(us.clone());
                }
            }
        }

        let absorbed: BTreeSet<State> = self
            .transition
            .into_iter()
            .filter(|(_, symbol, _)| symbol.is_epsilon())
            .flat_map(|(_, _, targets)| targets.iter().cloned())
            .collect();
        eliminated.remove_unreachable(&absorbed);

        debug!(
            "epsilon elimination: {} states -> {} states",
            before,
            eliminated.state_count()
        );
        *self = eliminated;
    }

    /// Merge every group of states that reach each other on epsilon transitions. The start state
    /// represents its own group; other groups are represented by their least state.
    fn merge_epsilon_cycles(&mut self) {
        let closures: BTreeMap<&State, BTreeSet<&State>> = self
            .states
            .iter()
            .map(|s| (s, self.epsilon_closure(s)))
            .collect();

        let mut representative: BTreeMap<State, State> = BTreeMap::new();
        for (&us, closure) in closures.iter() {
            let mut group: Vec<&State> = closure
                .iter()
                .copied()
                .filter(|them| closures.get(them).map_or(false, |c| c.contains(us)))
                .collect();
            if group.len() < 2 {
                continue;
            }

            group.sort_by_key(|s| (**s != self.start, *s));
            trace!("merging epsilon cycle {:?} into {}", group, group[0]);
            representative.insert(us.clone(), group[0].clone());
        }

        if !representative.is_empty() {
            let merged =
                self.map_states(|s| representative.get(s).cloned().unwrap_or_else(|| s.clone()));
            *self = merged;
            self.drop_epsilon_self_loops();
        }
    }

    fn drop_epsilon_self_loops(&mut self) {
        let loops: Vec<State> = self
            .transition
            .into_iter()
            .filter(|(from, symbol, targets)| symbol.is_epsilon() && targets.contains(*from))
            .map(|(from, _, _)| from.clone())
            .collect();

        for state in loops {
            let rest: Vec<State> = self
                .epsilon_targets(&state)
                .filter(|to| **to != state)
                .cloned()
                .collect();
            self.clear_transitions(&state, Symbol::Epsilon);
            for to in rest {
                self.add_transition(state.clone(), Symbol::Epsilon, to);
            }
        }
    }

    /// Remove the given states, with their transitions, if they cannot be reached from the start
    /// state.
    pub(crate) fn remove_unreachable(&mut self, candidates: &BTreeSet<State>) {
        let unreachable: BTreeSet<State> = {
            let reachable = self.reachable();
            candidates
                .iter()
                .filter(|s| self.states.contains(*s) && !reachable.contains(s))
                .cloned()
                .collect()
        };
        if unreachable.is_empty() {
            return;
        }

        let mut kept = Automaton::with_start(self.start.clone());
        for state in self.states.iter().filter(|s| !unreachable.contains(*s)) {
            kept.add_state(state.clone());
            if self.is_accepting(state) {
                kept.set_accepting(state.clone());
            }
            for (symbol, to) in self.transitions_from(state) {
                if !unreachable.contains(to) {
                    kept.add_transition(state.clone(), symbol, to.clone());
                }
            }
        }
        *self = kept;
    }
}
