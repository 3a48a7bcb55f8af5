//! A renderer-agnostic listing of an automaton, for exporters that draw diagrams or write
//! interchange formats. Nothing here knows about any output format.

use crate::nfa::{Automaton, State, Symbol};

use std::collections::BTreeMap;

/// A state with the integer id assigned to it by [Automaton::listing].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateEntry {
    pub id: usize,
    pub name: State,
    pub initial: bool,
    pub accepting: bool,
}

/// A transition between listed states, referring to them by id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransitionEntry {
    pub from: usize,
    pub symbol: Symbol,
    pub to: usize,
}

/// Every state and transition of an automaton. Ids are assigned in sorted state order, so the
/// same automaton always produces the same listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    pub states: Vec<StateEntry>,
    pub transitions: Vec<TransitionEntry>,
}

impl Listing {
    /// The entry of the start state.
    #[inline]
    pub fn initial(&self) -> Option<&StateEntry> {
        self.states.iter().find(|s| s.initial)
    }

    #[inline]
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.states.iter().find(|s| s.name == name).map(|s| s.id)
    }
}

impl Automaton {
    pub fn listing(&self) -> Listing {
        let ids: BTreeMap<&State, usize> = self
            .states
            .iter()
            .enumerate()
            .map(|(id, state)| (state, id))
            .collect();

        let states = ids
            .iter()
            .map(|(&state, &id)| StateEntry {
                id,
                name: state.clone(),
                initial: *state == self.start,
                accepting: self.is_accepting(state),
            })
            .collect();

        let ids = &ids;
        let transitions = self
            .transition
            .into_iter()
            .flat_map(move |(from, symbol, targets)| {
                targets.iter().filter_map(move |to| {
                    Some(TransitionEntry {
                        from: *ids.get(from)?,
                        symbol: *symbol,
                        to: *ids.get(to)?,
                    })
                })
            })
            .collect();

        Listing {
            states,
            transitions,
        }
    }
}
