use crate::nfa::{Automaton, State, Symbol};

use std::collections::{BTreeSet, HashSet};

impl Automaton {
    /// Determines if the given input is accepted, starting from the start state.
    ///
    /// This is a depth-first search over every nondeterministic path and takes exponential time in
    /// the worst case; [Automaton::is_match] is the linear alternative and always agrees with it.
    /// The search keeps its own stack, so long inputs do not exhaust the thread's stack.
    #[inline]
    pub fn accept(&self, input: &str) -> bool {
        self.accept_from(input, &self.start)
    }

    /// Determines if the given input is accepted, starting from `state`.
    pub fn accept_from(&self, input: &str, state: &State) -> bool {
        let input: Vec<char> = input.chars().collect();
        let mut search = Search {
            automaton: self,
            input: &input,
            failed: HashSet::new(),
            passes: Vec::new(),
            stack: Vec::new(),
        };
        search.run(state)
    }

    /// Determines if the given input is accepted by simulating the set of current states.
    pub fn is_match(&self, input: &str) -> bool {
        let mut state_set = self.epsilon_closure(&self.start);

        for c in input.chars() {
            let moved_set = self.move_set(&state_set, c);
            state_set = self.epsilon_closure_set(moved_set);
            if state_set.is_empty() {
                return false;
            }
        }

        state_set.iter().any(|s| self.is_accepting(s))
    }

    /// Computes the epsilon-closure of a state: every state reachable from it on epsilon
    /// transitions only, including itself.
    #[inline]
    pub fn epsilon_closure<'a>(&'a self, state: &'a State) -> BTreeSet<&'a State> {
        self.epsilon_closure_set(std::iter::once(state))
    }

    /// Computes the union of epsilon-closures for each state in the given set of states.
    pub fn epsilon_closure_set<'a, I>(&'a self, states: I) -> BTreeSet<&'a State>
    where
        I: IntoIterator<Item = &'a State>,
    {
        let mut closure = BTreeSet::new();
        let mut stack: Vec<_> = states.into_iter().collect();
        while let Some(state) = stack.pop() {
            if closure.insert(state) {
                stack.extend(self.epsilon_targets(state));
            }
        }
        closure
    }

    #[inline]
    fn move_set<'a>(&'a self, state_set: &BTreeSet<&'a State>, c: char) -> BTreeSet<&'a State> {
        state_set
            .iter()
            .flat_map(|state| self.transitions_on(state, Symbol::Char(c)))
            .collect()
    }
}

struct Search<'a> {
    automaton: &'a Automaton,
    input: &'a [char],
    /// (state, position) pairs already known to reject. Only failures are recorded: any success
    /// ends the whole search.
    failed: HashSet<(&'a State, usize)>,
    /// States entered during each open epsilon closure pass. A pass is opened by every frame that
    /// consumed a symbol, and passes close in the order frames leave the stack.
    passes: Vec<HashSet<&'a State>>,
    stack: Vec<Frame<'a>>,
}

struct Frame<'a> {
    state: &'a State,
    pos: usize,
    opens_pass: bool,
    /// Successors still to try, last first: epsilon targets at `pos`, then the targets on the
    /// symbol at `pos`.
    pending: Vec<(&'a State, usize)>,
}

impl<'a> Search<'a> {
    fn run(&mut self, start: &'a State) -> bool {
        if self.enter(start, 0, true) {
            return true;
        }

        while let Some(frame) = self.stack.last_mut() {
            let step = frame
                .pending
                .pop()
                .map(|(next, pos)| (next, pos, pos != frame.pos));

            match step {
                Some((next, pos, opens_pass)) => {
                    if self.enter(next, pos, opens_pass) {
                        return true;
                    }
                }
                // Every successor rejected.
                None => self.leave(),
            }
        }

        false
    }

    /// Push a frame for `state` at `pos`. Returns true as soon as the input is accepted there.
    /// States already entered in the current closure pass are skipped, so epsilon cycles are cut
    /// short.
    fn enter(&mut self, state: &'a State, pos: usize, opens_pass: bool) -> bool {
        if opens_pass {
            self.passes.push(HashSet::new());
        }

        let fresh = !self.failed.contains(&(state, pos))
            && self
                .passes
                .last_mut()
                .map_or(false, |pass| pass.insert(state));
        if !fresh {
            if opens_pass {
                self.passes.pop();
            }
            return false;
        }

        let automaton = self.automaton;
        if pos == self.input.len() && automaton.is_accepting(state) {
            return true;
        }

        let mut pending: Vec<(&'a State, usize)> = automaton
            .epsilon_targets(state)
            .map(|next| (next, pos))
            .collect();
        // No transition on the symbol is just a failed branch.
        if let Some(&c) = self.input.get(pos) {
            pending.extend(
                automaton
                    .transitions_on(state, Symbol::Char(c))
                    .map(|next| (next, pos + 1)),
            );
        }
        pending.reverse();

        self.stack.push(Frame {
            state,
            pos,
            opens_pass,
            pending,
        });
        false
    }

    fn leave(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.failed.insert((frame.state, frame.pos));
            if frame.opens_pass {
                self.passes.pop();
            }
        }
    }
}
