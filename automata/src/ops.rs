use crate::nfa::{Automaton, State, Symbol};

use std::collections::{BTreeMap, BTreeSet, VecDeque};

impl Automaton {
    /// Clone the states and transitions of an automaton into another. The start and accepting
    /// states of the source are not marked as such in the destination.
    #[inline]
    fn copy_into(dest: &mut Automaton, src: &Automaton) {
        for state in src.states.iter() {
            dest.add_state(state.clone());
        }
        for (from, symbol, targets) in &src.transition {
            for to in targets {
                dest.add_transition(from.clone(), *symbol, to.clone());
            }
        }
    }

    /// Construct the union of two automata: a new start state with epsilon transitions to the
    /// start states of both operands. The operands' states are tagged `a` and `b` to keep them
    /// apart.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let a = Automaton::new(vec![("0a", "a", "1a"), ("0a", "b", "0a"), ("1a", "ab", "1a")]).unwrap();
    /// let b = Automaton::new(vec![("0b", "b", "1b"), ("0b", "a", "0b"), ("1b", "ab", "1b")]).unwrap();
    /// let u = Automaton::union(&a, &b);
    /// assert!(u.accept("a"));
    /// assert!(u.accept("b"));
    /// assert!(!u.accept(""));
    /// ```
    pub fn union(a: &Automaton, b: &Automaton) -> Automaton {
        let (a, b) = (a.tagged("a"), b.tagged("b"));

        let mut new_nfa = Automaton::with_start(State::from("0"));
        let start = new_nfa.start.clone();

        for c in [&a, &b].iter() {
            Automaton::copy_into(&mut new_nfa, c);
            new_nfa.add_transition(start.clone(), Symbol::Epsilon, c.start.clone());
            for f in c.accepting.iter() {
                new_nfa.set_accepting(f.clone());
            }
        }

        new_nfa
    }

    /// Construct the intersection of two automata as their synchronized product. Each product
    /// state is a pair of operand states, named `{q,r}`; only pairs reachable from the pair of
    /// start states are built. Both components move together on a symbol, and either moves alone
    /// on its own epsilon transitions.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let a = Automaton::new(vec![("0a", "a", "1a"), ("0a", "b", "0a"), ("1a", "ab", "1a")]).unwrap();
    /// let b = Automaton::new(vec![("0b", "b", "1b"), ("0b", "a", "0b"), ("1b", "ab", "1b")]).unwrap();
    /// let i = Automaton::intersection(&a, &b);
    /// for s in &["ba", "ab", "bba"] {
    ///     assert!(i.accept(s));
    /// }
    /// for s in &["aa", "bb", "a", "b"] {
    ///     assert!(!i.accept(s));
    /// }
    /// ```
    pub fn intersection(a: &Automaton, b: &Automaton) -> Automaton {
        let mut names = PairNames::default();

        let start_pair = (a.start.clone(), b.start.clone());
        let mut product = Automaton::with_start(names.name(&start_pair));

        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start_pair.clone());
        queue.push_back(start_pair);

        while let Some((q, r)) = queue.pop_front() {
            let from = names.name(&(q.clone(), r.clone()));
            if a.is_accepting(&q) && b.is_accepting(&r) {
                product.set_accepting(from.clone());
            }

            let mut moves = Vec::new();
            for (symbol, q2) in a.transitions_from(&q) {
                match symbol {
                    Symbol::Epsilon => moves.push((symbol, (q2.clone(), r.clone()))),
                    Symbol::Char(_) => {
                        for r2 in b.transitions_on(&r, symbol) {
                            moves.push((symbol, (q2.clone(), r2.clone())));
                        }
                    }
                }
            }
            for r2 in b.epsilon_targets(&r) {
                moves.push((Symbol::Epsilon, (q.clone(), r2.clone())));
            }

            for (symbol, pair) in moves {
                product.add_transition(from.clone(), symbol, names.name(&pair));
                if seen.insert(pair.clone()) {
                    queue.push_back(pair);
                }
            }
        }

        product
    }

    /// Construct the concatenation of two automata. The states of `a` are tagged `a`. At every
    /// accepting state `f` of `a` a copy of `b` is spliced in, with the transitions leaving
    /// `b`'s start state leaving `f` instead, so no epsilon transition is needed. The accepting
    /// states are those of the copies of `b`.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let a = Automaton::builder()
    ///     .transition("0a", "a", "1a")
    ///     .transition("0a", "b", "1b")
    ///     .accepting(vec!["1a", "1b"])
    ///     .build()
    ///     .unwrap();
    /// let b = Automaton::new(vec![("0c", "c", "1c")]).unwrap();
    /// let c = Automaton::concat(&a, &b);
    /// assert!(c.accept("ac"));
    /// assert!(c.accept("bc"));
    /// assert!(!c.accept("a"));
    /// assert!(!c.accept("cc"));
    /// ```
    pub fn concat(a: &Automaton, b: &Automaton) -> Automaton {
        let a = a.tagged("a");

        let mut new_nfa = Automaton::with_start(a.start.clone());
        Automaton::copy_into(&mut new_nfa, &a);

        // Every accept state in a gets a copy of b. The copy index keeps copies apart even when
        // names of a contain the separator.
        for (i, f) in a.accepting.iter().enumerate() {
            let b = b.tagged(&format!("b{}:", i));
            Automaton::copy_into(&mut new_nfa, &b);

            for (symbol, to) in b.transitions_from(&b.start) {
                new_nfa.add_transition(f.clone(), symbol, to.clone());
            }
            if b.is_accepting(&b.start) {
                new_nfa.set_accepting(f.clone());
            }
            for s in b.accepting.iter() {
                new_nfa.set_accepting(s.clone());
            }
        }

        new_nfa
    }

    /// Construct the Kleene star of an automaton. A new start state has epsilon transitions to
    /// the operand's start state and to a new accepting state. Every accepting state of the
    /// operand gets epsilon transitions back to its start state and to the new accepting state.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let n = Automaton::kleene(&Automaton::new(vec![("0", "a", "1"), ("1", "b", "2")]).unwrap());
    /// for s in &["ab", "abab", ""] {
    ///     assert!(n.accept(s));
    /// }
    /// for s in &["b", "a", "aaba"] {
    ///     assert!(!n.accept(s));
    /// }
    /// ```
    pub fn kleene(c: &Automaton) -> Automaton {
        let c = c.tagged("k");

        let mut new_nfa = Automaton::with_start(State::from("0"));
        let start = new_nfa.start.clone();
        let accepting_state = State::from("1");
        new_nfa.set_accepting(accepting_state.clone());

        Automaton::copy_into(&mut new_nfa, &c);
        new_nfa.add_transition(start.clone(), Symbol::Epsilon, c.start.clone());
        new_nfa.add_transition(start, Symbol::Epsilon, accepting_state.clone());

        for f in c.accepting.iter() {
            new_nfa.add_transition(f.clone(), Symbol::Epsilon, c.start.clone());
            new_nfa.add_transition(f.clone(), Symbol::Epsilon, accepting_state.clone());
        }

        new_nfa
    }

    /// An equivalent automaton with a single accepting state, reached by epsilon transitions from
    /// each of the old accepting states. A clone is returned if there is at most one accepting
    /// state already.
    ///
    /// [concat](Automaton::concat) splices a copy of its right operand at every accepting state
    /// of the left one, so normalizing the left operand first keeps long chains from multiplying.
    ///
    /// ```
    /// use automata::Automaton;
    ///
    /// let n = Automaton::union(&Automaton::new_symbol('a'), &Automaton::new_symbol('b'));
    /// let s = n.single_accepting();
    /// assert_eq!(1, s.accepting().count());
    /// assert!(s.accept("a"));
    /// assert!(s.accept("b"));
    /// ```
    pub fn single_accepting(&self) -> Automaton {
        if self.accepting.len() < 2 {
            return self.clone();
        }

        let mut new_nfa = self.clone();
        let f = self.fresh_state("f".to_owned());
        new_nfa.accepting.clear();
        new_nfa.set_accepting(f.clone());
        for old in self.accepting.iter() {
            new_nfa.add_transition(old.clone(), Symbol::Epsilon, f.clone());
        }

        new_nfa
    }
}

/// Names for product states. A name already given to a different pair gets `'` appended.
#[derive(Debug, Default)]
struct PairNames {
    names: BTreeMap<(State, State), State>,
    used: BTreeSet<State>,
}

impl PairNames {
    fn name(&mut self, pair: &(State, State)) -> State {
        if let Some(name) = self.names.get(pair) {
            return name.clone();
        }

        let mut name = format!("{{{},{}}}", pair.0, pair.1);
        while self.used.contains(&State::new(name.as_str())) {
            name.push('\'');
        }
        let name = State::new(name);

        self.used.insert(name.clone());
        self.names.insert(pair.clone(), name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use crate::nfa::Automaton;

    fn single(c: &str) -> Automaton {
        Automaton::new(vec![("0", c, "1")]).unwrap()
    }

    #[test]
    fn test_operands_untouched() {
        let a = single("a");
        let b = single("b");
        let (a0, b0) = (a.clone(), b.clone());

        let _ = Automaton::union(&a, &b);
        let _ = Automaton::intersection(&a, &b);
        let _ = Automaton::concat(&a, &b);
        let _ = Automaton::kleene(&a);

        assert_eq!(a0, a);
        assert_eq!(b0, b);
    }

    #[test]
    fn test_union_same_names() {
        // Both operands use states "0" and "1"; tagging keeps them apart.
        let u = Automaton::union(&single("a"), &single("b"));

        assert_eq!(5, u.state_count());
        assert!(u.accept("a"));
        assert!(u.accept("b"));
        assert!(!u.accept("ab"));
    }

    #[test]
    fn test_intersection_pairs() {
        let a = Automaton::new(vec![("p", "ab", "p"), ("p", "a", "q")]).unwrap();
        let b = Automaton::new(vec![("r", "ab", "r"), ("r", "b", "s"), ("s", "a", "t")]).unwrap();
        let i = Automaton::intersection(&a, &b);

        assert_eq!(i.start(), "{p,r}");
        assert!(i.is_accepting(&"{q,t}".into()));
        assert!(i.accept("ba"));
        assert!(i.accept("abba"));
        assert!(!i.accept("ab"));
        assert!(!i.accept("a"));
    }

    #[test]
    fn test_intersection_with_epsilon() {
        let a = Automaton::new(vec![("p", "ε", "q"), ("q", "a", "r")]).unwrap();
        let b = Automaton::new(vec![("s", "a", "t"), ("t", "ε", "u")]).unwrap();
        let i = Automaton::intersection(&a, &b);

        assert!(i.accept("a"));
        assert!(!i.accept(""));
    }

    #[test]
    fn test_concat_splice_has_no_epsilon() {
        let c = Automaton::concat(&single("a"), &single("b"));

        assert!(!c.has_epsilon_transitions());
        assert!(c.accept("ab"));
        assert!(!c.accept("a"));
        assert!(!c.accept("b"));
    }

    #[test]
    fn test_concat_start_loops_back() {
        // b returns to its start state; that must not lead back into a.
        let a = Automaton::builder()
            .transition("0", "a", "1")
            .transition("1", "c", "0")
            .accepting(vec!["1"])
            .build()
            .unwrap();
        let b = Automaton::builder()
            .transition("0", "b", "1")
            .transition("1", "d", "0")
            .accepting(vec!["1"])
            .build()
            .unwrap();
        let c = Automaton::concat(&a, &b);

        assert!(c.accept("ab"));
        assert!(c.accept("acab"));
        assert!(c.accept("abdb"));
        assert!(!c.accept("abdcab"));
    }

    #[test]
    fn test_concat_copies_disjoint() {
        // "a1b" followed by "0" and "a1" followed by "b0" would read the same under a plain prefix.
        let a = Automaton::builder()
            .transition("0", "x", "1")
            .transition("0", "y", "1b")
            .accepting(vec!["1", "1b"])
            .build()
            .unwrap();
        let b = Automaton::new(vec![("0", "c", "b0"), ("b0", "d", "end")]).unwrap();
        let c = Automaton::concat(&a, &b);

        assert_eq!(9, c.state_count());
        assert!(c.states().any(|s| s == "b0:b0"));
        assert!(c.states().any(|s| s == "b1:0"));
        assert!(c.accept("xcd"));
        assert!(c.accept("ycd"));
        assert!(!c.accept("xc"));
        assert!(!c.accept("cd"));
    }

    #[test]
    fn test_concat_empty_operand() {
        let eps = Automaton::new(vec![("0", "ε", "1")]).unwrap();
        let c = Automaton::concat(&single("a"), &eps);

        assert!(c.accept("a"));
        assert!(!c.accept(""));
    }

    #[test]
    fn test_single_accepting() {
        let n = Automaton::builder()
            .transition("0", "a", "1")
            .transition("0", "b", "f")
            .transition("1", "c", "0")
            .accepting(vec!["1", "f"])
            .build()
            .unwrap();
        let s = n.single_accepting();

        assert_eq!(vec!["f'"], s.accepting().map(|f| f.as_str()).collect::<Vec<_>>());
        for input in &["a", "b", "acb", "aca", ""] {
            assert_eq!(n.accept(input), s.accept(input), "{}", input);
        }

        let c = Automaton::concat(&s, &single("d"));
        assert!(c.accept("ad"));
        assert!(c.accept("acbd"));
        assert!(!c.accept("d"));
    }

    #[test]
    fn test_kleene_no_accept() {
        let n = Automaton::builder()
            .transition("0", "a", "1")
            .accepting(Vec::<&str>::new())
            .build()
            .unwrap();
        let k = Automaton::kleene(&n);

        assert!(k.accept(""));
        assert!(!k.accept("a"));
    }
}
