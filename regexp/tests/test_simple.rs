use regexp::RegExp;

include!("macros.rs");

#[test]
fn test_blank() {
    let exprs = ["", "()", "(())", "!", "(!)", "()()", "!!"];
    let valids = [""];
    let invalids = [" ", "a", "  "];
    run_tests!(&exprs, &valids, &invalids);
}

#[test]
fn test_single() {
    let exprs = [" ", "( )", "(( ))", "(() )"];
    let valids = [" "];
    let invalids = ["", "a", "  "];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["a", "(a)", "!a", "a!"];
    let valids = ["a"];
    let invalids = ["", "b", "a ", " a", "aa"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["\"", "(\")"];
    let valids = ["\""];
    let invalids = ["", "a", "\" ", " \"", "\"\""];
    run_tests!(&exprs, &valids, &invalids);
}

#[test]
fn test_renamed() {
    let re = RegExp::new_nfa("(ab+c)*").unwrap();
    let n = re.automaton();

    assert_eq!("(ab+c)*", re.as_str());
    assert!(n.states().all(|s| s.as_str().parse::<usize>().is_ok()));
    let mut ids: Vec<usize> = n.states().map(|s| s.as_str().parse().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!((0..n.state_count()).collect::<Vec<_>>(), ids);
}

#[test]
fn test_from_regex() {
    let n = regexp::from_regex("a(b+c)d").unwrap();
    for s in &["abd", "acd"] {
        assert!(n.accept(s));
    }
    for s in &["", "a", "b", "abc", "abcd"] {
        assert!(!n.accept(s));
    }
}

#[test]
fn test_any_character_is_literal() {
    let exprs = ["@.-", "(@.-)", "@(.-)"];
    let valids = ["@.-"];
    let invalids = ["", "@", "@.", "@.--"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["{x}[y]"];
    let valids = ["{x}[y]"];
    let invalids = ["x", "y", "{x}"];
    run_tests!(&exprs, &valids, &invalids);
}
