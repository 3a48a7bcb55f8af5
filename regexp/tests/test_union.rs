use regexp::RegExp;

include!("macros.rs");

#[test]
fn test_union() {
    let exprs = ["a+b", "(a+b)", "(a)+b", "a+(b)", "((a)+b)"];
    let valids = ["a", "b"];
    let invalids = ["", " ", "c", "a ", " a", "ab", "ba"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["a+b+c", "(a+b)+c", "(a)+b+(c)", "a+(b)+c", "a+(b+c)"];
    let valids = ["a", "b", "c"];
    let invalids = ["", " ", "d", "ab", "bc"];
    run_tests!(&exprs, &valids, &invalids);
}

#[test]
fn test_union_with_concat() {
    let exprs = ["(a+b)c"];
    let valids = ["ac", "bc"];
    let invalids = ["", "a", "b", "aa", "c"];
    run_tests!(&exprs, &valids, &invalids);

    // Concatenation binds tighter than union.
    let exprs = ["ab+cd", "(ab)+(cd)"];
    let valids = ["ab", "cd"];
    let invalids = ["", "abd", "acd", "abcd"];
    run_tests!(&exprs, &valids, &invalids);
}

#[test]
fn test_empty_alternative() {
    let exprs = ["(!+a)bc", "(a+!)bc"];
    let valids = ["bc", "abc"];
    let invalids = ["", "a", "aa", "bbc", "aabc"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["a+!*", "a+!"];
    let valids = ["a", ""];
    let invalids = ["aa", "b"];
    run_tests!(&exprs, &valids, &invalids);
}
