use regexp::RegExp;

include!("macros.rs");

#[test]
fn test_kleene() {
    let exprs = ["a*", "(a*)", "(a)*", "((a)*)"];
    let valids = ["", "a", "aa", "aaa"];
    let invalids = [" ", " a", "ab", "aaaab"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["ab*", "(ab*)", "(a)b*", "a(b*)", "a(b)*", "(a)(b)*"];
    let valids = ["a", "ab", "abb", "abbb"];
    let invalids = ["", "b", "aba", " abb"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["a*b", "(a*b)", "(a*)b", "a*(b)", "(a*)(b)"];
    let valids = ["b", "ab", "aab", "aaab"];
    let invalids = ["", "a", "abb", "aaa"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["(ab)*", "((ab)*)", "((a)(b))*"];
    let valids = ["", "ab", "abab", "ababab"];
    let invalids = [" ", "a", "b", "aab", "abb", "aba"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["(ab*)*", "((a)b*)*", "((a)(b)*)*", "((ab*)*)"];
    let valids = ["", "a", "ab", "abb", "abab", "ababa", "abbabb"];
    let invalids = [" ", "b", "ba", "babb"];
    run_tests!(&exprs, &valids, &invalids);
}

#[test]
fn test_kleene_union() {
    let exprs = ["(a+b)*"];
    let valids = ["", "a", "b", "ab", "ba", "aab", "bbba"];
    let invalids = ["c", "abc"];
    run_tests!(&exprs, &valids, &invalids);

    // Star binds tighter than union.
    let exprs = ["a+b*"];
    let valids = ["a", "", "b", "bb", "bbb"];
    let invalids = ["aa", "ab", "ba"];
    run_tests!(&exprs, &valids, &invalids);

    let exprs = ["(a+!)*"];
    let valids = ["", "a", "aa", "aaaa"];
    let invalids = ["b", "ab"];
    run_tests!(&exprs, &valids, &invalids);
}
