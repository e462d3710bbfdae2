use super::*;

fn matcher(mode: LikeMode, patterns: &[&str]) -> LikeMatcher {
    LikeMatcher::compile(mode, patterns).unwrap()
}

#[test]
fn test_like_to_regex() {
    assert_eq!(like_to_regex("%love%"), ".*love.*");
    assert_eq!(like_to_regex("%.%.%.%"), ".*\\..*\\..*\\..*");
    assert_eq!(like_to_regex("\\%%"), "%.*");
    assert_eq!(like_to_regex("a\\_b_"), "a_b.");
    assert_eq!(like_to_regex("2*"), "2\\*");
}

#[test]
fn test_wildcards() {
    let p = LikePattern::compile("20_9%").unwrap();
    assert!(p.is_match("2019-05-05"));
    assert!(p.is_match("2009"));
    assert!(!p.is_match("209"));
    assert!(!p.is_match("x2019"));
}

#[test]
fn test_whole_string_match() {
    let p = LikePattern::compile("abc").unwrap();
    assert!(p.is_match("abc"));
    assert!(!p.is_match("xabcx"));
    assert!(!p.is_match("ABC"));
}

#[test]
fn test_escaped_wildcards_are_literal() {
    let p = LikePattern::compile("100\\%").unwrap();
    assert!(p.is_match("100%"));
    assert!(!p.is_match("1000"));

    let p = LikePattern::compile("a\\_%").unwrap();
    assert!(p.is_match("a_bc"));
    assert!(!p.is_match("abc"));
}

#[test]
fn test_dot_and_star_are_literal() {
    let p = LikePattern::compile("a.b*").unwrap();
    assert!(p.is_match("a.b*"));
    assert!(!p.is_match("axb*"));
    assert!(!p.is_match("a.bbb"));
}

#[test]
fn test_percent_spans_line_terminators() {
    let p = LikePattern::compile("a%z").unwrap();
    assert!(p.is_match("a\nb\r\nz"));

    let p = LikePattern::compile("a_z").unwrap();
    assert!(p.is_match("a\nz"));
}

#[test]
fn test_invalid_regex_is_reported() {
    let result = LikePattern::compile("(%");
    assert!(matches!(result, Err(QueryError::InvalidPattern { pattern, .. }) if pattern == "(%"));
}

#[test]
fn test_compile_is_idempotent() {
    let values = ["", "a", "abc", "a%c", "a_c", "%%", "x\ny"];
    for raw in ["a%", "%b_", "\\%x", "a.c"] {
        let first = LikePattern::compile(raw).unwrap();
        let second = LikePattern::compile(raw).unwrap();
        for value in values {
            assert_eq!(first.is_match(value), second.is_match(value), "{} on {:?}", raw, value);
        }
    }
}

#[test]
fn test_modes() {
    let patterns = ["%a%", "%b%"];
    let all = matcher(LikeMode::AllLike, &patterns);
    let any = matcher(LikeMode::AnyLike, &patterns);
    let none = matcher(LikeMode::NoneLike, &patterns);

    assert!(all.is_match("cab"));
    assert!(!all.is_match("ca"));
    assert!(any.is_match("ca"));
    assert!(!any.is_match("cd"));
    assert!(none.is_match("cd"));
    assert!(!none.is_match("b"));
}

#[test]
fn test_singleton_all_equals_any_and_none_negates_any() {
    let values = ["", "2019-01", "2018", "x2019", "2019"];
    for raw in ["2019%", "%", "_", "x"] {
        let all = matcher(LikeMode::AllLike, &[raw]);
        let any = matcher(LikeMode::AnyLike, &[raw]);
        let none = matcher(LikeMode::NoneLike, &[raw]);
        for value in values {
            assert_eq!(all.is_match(value), any.is_match(value));
            assert_eq!(none.is_match(value), !any.is_match(value));
        }
    }

    let set = ["a%", "%b"];
    let any = matcher(LikeMode::AnyLike, &set);
    let none = matcher(LikeMode::NoneLike, &set);
    for value in ["ab", "b", "a", "c"] {
        assert_eq!(none.is_match(value), !any.is_match(value));
    }
}

#[test]
fn test_compare_ops_are_lexicographic() {
    assert!(CompareOp::Greater.evaluate("9", "10"));
    assert!(CompareOp::Less.evaluate("10", "9"));
    assert!(CompareOp::Equal.evaluate("007", "007"));
    assert!(CompareOp::NotEqual.evaluate("7", "007"));
    assert!(!CompareOp::Greater.evaluate("abc", "abc"));
}
