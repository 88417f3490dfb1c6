use super::*;

#[test]
fn truncate_keeps_short_text() {
    assert_eq!(truncate("abc", 3), "abc");
    assert_eq!(truncate("abcdef", 4), "abc…");
    assert_eq!(truncate("abc", 0), "");
}

#[test]
fn wrap_breaks_on_words() {
    assert_eq!(
        wrap("the quick brown fox", 10, 5),
        vec!["the quick", "brown fox"]
    );
}

#[test]
fn wrap_splits_overlong_words() {
    assert_eq!(wrap("abcdefghij", 4, 5), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn wrap_limits_lines_with_ellipsis() {
    let lines = wrap("one two three four five six", 9, 2);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with('…'));
    assert!(lines[1].chars().count() <= 9);
}

#[test]
fn wrap_keeps_paragraph_breaks() {
    assert_eq!(wrap("a\nb", 10, 5), vec!["a", "b"]);
}

#[test]
fn measure_scales_with_size_and_family() {
    assert_eq!(measure("ab", 10.0, FontFamily::Mono), 12.0);
    assert!(measure("ab", 10.0, FontFamily::Sans) < 12.0);
    assert_eq!(fit_chars(60.0, 10.0, FontFamily::Mono), 10);
}
