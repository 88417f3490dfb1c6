use super::*;

#[test]
fn parses_canonical_url() {
    let loc = parse_pr_url("https://github.com/vercel/next.js/pull/12345").unwrap();
    assert_eq!(loc.owner, "vercel");
    assert_eq!(loc.repo, "next.js");
    assert_eq!(loc.number, 12345);
    assert_eq!(loc.repo_name(), "vercel/next.js");
    assert_eq!(loc.html_url(), "https://github.com/vercel/next.js/pull/12345");
}

#[test]
fn accepts_subpages_and_whitespace() {
    let loc = parse_pr_url("  https://github.com/a/b/pull/7/files?diff=split  ").unwrap();
    assert_eq!(loc.number, 7);
    assert!(parse_pr_url("github.com/a/b/pull/7").is_ok());
}

#[test]
fn rejects_non_pr_urls() {
    for bad in [
        "",
        "not a url",
        "https://github.com/a/b",
        "https://github.com/a/b/issues/3",
        "https://gitlab.com/a/b/pull/3",
        "https://github.com/a/b/pull/abc",
        "https://github.com/a/b/pull/0",
    ] {
        assert!(
            matches!(parse_pr_url(bad), Err(VizError::InvalidPrUrl)),
            "{bad:?} should be rejected"
        );
    }
}
