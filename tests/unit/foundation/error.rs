use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VizError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VizError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        VizError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        VizError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(VizError::storage("x").to_string().contains("storage error:"));
    assert!(
        VizError::playback("x")
            .to_string()
            .contains("playback error:")
    );
    assert!(VizError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn github_status_maps_to_fixed_messages() {
    assert_eq!(
        VizError::from_github_status(404, "Not Found").to_string(),
        "Pull Request not found. Please check the URL or repository permissions."
    );
    for status in [401, 403] {
        assert_eq!(
            VizError::from_github_status(status, "Bad credentials").to_string(),
            "GitHub API authentication error. Check your GITHUB_TOKEN."
        );
    }
    assert_eq!(
        VizError::from_github_status(500, "Server Error").to_string(),
        "Failed to fetch PR data: Server Error"
    );
}

#[test]
fn invalid_url_is_an_input_error() {
    assert!(VizError::InvalidPrUrl.is_input_error());
    assert!(!VizError::GitHubAuth.is_input_error());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
