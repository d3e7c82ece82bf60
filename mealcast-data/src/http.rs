//! Shared HTTP plumbing for the remote adapters.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::ProviderBuildError;

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "mealcast/0.1";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Parse a configured base URL, rejecting values that cannot carry a path.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ProviderBuildError> {
    let url = Url::parse(raw).map_err(|err| ProviderBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        message: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ProviderBuildError::InvalidBaseUrl {
            url: raw.to_owned(),
            message: "URL cannot carry a path".to_owned(),
        });
    }
    Ok(url)
}

/// Append `segments` to the path of `base`, ignoring any trailing slash.
pub(crate) fn endpoint<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Url {
    let mut url = base.clone();
    // `parse_base_url` has already rejected cannot-be-a-base URLs.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

pub(crate) fn build_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// Transport failure classes shared by the weather and menu errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestFailure {
    Timeout,
    Status { status: u16, message: String },
    Network { message: String },
}

impl RequestFailure {
    pub(crate) fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        if let Some(status) = error.status() {
            return Self::Status {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        Self::Network {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://menus.example.com", "https://menus.example.com/a/b")]
    #[case("https://menus.example.com/", "https://menus.example.com/a/b")]
    #[case("https://example.com/api/", "https://example.com/api/a/b")]
    #[case("https://example.com/api", "https://example.com/api/a/b")]
    fn endpoint_appends_segments(#[case] base: &str, #[case] expected: &str) {
        let url = parse_base_url(base).expect("valid base");
        assert_eq!(endpoint(&url, ["a", "b"]).as_str(), expected);
    }

    #[rstest]
    fn endpoint_escapes_segments() {
        let url = parse_base_url("https://menus.example.com").expect("valid base");
        assert_eq!(
            endpoint(&url, ["north hall", "a/b"]).as_str(),
            "https://menus.example.com/north%20hall/a%2Fb"
        );
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:dining@example.com")]
    fn rejects_unusable_base_urls(#[case] raw: &str) {
        let err = parse_base_url(raw).expect_err("should reject");
        assert!(matches!(err, ProviderBuildError::InvalidBaseUrl { .. }));
    }
}
