//! Request headers sent with every audit fetch.

/// Headers identifying audit traffic as a document fetch.
///
/// The User-Agent comes from the client configuration; these add content
/// negotiation so servers return the same HTML or XML a crawler would see.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    const ACCEPT_DOCUMENT: &'static str =
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
    const ACCEPT_LANGUAGE: &'static str = "en-US,en;q=0.9";

    /// Applies the standard headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(reqwest::header::ACCEPT, Self::ACCEPT_DOCUMENT)
            .header(reqwest::header::ACCEPT_LANGUAGE, Self::ACCEPT_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_applied() {
        let client = reqwest::Client::new();
        let request = RequestHeaders::apply_to_request_builder(client.get("https://example.com"))
            .build()
            .expect("request builds");
        let headers = request.headers();
        assert!(headers
            .get(reqwest::header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html")));
        assert!(headers.contains_key(reqwest::header::ACCEPT_LANGUAGE));
    }
}
