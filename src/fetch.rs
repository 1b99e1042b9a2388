//! Turning a command-line page identifier into a lookup title, plus the
//! small naming rules around the downloaded file.

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

// Wikipedia article URLs always carry this path prefix
const ARTICLE_PATH_PREFIX: &str = "/wiki/";

#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("URL does not appear to be a valid Wikipedia article URL.")]
    NotAnArticleUrl,
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Resolve the identifier to a page title. Anything that does not look
/// like an http(s) URL is already a title; a URL must point below
/// `/wiki/`, and its last path segment is percent-decoded with
/// underscores turned back into spaces.
pub fn page_title(identifier: &str) -> Result<String, IdentifierError> {
    if !identifier.starts_with("http://") && !identifier.starts_with("https://") {
        return Ok(identifier.to_owned());
    }

    let parsed = Url::parse(identifier)?;
    let path = parsed.path();
    if !path.starts_with(ARTICLE_PATH_PREFIX) {
        return Err(IdentifierError::NotAnArticleUrl);
    }

    let encoded = path.rsplit(ARTICLE_PATH_PREFIX).next().unwrap_or_default();
    let decoded = percent_decode_str(encoded).decode_utf8_lossy();
    Ok(decoded.replace('_', " "))
}

/// Pick the disambiguation option matching the requested title exactly,
/// ignoring case.
pub fn exact_match<'a>(requested: &str, options: &'a [String]) -> Option<&'a str> {
    let requested = requested.to_lowercase();
    options
        .iter()
        .map(String::as_str)
        .find(|option| option.to_lowercase() == requested)
}

/// Filename for the downloaded content: lowercased title, spaces as
/// hyphens, `.txt` suffix.
pub fn output_filename(title: &str) -> String {
    title.to_lowercase().replace(' ', "-") + ".txt"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title_passes_through() {
        assert_eq!(page_title("Abraham Lincoln").unwrap(), "Abraham Lincoln");
    }

    #[test]
    fn article_url_yields_decoded_title() {
        let title = page_title("https://en.wikipedia.org/wiki/Abraham_Lincoln").unwrap();
        assert_eq!(title, "Abraham Lincoln");
    }

    #[test]
    fn percent_sequences_are_decoded() {
        let title = page_title("https://en.wikipedia.org/wiki/S%C3%A3o_Paulo").unwrap();
        assert_eq!(title, "São Paulo");
    }

    #[test]
    fn http_scheme_is_accepted() {
        let title = page_title("http://en.wikipedia.org/wiki/Ada_Lovelace").unwrap();
        assert_eq!(title, "Ada Lovelace");
    }

    #[test]
    fn non_article_url_is_rejected() {
        let err = page_title("https://en.wikipedia.org/w/index.php?title=Foo").unwrap_err();
        assert!(matches!(err, IdentifierError::NotAnArticleUrl));
    }

    #[test]
    fn unparseable_url_is_rejected() {
        let err = page_title("http://[bad").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidUrl(_)));
    }

    #[test]
    fn exact_match_ignores_case() {
        let options = vec![
            "Mercury (planet)".to_owned(),
            "Mercury (element)".to_owned(),
            "MERCURY".to_owned(),
        ];
        assert_eq!(exact_match("mercury", &options), Some("MERCURY"));
    }

    #[test]
    fn exact_match_requires_full_equality() {
        let options = vec!["Mercury (planet)".to_owned()];
        assert_eq!(exact_match("Mercury", &options), None);
    }

    #[test]
    fn filename_is_lowercased_and_hyphenated() {
        assert_eq!(output_filename("Abraham Lincoln"), "abraham-lincoln.txt");
        assert_eq!(
            output_filename("...Baby One More Time (album)"),
            "...baby-one-more-time-(album).txt"
        );
    }
}
