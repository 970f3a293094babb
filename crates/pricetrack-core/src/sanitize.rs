//! Filesystem-safe names for captured documents.

/// Default maximum length of a sanitized fragment.
pub const DEFAULT_MAX_LEN: usize = 200;

/// Name used when there is nothing to sanitize.
const FALLBACK: &str = "file";

/// Turn an arbitrary string (usually a URL) into a token of
/// `[A-Za-z0-9._-]` characters, at most `max_len` long.
///
/// The input is form-encoded (spaces become `+`, everything else outside
/// the unreserved set is percent-escaped) and every remaining disallowed
/// character is replaced with `_`.
pub fn sanitize_filename(input: &str, max_len: usize) -> String {
    if input.is_empty() {
        return FALLBACK.to_string();
    }

    let encoded = input
        .split(' ')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("+");

    encoded
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect()
}

/// `<site>_<index>_<sanitized url>.html`
pub fn capture_filename(site: &str, index: usize, url: &str, max_len: usize) -> String {
    format!("{}_{}_{}.html", site, index, sanitize_filename(url, max_len))
}
