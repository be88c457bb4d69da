//! Link scanning and classification.
//!
//! Small tokenizer over single lines of Book text. It finds URLs, strips the
//! punctuation that prose tends to glue onto them, and decides whether a
//! string points at an agent, a generic web resource or a file path.

use url::Url;

/// Characters that end a URL token.
const URL_STOP_CHARS: &[char] = &['<', '>', '"', '`', '|'];

/// Punctuation stripped from the end of a URL token.
const TRAILING_PUNCTUATION: &[char] = &[')', ',', '.', ';', ':', '!', '?', '\'', '"', ']', '}', '>'];

/// A URL found inside a line.
///
/// `start..end` covers the raw token as written (including any trailing
/// punctuation) and `start..clean_end` covers the cleaned URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlToken {
    pub start: usize,
    pub end: usize,
    pub clean_end: usize,
    pub url: String,
}

/// Where an IMPORT commitment points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    Agent(String),
    File(String),
}

/// Find every `http://` or `https://` token in the line, in order.
pub fn scan_urls(line: &str) -> Vec<UrlToken> {
    let mut tokens = Vec::new();
    let lower = line.to_ascii_lowercase();
    let mut cursor = 0;

    while cursor < line.len() {
        let Some(found) = next_scheme_start(&lower, cursor) else {
            break;
        };

        // `xhttps://` is not a URL start
        let preceded_by_word = line[..found]
            .chars()
            .next_back()
            .map(|c| c.is_alphanumeric())
            .unwrap_or(false);
        if preceded_by_word {
            cursor = found + 1;
            continue;
        }

        let end = line[found..]
            .char_indices()
            .find(|(_, c)| c.is_whitespace() || URL_STOP_CHARS.contains(c))
            .map(|(offset, _)| found + offset)
            .unwrap_or(line.len());

        let clean_end = found + strip_trailing_punctuation(&line[found..end]).len();
        let url = &line[found..clean_end];
        if url.contains("://") && url.len() > url.find("://").unwrap_or(0) + 3 {
            tokens.push(UrlToken {
                start: found,
                end,
                clean_end,
                url: url.to_string(),
            });
        }
        cursor = end.max(found + 1);
    }

    tokens
}

fn next_scheme_start(lower: &str, from: usize) -> Option<usize> {
    let http = lower[from..].find("http://").map(|i| i + from);
    let https = lower[from..].find("https://").map(|i| i + from);
    match (http, https) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Strip prose punctuation from the end of a URL token.
///
/// A closing parenthesis is kept when the URL itself opened one.
pub fn strip_trailing_punctuation(token: &str) -> &str {
    let mut current = token;
    loop {
        let Some(last) = current.chars().next_back() else {
            return current;
        };
        if !TRAILING_PUNCTUATION.contains(&last) {
            return current;
        }
        if last == ')' {
            let opened = current.matches('(').count();
            let closed = current.matches(')').count();
            if opened >= closed {
                return current;
            }
        }
        current = &current[..current.len() - last.len_utf8()];
    }
}

/// Parse an absolute http(s) URL with a host.
fn parse_web_url(value: &str) -> Option<Url> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return None;
    }
    let url = Url::parse(value).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str().filter(|host| !host.is_empty())?;
    Some(url)
}

/// True for absolute http(s) URLs.
pub fn is_valid_url(value: &str) -> bool {
    parse_web_url(value).is_some()
}

/// True when the URL looks like an agent page rather than a file.
///
/// Agent URLs have at least one path segment and the last segment carries no
/// file extension, e.g. `https://s6.ptbk.io/benjamin-white`.
pub fn is_valid_agent_url(value: &str) -> bool {
    let Some(url) = parse_web_url(value) else {
        return false;
    };
    match last_path_segment(&url) {
        Some(segment) => !segment.contains('.'),
        None => false,
    }
}

/// True for relative, absolute or home-relative file paths and bare file names.
pub fn is_valid_file_path(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.contains('\n') || value.contains("://") {
        return false;
    }

    if value.starts_with("./")
        || value.starts_with("../")
        || value.starts_with('/')
        || value.starts_with("~/")
        || value.starts_with(".\\")
        || value.starts_with("..\\")
    {
        return value.len() > 2;
    }

    let bytes = value.as_bytes();
    if bytes.len() > 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        return true;
    }

    if value.chars().any(char::is_whitespace) {
        return false;
    }

    // Bare `notes.txt` or `docs/notes.md`
    let file_name = value.rsplit(['/', '\\']).next().unwrap_or(value);
    match file_name.rsplit_once('.') {
        Some((stem, extension)) => {
            !stem.is_empty()
                && (1..=8).contains(&extension.len())
                && extension.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

/// Classify an IMPORT target; agent URLs take precedence over generic URLs.
pub fn classify_import_target(value: &str) -> Option<ImportTarget> {
    if is_valid_agent_url(value) {
        Some(ImportTarget::Agent(value.to_string()))
    } else if is_valid_url(value) || is_valid_file_path(value) {
        Some(ImportTarget::File(value.to_string()))
    } else {
        None
    }
}

fn last_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Last non-empty path segment of an agent URL, percent-decoded.
pub fn agent_slug_from_url(value: &str) -> Option<String> {
    let url = parse_web_url(value)?;
    let segment = last_path_segment(&url)?;
    Some(
        urlencoding::decode(&segment)
            .map(|decoded| decoded.into_owned())
            .unwrap_or(segment),
    )
}

/// Human readable label for a teammate URL.
///
/// `https://s6.ptbk.io/benjamin-white` becomes `Benjamin White`; URLs without a
/// path fall back to their host name.
pub fn teammate_label(value: &str) -> String {
    if let Some(slug) = agent_slug_from_url(value) {
        let label = slug
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
        if !label.is_empty() {
            return label;
        }
    }

    parse_web_url(value)
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| value.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
