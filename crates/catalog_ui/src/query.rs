//! Minimal query-string editing for the current document URL.
//!
//! Parameters other than the one being edited are preserved byte for byte,
//! as is the fragment.

use std::borrow::Cow;

struct SplitUrl<'a> {
    base: &'a str,
    query: &'a str,
    fragment: Option<&'a str>,
}

fn split(url: &str) -> SplitUrl<'_> {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = rest.split_once('?').unwrap_or((rest, ""));
    SplitUrl {
        base,
        query,
        fragment,
    }
}

fn decode(component: &str) -> Option<String> {
    let spaced: Cow<'_, str> = if component.contains('+') {
        Cow::Owned(component.replace('+', " "))
    } else {
        Cow::Borrowed(component)
    };
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

fn pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

/// First decoded value of `name` in `url`'s query string.
///
/// Values that are not valid percent-encoded UTF-8 are treated as absent.
#[must_use]
pub fn get_param(url: &str, name: &str) -> Option<String> {
    pairs(split(url).query)
        .find(|(key, _)| decode(key).as_deref() == Some(name))
        .and_then(|(_, value)| decode(value))
}

/// Return `url` with `name` set to `value`, or removed when `value` is `None`.
///
/// An existing parameter keeps its position; a new one is appended.
#[must_use]
pub fn set_param(url: &str, name: &str, value: Option<&str>) -> String {
    let parts = split(url);
    let encoded = value.map(|v| format!("{}={}", urlencoding::encode(name), urlencoding::encode(v)));

    let mut replaced = false;
    let mut kept: Vec<Cow<'_, str>> = Vec::new();
    for pair in parts.query.split('&').filter(|pair| !pair.is_empty()) {
        let key = pair.split_once('=').map_or(pair, |(key, _)| key);
        if decode(key).as_deref() != Some(name) {
            kept.push(Cow::Borrowed(pair));
        } else if let (Some(encoded), false) = (&encoded, replaced) {
            kept.push(Cow::Owned(encoded.clone()));
            replaced = true;
        }
    }
    if let (Some(encoded), false) = (encoded, replaced) {
        kept.push(Cow::Owned(encoded));
    }

    let mut out = parts.base.to_string();
    if !kept.is_empty() {
        out.push('?');
        out.push_str(&kept.join("&"));
    }
    if let Some(fragment) = parts.fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}
