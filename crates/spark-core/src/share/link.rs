//! Share links: an idea token carried in the `idea` query parameter.

use url::Url;

use super::codec;
use crate::error::Result;
use crate::idea::Idea;

/// Query parameter holding the share token.
pub const SHARE_QUERY_PARAM: &str = "idea";

/// Builds `{origin}{path}?idea={token}` from the page URL.
///
/// Any existing query or fragment on `base` is dropped.
pub fn shareable_url(base: &Url, idea: &Idea) -> Result<Url> {
    let token = codec::encode(idea)?;
    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(SHARE_QUERY_PARAM, &token);
    Ok(url)
}

/// Returns the raw share token in `url`, if there is a non-empty one.
pub fn shared_token(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Decodes the idea carried by `url`. Missing or malformed tokens yield `None`.
pub fn shared_idea_from_url(url: &Url) -> Option<Idea> {
    shared_token(url).and_then(|token| codec::decode(&token))
}

/// Returns `url` without the share parameter, leaving other parameters intact.
pub fn clear_shared_idea_from_url(url: &Url) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_QUERY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut cleared = url.clone();
    if remaining.is_empty() {
        cleared.set_query(None);
    } else {
        cleared.query_pairs_mut().clear().extend_pairs(remaining);
    }
    cleared
}
