//! Stateless sharing of ideas through compact URL tokens.

pub mod codec;
pub mod link;

pub use codec::{MAX_SHARED_SOURCES, decode, encode};
pub use link::{
    SHARE_QUERY_PARAM, clear_shared_idea_from_url, shareable_url, shared_idea_from_url,
    shared_token,
};
