//! Client-side cache layer and page data loading.
//!
//! Remembers fetched blog data across client-side navigations within a
//! session: one cached listing plus a slug-to-post map. Both are
//! unbounded with no eviction and no TTL — content is immutable for the
//! lifetime of a client session, so a stale entry cannot be wrong, only
//! a lost entry costs a re-fetch. The cache is advisory: every write is
//! an idempotent insert keyed by an immutable slug, so last-write-wins
//! between a mount fetch and a background prefetch is harmless.
//!
//! Network access goes through the [`Fetcher`] trait so the transport is
//! a seam: the production client backs it with the `/api/posts`
//! endpoints, tests back it with counting fakes.

use crate::content::{Post, PostSummary};
use crate::log;
use crate::render::{PageData, SsrData};
use anyhow::Result;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Transport seam for the client's data fetches.
pub trait Fetcher {
    /// Fetch the blog listing (`GET /api/posts`).
    fn fetch_listing(&self) -> Result<Vec<PostSummary>>;

    /// Fetch one post (`GET /api/posts/:slug`); `None` means a 404.
    fn fetch_post(&self, slug: &str) -> Result<Option<Post>>;
}

/// Session-wide cache of fetched blog data.
#[derive(Default)]
pub struct ClientCache {
    listing: Mutex<Option<Vec<PostSummary>>>,
    posts: Mutex<HashMap<String, Post>>,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opportunistically warm the listing cache (e.g. on link hover).
    ///
    /// A no-op once the listing is cached. Fetch failures are logged and
    /// swallowed, leaving the cache empty so a later mandatory fetch can
    /// retry. Two overlapping calls may both fetch; both resolve to the
    /// same content, so the duplicate request is accepted rather than
    /// deduplicated.
    pub fn prefetch_listing(&self, fetcher: &dyn Fetcher) {
        if self.listing.lock().is_some() {
            return;
        }
        match fetcher.fetch_listing() {
            Ok(posts) => *self.listing.lock() = Some(posts),
            Err(err) => log!("client"; "listing prefetch failed: {err}"),
        }
    }

    /// Preload one post ahead of navigation (e.g. on link hover).
    ///
    /// A no-op when the slug is already cached. Failures and 404s are
    /// logged and swallowed, leaving the slug absent so the owning
    /// page's fetch-on-mount can retry.
    pub fn preload_post(&self, slug: &str, fetcher: &dyn Fetcher) {
        if self.posts.lock().contains_key(slug) {
            return;
        }
        match fetcher.fetch_post(slug) {
            Ok(Some(post)) => {
                self.posts.lock().insert(slug.to_string(), post);
            }
            Ok(None) => log!("client"; "preload: no post for `{slug}`"),
            Err(err) => log!("client"; "preload of `{slug}` failed: {err}"),
        }
    }

    /// Seed the listing cache from already-resolved data.
    pub fn warm_listing(&self, posts: &[PostSummary]) {
        *self.listing.lock() = Some(posts.to_vec());
    }

    /// Seed the post cache from already-resolved data.
    pub fn warm_post(&self, post: &Post) {
        self.posts.lock().insert(post.slug.clone(), post.clone());
    }

    pub fn cached_listing(&self) -> Option<Vec<PostSummary>> {
        self.listing.lock().clone()
    }

    pub fn cached_post(&self, slug: &str) -> Option<Post> {
        self.posts.lock().get(slug).cloned()
    }
}

/// Terminal state of the listing slot after a mount resolution.
///
/// There is no way back to unresolved within a session; a failure stays
/// failed until the user re-navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    Loaded(Vec<PostSummary>),
    Failed,
}

/// Terminal state of a post slot after a mount resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostState {
    Loaded(Post),
    NotFound,
    Failed,
}

/// A listing page's data-loading sequence on mount.
///
/// Order: hydration bridge seed (warming the cache with it), then cache
/// hit, then network fetch (populating the cache on success).
pub fn resolve_listing(
    bridge: &SsrData,
    cache: &ClientCache,
    fetcher: &dyn Fetcher,
) -> ListingState {
    if let PageData::Listing { posts } = bridge.data() {
        cache.warm_listing(posts);
        return ListingState::Loaded(posts.clone());
    }

    if let Some(posts) = cache.cached_listing() {
        return ListingState::Loaded(posts);
    }

    match fetcher.fetch_listing() {
        Ok(posts) => {
            cache.warm_listing(&posts);
            ListingState::Loaded(posts)
        }
        Err(err) => {
            log!("client"; "listing fetch failed: {err}");
            ListingState::Failed
        }
    }
}

/// A post page's data-loading sequence on mount.
///
/// The bridge only seeds when the server actually found the post; a
/// served-as-missing page re-checks the cache and network so a hover
/// preload or retry can still resolve it.
pub fn resolve_post(
    slug: &str,
    bridge: &SsrData,
    cache: &ClientCache,
    fetcher: &dyn Fetcher,
) -> PostState {
    if let PageData::Item { post: Some(post) } = bridge.data() {
        if post.slug == slug {
            cache.warm_post(post);
            return PostState::Loaded(post.clone());
        }
    }

    if let Some(post) = cache.cached_post(slug) {
        return PostState::Loaded(post);
    }

    match fetcher.fetch_post(slug) {
        Ok(Some(post)) => {
            cache.warm_post(&post);
            PostState::Loaded(post)
        }
        Ok(None) => PostState::NotFound,
        Err(err) => {
            log!("client"; "fetch of `{slug}` failed: {err}");
            PostState::Failed
        }
    }
}
