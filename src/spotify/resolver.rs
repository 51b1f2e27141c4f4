//! Catalog resolution against the metadata service
//!
//! Fetches track, album, and playlist metadata and normalizes the three
//! differently-shaped payloads into one [`CollectionResult`]. Collection
//! items are fetched page by page with explicit limit/offset cursors;
//! pagination is strictly sequential because each request depends on the
//! previous page's next-page indicator.

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::sanitize::normalize;
use crate::types::{CatalogId, CollectionResult, ReferenceKind, TrackDescriptor};

use super::auth::Session;
use super::models::{ContainerObject, Page, PlaylistItem, TrackObject};

/// Authenticated client for the metadata service
///
/// Holds the HTTP client, the session token, and the resolved base URL.
/// One client resolves one or more references over its lifetime; it keeps
/// no per-resolution state.
pub struct SpotifyClient {
    http_client: reqwest::Client,
    api_base_url: String,
    page_size: u32,
    session: Session,
}

impl SpotifyClient {
    /// Create a client from the pipeline configuration and a session
    pub fn new(config: &Config, session: Session, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            api_base_url: config
                .spotify
                .api_base_url
                .trim_end_matches('/')
                .to_string(),
            page_size: config.download.page_size,
            session,
        }
    }

    /// Resolve a classified reference into a collection
    ///
    /// Track references need one fetch; album and playlist references fetch
    /// the container detail for its title and then paginate the item
    /// endpoint. Output preserves strict service order with no
    /// deduplication.
    ///
    /// # Errors
    ///
    /// - [`Error::BadRequest`] when the service answers 400; the service's
    ///   error payload is passed through verbatim
    /// - [`Error::Service`] for any other non-2xx status
    /// - [`Error::Cancelled`] when the token fires between page fetches;
    ///   no partial collection is returned
    pub async fn resolve(
        &self,
        kind: ReferenceKind,
        id: &CatalogId,
        cancel: &CancellationToken,
    ) -> Result<CollectionResult> {
        tracing::debug!(kind = ?kind, id = %id, "Resolving catalog reference");

        let collection = match kind {
            ReferenceKind::Track => self.resolve_track(id).await?,
            ReferenceKind::Album => self.resolve_album(id, cancel).await?,
            ReferenceKind::Playlist => self.resolve_playlist(id, cancel).await?,
        };

        tracing::info!(
            container = %collection.container_name,
            tracks = collection.tracks.len(),
            "Resolved collection"
        );
        Ok(collection)
    }

    async fn resolve_track(&self, id: &CatalogId) -> Result<CollectionResult> {
        let track: TrackObject = self.get_json(&format!("/tracks/{id}")).await?;
        let descriptor = TrackDescriptor::from(track);
        Ok(CollectionResult {
            container_name: normalize(&descriptor.display_name()),
            tracks: vec![descriptor],
        })
    }

    async fn resolve_album(
        &self,
        id: &CatalogId,
        cancel: &CancellationToken,
    ) -> Result<CollectionResult> {
        let container: ContainerObject = self.get_json(&format!("/albums/{id}")).await?;
        // Album items are track objects directly
        let tracks = self
            .fetch_all_items::<TrackObject>(&format!("/albums/{id}/tracks"), cancel, |track| {
                Some(TrackDescriptor::from(track))
            })
            .await?;
        Ok(CollectionResult {
            container_name: normalize(&container.name),
            tracks,
        })
    }

    async fn resolve_playlist(
        &self,
        id: &CatalogId,
        cancel: &CancellationToken,
    ) -> Result<CollectionResult> {
        let container: ContainerObject = self.get_json(&format!("/playlists/{id}")).await?;
        // Playlist items wrap a nullable track object; unavailable entries
        // are skipped and never count toward pagination or output
        let tracks = self
            .fetch_all_items::<PlaylistItem>(&format!("/playlists/{id}/tracks"), cancel, |item| {
                item.track.map(TrackDescriptor::from)
            })
            .await?;
        Ok(CollectionResult {
            container_name: normalize(&container.name),
            tracks,
        })
    }

    /// Walk every page of a collection item endpoint
    ///
    /// Requests `limit`/`offset` pages starting at offset 0 and advances the
    /// offset by the page size until the service reports no next page. The
    /// offset advances by the full page size regardless of how many items
    /// `extract` keeps, so skipped entries never shift the cursor. A page
    /// that is empty while still advertising a next page stops the walk
    /// instead of polling forever.
    async fn fetch_all_items<T>(
        &self,
        path: &str,
        cancel: &CancellationToken,
        extract: fn(T) -> Option<TrackDescriptor>,
    ) -> Result<Vec<TrackDescriptor>>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut tracks = Vec::new();
        let mut offset: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let page: Page<T> = self
                .get_json(&format!("{path}?limit={}&offset={offset}", self.page_size))
                .await?;

            let item_count = page.items.len();
            tracks.extend(page.items.into_iter().filter_map(extract));
            tracing::debug!(
                offset,
                items = item_count,
                collected = tracks.len(),
                "Fetched collection page"
            );

            if page.next.is_none() {
                break;
            }
            if item_count == 0 {
                tracing::warn!(
                    offset,
                    "Service reported another page but returned no items, stopping pagination"
                );
                break;
            }
            offset += self.page_size;
        }

        Ok(tracks)
    }

    /// GET a bearer-authenticated JSON resource relative to the API base
    async fn get_json<T>(&self, path_and_query: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.api_base_url, path_and_query);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.session.access_token())
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::BadRequest { message: body });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
