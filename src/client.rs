use crate::config::Config;
use crate::error::CatalogError;
use crate::models::{
    AddTracksRequest, Album, ArtistSearchResponse, CreatePlaylistRequest, CreatedPlaylist,
    CurrentUser, Paging, Track, TrackObject,
};
use log::debug;
use serde::de::DeserializeOwned;
use ureq::Agent;
use urlencoding::encode;

/// Maximum ids accepted by the saved-albums lookup
const SAVED_STATUS_BATCH: usize = 20;
/// Maximum items accepted by a single add-tracks request
const ADD_TRACKS_BATCH: usize = 100;
const PAGE_LIMIT: u32 = 50;

/// Read access to the remote music catalog
#[cfg_attr(test, mockall::automock)]
pub trait CatalogClient {
    /// Resolve an artist name to its catalog id (first search hit)
    fn resolve_artist(&self, name: &str) -> Result<String, CatalogError>;

    /// List every album and single of an artist, all pages materialized
    fn list_albums(&self, artist_id: &str) -> Result<Vec<Album>, CatalogError>;

    /// List every track of an album, all pages materialized
    fn list_tracks(&self, album_id: &str) -> Result<Vec<Track>, CatalogError>;

    /// Saved flag per album, same order and length as `album_ids`
    fn saved_status(&self, album_ids: &[String]) -> Result<Vec<bool>, CatalogError>;
}

/// Write access to the user's playlists
#[cfg_attr(test, mockall::automock)]
pub trait PlaylistPublisher {
    fn current_user_id(&self) -> Result<String, CatalogError>;

    fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String, CatalogError>;

    fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<(), CatalogError>;
}

/// A blocking Spotify Web API client using a bearer token
pub struct SpotifyClient {
    agent: Agent,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Create a new client with configuration from environment
    pub fn new(config: Config) -> Self {
        let agent = Agent::new();

        SpotifyClient {
            agent,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// GET a URL and decode its JSON body
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .set("Authorization", &self.auth_header())
            .call()?;

        response
            .into_json::<T>()
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// POST a JSON body and decode the JSON response
    fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        debug!("POST {url}");
        let response = self
            .agent
            .post(url)
            .set("Authorization", &self.auth_header())
            .send_json(body)?;

        response
            .into_json::<T>()
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Follow `next` links from the first page until the listing is exhausted
    fn fetch_all_pages<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>, CatalogError> {
        let mut items = Vec::new();
        let mut next = Some(first_url);
        let mut pages = 0;

        while let Some(url) = next {
            let page: Paging<T> = self.get_json(&url)?;
            pages += 1;
            items.extend(page.items);
            next = page.next;
        }

        debug!("Fetched {} items over {} pages", items.len(), pages);
        Ok(items)
    }
}

impl CatalogClient for SpotifyClient {
    fn resolve_artist(&self, name: &str) -> Result<String, CatalogError> {
        let url = format!(
            "{}/search?q={}&type=artist&limit=1&offset=0",
            self.base_url,
            encode(name)
        );
        let response: ArtistSearchResponse = self.get_json(&url)?;

        response
            .artists
            .items
            .into_iter()
            .next()
            .map(|artist| artist.id)
            .ok_or_else(|| CatalogError::ArtistNotFound(name.to_string()))
    }

    fn list_albums(&self, artist_id: &str) -> Result<Vec<Album>, CatalogError> {
        let url = format!(
            "{}/artists/{}/albums?include_groups=album,single&limit={}",
            self.base_url,
            encode(artist_id),
            PAGE_LIMIT
        );
        self.fetch_all_pages(url)
    }

    fn list_tracks(&self, album_id: &str) -> Result<Vec<Track>, CatalogError> {
        let url = format!(
            "{}/albums/{}/tracks?limit={}",
            self.base_url,
            encode(album_id),
            PAGE_LIMIT
        );
        let tracks: Vec<TrackObject> = self.fetch_all_pages(url)?;
        Ok(tracks.into_iter().filter_map(TrackObject::into_track).collect())
    }

    fn saved_status(&self, album_ids: &[String]) -> Result<Vec<bool>, CatalogError> {
        let mut flags = Vec::with_capacity(album_ids.len());

        for chunk in album_ids.chunks(SAVED_STATUS_BATCH) {
            let url = format!(
                "{}/me/albums/contains?ids={}",
                self.base_url,
                encode(&chunk.join(","))
            );
            let batch: Vec<bool> = self.get_json(&url)?;
            if batch.len() != chunk.len() {
                return Err(CatalogError::SavedStatusMismatch {
                    expected: chunk.len(),
                    got: batch.len(),
                });
            }
            flags.extend(batch);
        }

        Ok(flags)
    }
}

impl PlaylistPublisher for SpotifyClient {
    fn current_user_id(&self) -> Result<String, CatalogError> {
        let url = format!("{}/me", self.base_url);
        let user: CurrentUser = self.get_json(&url)?;
        Ok(user.id)
    }

    fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String, CatalogError> {
        let url = format!("{}/users/{}/playlists", self.base_url, encode(owner_id));
        let body = CreatePlaylistRequest { name, public: true };
        let created: CreatedPlaylist = self.post_json(&url, &body)?;
        Ok(created.id)
    }

    fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<(), CatalogError> {
        let url = format!("{}/playlists/{}/tracks", self.base_url, encode(playlist_id));

        for chunk in track_ids.chunks(ADD_TRACKS_BATCH) {
            let body = AddTracksRequest {
                uris: chunk.iter().map(|id| format!("spotify:track:{id}")).collect(),
            };
            // Response only carries a snapshot id
            let _: serde_json::Value = self.post_json(&url, &body)?;
        }

        Ok(())
    }
}
