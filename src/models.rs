use serde::{Deserialize, Serialize};

/// An album as listed in an artist's discography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub total_tracks: u32,
}

impl Album {
    /// Whether the album name marks it as an instrumental release
    pub fn is_instrumental(&self) -> bool {
        self.name.to_lowercase().contains("instrumental")
    }
}

/// A track from an album listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
}

/// Generic page wrapper used by the Spotify Web API for list endpoints
#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub total: Option<u32>,
}

/// Response structure for the search endpoint (artist search only)
#[derive(Debug, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: Paging<ArtistObject>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    #[allow(dead_code)]
    pub name: String,
}

/// Album tracks may come back without an id (local files, region gaps)
#[derive(Debug, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
}

impl TrackObject {
    pub fn into_track(self) -> Option<Track> {
        self.id.map(|id| Track { id, name: self.name })
    }
}

/// Response structure for `GET /me`
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[allow(dead_code)]
    pub display_name: Option<String>,
}

/// Response structure for playlist creation
#[derive(Debug, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    #[allow(dead_code)]
    pub name: String,
}

/// Request body for playlist creation
#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
    pub public: bool,
}

/// Request body for appending tracks to a playlist
#[derive(Debug, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}
