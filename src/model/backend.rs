//! HTTP client for the nowNoise backend API
//!
//! All Spotify data flows through the backend proxy; the client never talks
//! to Spotify directly. Wire-shape mapping lives in standalone functions on
//! `serde_json::Value` so it stays testable without a live server.

use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::dashboard::{ArtistSummary, PlaylistSummary, SpotifyProfile, TrackSummary};
use super::types::{TimeRange, User};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Failure reported by the backend: HTTP status plus the `error` field of
/// the JSON body when one was sent.
#[derive(Clone, Debug)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend returned {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Clone, Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Thin reqwest wrapper around the backend's REST surface.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<()> {
        let response = self.http.get(self.url("/health")).send().await?;
        parse_ok(response).await?;
        Ok(())
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<User> {
        tracing::info!(username = %request.username, "creating account");
        let response = self
            .http
            .post(self.url("/signup"))
            .json(request)
            .send()
            .await?;
        user_from_body(&parse_ok(response).await?)
    }

    /// Log in with a username or email as the identifier.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User> {
        tracing::info!(identifier = %identifier, "logging in");
        let response = self
            .http
            .post(self.url("/login"))
            .json(&serde_json::json!({
                "username": identifier,
                "password": password,
            }))
            .send()
            .await?;
        user_from_body(&parse_ok(response).await?)
    }

    /// Ask the backend for a Spotify authorization URL the user opens in a
    /// browser; the callback lands on the backend, not on this client.
    pub async fn spotify_auth_url(&self, user_id: i64) -> Result<String> {
        let body = self.post_for_user("/spotify/auth-url", user_id).await?;
        body.get("auth_url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("auth-url response missing auth_url"))
    }

    pub async fn spotify_disconnect(&self, user_id: i64) -> Result<()> {
        tracing::info!(user_id, "disconnecting spotify");
        self.post_for_user("/spotify/disconnect", user_id).await?;
        Ok(())
    }

    pub async fn spotify_profile(&self, user_id: i64) -> Result<SpotifyProfile> {
        let body = self.post_for_user("/spotify/user-data", user_id).await?;
        Ok(parse_profile(&body))
    }

    pub async fn playlists(&self, user_id: i64, limit: u32) -> Result<Vec<PlaylistSummary>> {
        let body = self
            .post_json(
                "/spotify/playlists",
                &serde_json::json!({ "user_id": user_id, "limit": limit }),
            )
            .await?;
        Ok(parse_playlists(&body))
    }

    pub async fn top_tracks(
        &self,
        user_id: i64,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<TrackSummary>> {
        let body = self
            .post_json(
                "/spotify/top-tracks",
                &serde_json::json!({
                    "user_id": user_id,
                    "time_range": time_range.as_param(),
                    "limit": limit,
                }),
            )
            .await?;
        Ok(parse_tracks(&body))
    }

    pub async fn recently_played(&self, user_id: i64, limit: u32) -> Result<Vec<TrackSummary>> {
        let body = self
            .post_json(
                "/spotify/recently-played",
                &serde_json::json!({ "user_id": user_id, "limit": limit }),
            )
            .await?;
        Ok(parse_recently_played(&body))
    }

    pub async fn top_artists(
        &self,
        user_id: i64,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<ArtistSummary>> {
        let body = self
            .post_json(
                "/spotify/top-artists",
                &serde_json::json!({
                    "user_id": user_id,
                    "time_range": time_range.as_param(),
                    "limit": limit,
                }),
            )
            .await?;
        Ok(parse_artists(&body))
    }

    async fn post_for_user(&self, path: &str, user_id: i64) -> Result<Value> {
        self.post_json(path, &serde_json::json!({ "user_id": user_id }))
            .await
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value> {
        let response = self.http.post(self.url(path)).json(payload).send().await?;
        parse_ok(response).await
    }
}

async fn parse_ok(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<Value>().await?);
    }
    let message = response
        .json::<Value>()
        .await
        .ok()
        .as_ref()
        .and_then(body_error)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected server response")
                .to_string()
        });
    tracing::warn!(status = status.as_u16(), message = %message, "backend request failed");
    Err(ApiError {
        status: status.as_u16(),
        message,
    }
    .into())
}

fn body_error(body: &Value) -> Option<String> {
    body.get("error")?.as_str().map(str::to_string)
}

/// Signup and login both wrap the account record in a `user` field.
fn user_from_body(body: &Value) -> Result<User> {
    let user = body.get("user").cloned().unwrap_or_else(|| body.clone());
    Ok(serde_json::from_value(user)?)
}

fn string_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Proxy responses wrap the Spotify payload in a named field, e.g.
/// `{ "playlists": { "items": [...] } }`. A bare payload parses too.
fn items<'a>(body: &'a Value, envelope: &str) -> &'a [Value] {
    let payload = body.get(envelope).unwrap_or(body);
    payload
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn parse_profile(body: &Value) -> SpotifyProfile {
    let data = body.get("spotify_data").unwrap_or(body);
    SpotifyProfile {
        display_name: string_at(data, "display_name"),
        email: data.get("email").and_then(Value::as_str).map(str::to_string),
        followers: data
            .pointer("/followers/total")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        country: data
            .get("country")
            .and_then(Value::as_str)
            .map(str::to_string),
        product: data
            .get("product")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

pub fn parse_playlists(body: &Value) -> Vec<PlaylistSummary> {
    items(body, "playlists")
        .iter()
        .map(|item| PlaylistSummary {
            id: string_at(item, "id"),
            name: string_at(item, "name"),
            owner: item
                .pointer("/owner/display_name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            tracks_total: item
                .pointer("/tracks/total")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32,
            public: item.get("public").and_then(Value::as_bool).unwrap_or(false),
        })
        .collect()
}

fn parse_track(item: &Value) -> TrackSummary {
    TrackSummary {
        id: string_at(item, "id"),
        name: string_at(item, "name"),
        artists: item
            .get("artists")
            .and_then(Value::as_array)
            .map(|artists| {
                artists
                    .iter()
                    .filter_map(|a| a.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        album: item
            .pointer("/album/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        duration_ms: item
            .get("duration_ms")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32,
        played_at: None,
    }
}

pub fn parse_tracks(body: &Value) -> Vec<TrackSummary> {
    items(body, "top_tracks").iter().map(parse_track).collect()
}

/// Recently-played entries nest the track and add a `played_at` stamp.
pub fn parse_recently_played(body: &Value) -> Vec<TrackSummary> {
    items(body, "recently_played")
        .iter()
        .filter_map(|entry| {
            let mut track = parse_track(entry.get("track")?);
            track.played_at = entry
                .get("played_at")
                .and_then(Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|d| d.with_timezone(&Utc));
            Some(track)
        })
        .collect()
}

pub fn parse_artists(body: &Value) -> Vec<ArtistSummary> {
    items(body, "top_artists")
        .iter()
        .map(|item| ArtistSummary {
            id: string_at(item, "id"),
            name: string_at(item, "name"),
            genres: item
                .get("genres")
                .and_then(Value::as_array)
                .map(|genres| {
                    genres
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            followers: item
                .pointer("/followers/total")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            popularity: item
                .get("popularity")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u8,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_unwraps_from_signup_envelope() {
        let body = json!({
            "message": "User created successfully",
            "user": {
                "id": 3,
                "username": "ada",
                "email": "ada@example.com",
                "created_at": "2024-05-01T12:00:00",
            }
        });
        let user = user_from_body(&body).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.username, "ada");
        assert!(!user.spotify_connected);
    }

    #[test]
    fn bare_user_body_still_parses() {
        let body = json!({
            "id": 1,
            "username": "ada",
            "email": "ada@example.com",
            "spotify_connected": true,
        });
        let user = user_from_body(&body).unwrap();
        assert!(user.spotify_connected);
    }

    #[test]
    fn profile_unwraps_envelope_and_nested_followers() {
        let body = json!({
            "spotify_data": {
                "display_name": "Ada L",
                "email": "ada@example.com",
                "followers": { "href": null, "total": 42 },
                "country": "BG",
                "product": "premium",
            }
        });
        let profile = parse_profile(&body);
        assert_eq!(profile.display_name, "Ada L");
        assert_eq!(profile.followers, 42);
        assert_eq!(profile.product.as_deref(), Some("premium"));
    }

    #[test]
    fn playlists_map_owner_and_counts() {
        let body = json!({
            "playlists": {
                "items": [
                    {
                        "id": "pl1",
                        "name": "Morning",
                        "owner": { "display_name": "Ada L" },
                        "tracks": { "total": 17 },
                        "public": true,
                    },
                    { "id": "pl2", "name": "Focus" },
                ]
            }
        });
        let playlists = parse_playlists(&body);
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].owner, "Ada L");
        assert_eq!(playlists[0].tracks_total, 17);
        assert!(playlists[0].public);
        // Partial objects degrade instead of being dropped.
        assert_eq!(playlists[1].owner, "Unknown");
        assert_eq!(playlists[1].tracks_total, 0);
    }

    #[test]
    fn tracks_join_multiple_artists() {
        let body = json!({
            "top_tracks": {
                "items": [{
                    "id": "t1",
                    "name": "Duet",
                    "artists": [{ "name": "A" }, { "name": "B" }],
                    "album": { "name": "Together" },
                    "duration_ms": 215_000,
                }]
            }
        });
        let tracks = parse_tracks(&body);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artist_line(), "A, B");
        assert_eq!(tracks[0].album, "Together");
        assert_eq!(tracks[0].duration_ms, 215_000);
        assert!(tracks[0].played_at.is_none());
    }

    #[test]
    fn recently_played_unnests_and_stamps() {
        let body = json!({
            "recently_played": {
                "items": [
                    {
                        "track": {
                            "id": "t9",
                            "name": "Late",
                            "artists": [{ "name": "N" }],
                            "album": { "name": "Night" },
                            "duration_ms": 180_000,
                        },
                        "played_at": "2024-05-01T22:15:30.123Z",
                    },
                    { "played_at": "2024-05-01T22:00:00Z" },
                ]
            }
        });
        let tracks = parse_recently_played(&body);
        // The entry without a track object is dropped.
        assert_eq!(tracks.len(), 1);
        let played = tracks[0].played_at.unwrap();
        assert_eq!(played.timestamp(), 1_714_601_730);
    }

    #[test]
    fn artists_read_followers_and_genres() {
        let body = json!({
            "top_artists": {
                "items": [{
                    "id": "a1",
                    "name": "Neon Collective",
                    "genres": ["synthwave", "electronic"],
                    "followers": { "total": 1_234_567 },
                    "popularity": 71,
                }]
            }
        });
        let artists = parse_artists(&body);
        assert_eq!(artists[0].genres.len(), 2);
        assert_eq!(artists[0].followers, 1_234_567);
        assert_eq!(artists[0].popularity, 71);
    }

    #[test]
    fn bare_payload_parses_without_the_envelope() {
        let body = json!({ "items": [{ "id": "pl1", "name": "Morning" }] });
        assert_eq!(parse_playlists(&body).len(), 1);
    }

    #[test]
    fn error_body_is_surfaced() {
        assert_eq!(
            body_error(&json!({ "error": "Invalid credentials" })).as_deref(),
            Some("Invalid credentials")
        );
        assert!(body_error(&json!({ "message": "ok" })).is_none());
    }

    #[test]
    fn api_error_displays_status_and_message() {
        let err = ApiError {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned 401: Invalid credentials");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = BackendClient::new("http://localhost:5000/api/");
        assert_eq!(client.url("/health"), "http://localhost:5000/api/health");
    }
}
