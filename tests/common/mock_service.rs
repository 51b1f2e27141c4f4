//! Mock service fixtures: JSON payload builders and wiremock endpoint setup

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Track payload as the metadata service renders it
pub fn track_json(title: &str, artists: &[&str]) -> Value {
    json!({
        "name": title,
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>(),
    })
}

/// Album item page; album items are track objects directly
pub fn album_page(tracks: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "items": tracks,
        "next": next,
    })
}

/// Playlist item page; each entry wraps a nullable track object
pub fn playlist_page(tracks: Vec<Option<Value>>, next: Option<&str>) -> Value {
    let items: Vec<_> = tracks
        .into_iter()
        .map(|track| json!({ "track": track }))
        .collect();
    json!({
        "items": items,
        "next": next,
    })
}

/// Mount the client-credentials token endpoint
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

/// Mount a token endpoint that rejects the credentials
pub async fn mount_token_rejection(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Mount a single track detail endpoint
pub async fn mount_track(server: &MockServer, id: &str, payload: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/tracks/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(server)
        .await;
}

/// Mount an album detail endpoint plus one page of items
pub async fn mount_album(server: &MockServer, id: &str, name: &str, items: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/albums/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": name })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/albums/{id}/tracks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Mount a playlist detail endpoint
pub async fn mount_playlist_detail(server: &MockServer, id: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/playlists/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": name })))
        .mount(server)
        .await;
}

/// Mount one page of playlist items at a given offset
pub async fn mount_playlist_page(server: &MockServer, id: &str, offset: u32, page: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/playlists/{id}/tracks")))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount the source search endpoint with a fixed hit for every query
pub async fn mount_search_hit(server: &MockServer, video_id: &str) {
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": { "videoId": video_id } }],
        })))
        .mount(server)
        .await;
}
