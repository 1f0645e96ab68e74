#![allow(dead_code)]

use std::time::Duration;

use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
use serde_json::{Value, json};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// Matches every track except ones titled "Nowhere", echoing request order
async fn convert(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("content-type").and_then(|v| v.to_str().ok()) != Some("application/json") {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(json!({})));
    }
    let tracks = body["tracks"].as_array().cloned().unwrap_or_default();
    let results: Vec<Value> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if t["title"] == "Nowhere" {
                json!({
                    "title": t["title"],
                    "artists": t["artists"],
                    "success": false,
                    "error": "No YouTube match"
                })
            } else {
                json!({
                    "title": t["title"],
                    "artists": t["artists"],
                    "success": true,
                    "youtubeId": format!("vid{i}"),
                    "youtubeTitle": format!("{} (Official Audio)", t["title"].as_str().unwrap_or_default())
                })
            }
        })
        .collect();
    let successful = results.iter().filter(|r| r["success"] == true).count();
    (
        StatusCode::OK,
        Json(json!({
            "summary": {
                "total": results.len(),
                "successful": successful,
                "failed": results.len() - successful
            },
            "results": results
        })),
    )
}

async fn playlist(Json(body): Json<Value>) -> Json<Value> {
    let cover = "https://i.scdn.co/image/playlist-cover";
    Json(json!({
        "playlist": {
            "name": "Chill Evening",
            "ownerName": "nick",
            "coverImageUrl": cover
        },
        "requested": body["url"],
        "results": [
            { "title": "Honeythief", "artists": ["Halou"], "youtubeId": "vid0", "albumArt": "https://i.scdn.co/image/honeythief" },
            { "title": "Fallback", "artists": ["Someone", "Else"], "youtubeId": "vid1", "albumArt": cover }
        ]
    }))
}

/// Well-behaved API with both endpoints.
pub fn api_router() -> Router {
    Router::new()
        .route("/api/convert", post(convert))
        .route("/api/playlist", post(playlist))
}

/// Both endpoints answer only after `delay`.
pub fn slow_router(delay: Duration) -> Router {
    let handler = move || async move {
        tokio::time::sleep(delay).await;
        Json(json!({ "results": [] }))
    };
    Router::new()
        .route("/api/convert", post(handler.clone()))
        .route("/api/playlist", post(handler))
}

/// Both endpoints fail with a plain-text 500.
pub fn failing_router() -> Router {
    let handler = || async { (StatusCode::INTERNAL_SERVER_ERROR, "Spotify quota exceeded") };
    Router::new()
        .route("/api/convert", post(handler))
        .route("/api/playlist", post(handler))
}

/// Conversion answer where one result carries explicit nulls.
pub fn null_fields_router() -> Router {
    let handler = || async {
        Json(json!({
            "summary": { "total": 2, "successful": 1, "failed": null },
            "results": [
                { "title": "Honeythief", "artists": ["Halou"], "success": true, "youtubeId": "vid0" },
                { "title": null, "artists": null, "success": false, "error": "lookup failed" }
            ]
        }))
    };
    Router::new().route("/api/convert", post(handler))
}

/// Conversion answer that is valid JSON but not a response object.
pub fn wrong_shape_router() -> Router {
    let handler = || async { Json(json!(["Honeythief"])) };
    Router::new().route("/api/convert", post(handler))
}

/// Both endpoints answer 200 with a body that is not JSON.
pub fn garbage_router() -> Router {
    let handler = || async { "<html>maintenance</html>" };
    Router::new()
        .route("/api/convert", post(handler))
        .route("/api/playlist", post(handler))
}
