//! Wish endpoints
//!
//! Each handler maps 1:1 onto a [`crate::store::WishStore`] call.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidNewWish, ValidWishId};
use crate::models::Wish;
use crate::state::AppState;

/// Plain confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/wishes - create a wish
async fn create_wish(
    State(state): State<AppState>,
    ValidNewWish(new): ValidNewWish,
) -> Result<(StatusCode, Json<Wish>), ApiError> {
    let wish = state.store().create(new).await?;
    Ok((StatusCode::CREATED, Json(wish)))
}

/// GET /api/wishes - all wishes, newest first
async fn list_wishes(State(state): State<AppState>) -> Result<Json<Vec<Wish>>, ApiError> {
    let wishes = state.store().list().await?;
    Ok(Json(wishes))
}

/// GET /api/wishes/{id}
async fn get_wish(
    State(state): State<AppState>,
    ValidWishId(id): ValidWishId,
) -> Result<Json<Wish>, ApiError> {
    let wish = state.store().get(id).await?;
    Ok(Json(wish))
}

/// DELETE /api/wishes/{id}
async fn delete_wish(
    State(state): State<AppState>,
    ValidWishId(id): ValidWishId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store().delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Wish deleted successfully",
    }))
}

/// OPTIONS on wish paths that are not CORS preflights
async fn options_ok() -> Json<MessageResponse> {
    Json(MessageResponse { message: "OK" })
}

/// Wish routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/wishes",
            get(list_wishes).post(create_wish).options(options_ok),
        )
        .route(
            "/api/wishes/{id}",
            get(get_wish).delete(delete_wish).options(options_ok),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use axum::response::Response;
    use chrono::{DateTime, SubsecRound, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::db::SqliteWishStore;

    async fn app() -> Router {
        let store = SqliteWishStore::open_in_memory().await.unwrap();
        router().with_state(AppState::new(store))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/wishes")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, name: &str, wish: &str) -> Value {
        let body = serde_json::json!({ "name": name, "wish": wish }).to_string();
        let response = app.clone().oneshot(post_json(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn create_returns_full_record() {
        let app = app().await;
        let before = Utc::now().trunc_subsecs(6);

        let body = create(&app, "Alice", "world peace").await;

        assert_eq!(body["name"], "Alice");
        assert_eq!(body["wish"], "world peace");
        assert!(body["id"].as_i64().unwrap() > 0);
        let created_at: DateTime<Utc> = body["created_at"].as_str().unwrap().parse().unwrap();
        assert!(created_at >= before);
    }

    #[tokio::test]
    async fn create_rejects_missing_field() {
        let app = app().await;
        let response = app.oneshot(post_json(r#"{"name": "Alice"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn create_rejects_non_string_field() {
        let app = app().await;
        let response = app
            .oneshot(post_json(r#"{"name": "Alice", "wish": 42}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let app = app().await;
        let response = app
            .oneshot(post_json(r#"{"name": "", "wish": "world peace"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["detail"], "name cannot be empty");
    }

    #[tokio::test]
    async fn create_rejects_invalid_json() {
        let app = app().await;
        let response = app.oneshot(post_json("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn create_without_json_content_type_is_415() {
        let app = app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/wishes")
            .body(Body::from(r#"{"name": "Alice", "wish": "world peace"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = app().await;
        create(&app, "a", "one").await;
        create(&app, "b", "two").await;
        create(&app, "c", "three").await;

        let response = app.oneshot(request(Method::GET, "/api/wishes")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["name"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn list_empty_is_empty_array() {
        let app = app().await;
        let response = app.oneshot(request(Method::GET, "/api/wishes")).await.unwrap();
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn get_existing_wish() {
        let app = app().await;
        let created = create(&app, "Alice", "world peace").await;
        let uri = format!("/api/wishes/{}", created["id"]);

        let response = app.oneshot(request(Method::GET, &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn get_missing_is_404() {
        let app = app().await;
        let response = app
            .oneshot(request(Method::GET, "/api/wishes/999999"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "detail": "Wish not found" })
        );
    }

    #[tokio::test]
    async fn non_integer_id_is_422() {
        let app = app().await;
        let response = app
            .oneshot(request(Method::GET, "/api/wishes/abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_then_get_and_delete_again() {
        let app = app().await;
        let created = create(&app, "Alice", "world peace").await;
        let uri = format!("/api/wishes/{}", created["id"]);

        let response = app.clone().oneshot(request(Method::DELETE, &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "Wish deleted successfully" })
        );

        let response = app.clone().oneshot(request(Method::GET, &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(request(Method::DELETE, &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "Wish not found");
    }

    #[tokio::test]
    async fn plain_options_returns_ok_message() {
        let app = app().await;
        for uri in ["/api/wishes", "/api/wishes/5"] {
            let response = app.clone().oneshot(request(Method::OPTIONS, uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await, serde_json::json!({ "message": "OK" }));
        }
    }
}
