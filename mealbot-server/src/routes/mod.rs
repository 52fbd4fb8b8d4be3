//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI document (disable with `MEALBOT_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - `/api/v1` routes: chat proxy, recipes, sessions, experiments

pub mod doc;
mod health;
mod v1;

use crate::middleware::{cors, trace};
use crate::state::AppState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .nest("/api/v1", v1::router());

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::entities::memory_store;
    use axum::body::{Body, Bytes};
    use axum::http::{header, Request, StatusCode};
    use axum::routing::post;
    use axum::Json;
    use futures::StreamExt;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    async fn app_with(config: Config) -> Router {
        let store = memory_store().await;
        let state = AppState::new(config, store).expect("state");
        build(Arc::new(state))
    }

    /// Gateway stand-in that answers every chat turn with `reply`.
    async fn spawn_gateway(reply: Value) -> String {
        spawn_gateway_at(mealbot_gateway::DEFAULT_CHAT_PATH, StatusCode::OK, reply).await
    }

    async fn spawn_gateway_at(path: &str, status: StatusCode, reply: Value) -> String {
        let app = Router::new().route(
            path,
            post(move || {
                let reply = reply.clone();
                async move { (status, Json(reply)) }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn recipe_json(title: &str) -> Value {
        json!({
            "id": "ignored",
            "title": title,
            "description": "아침 메뉴",
            "difficulty": "쉬움",
            "cookTime": "15분",
            "ingredients": ["귀리", "우유"],
            "image": "https://img.example/oat.png",
            "rating": 4.5,
            "suitableFor": "소화가 약한 체질",
            "tags": ["아침"],
            "steps": ["끓인다"],
            "servings": "1인분",
            "nutritionalInfo": "300kcal"
        })
    }

    #[tokio::test]
    async fn health_is_served_with_trace_id() {
        let app = app_with(Config::for_tests("http://127.0.0.1:9")).await;
        let resp = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(trace::X_TRACE_ID));
    }

    #[tokio::test]
    async fn saved_recipe_can_be_fetched_by_new_id() {
        let app = app_with(Config::for_tests("http://127.0.0.1:9")).await;

        let (status, saved) = call(&app, post_json("/api/v1/recipes/save", recipe_json("오트밀"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = saved["id"].as_str().unwrap().to_owned();
        assert_ne!(id, "ignored");

        let (status, fetched) = call(&app, get(&format!("/api/v1/recipes/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "오트밀");
        assert_eq!(fetched["cookTime"], "15분");
    }

    #[tokio::test]
    async fn unknown_recipe_is_404() {
        let app = app_with(Config::for_tests("http://127.0.0.1:9")).await;
        let (status, body) = call(&app, get("/api/v1/recipes/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn proxy_chat_logs_both_turns_of_a_session() {
        let gateway = spawn_gateway(json!({"message": "따뜻한 차를 드세요", "is_recipe": false})).await;
        let app = app_with(Config::for_tests(gateway)).await;

        let (status, body) = call(
            &app,
            post_json(
                "/api/v1/proxy-chat",
                json!({
                    "session_id": "s-1",
                    "messages": [{"role": "user", "content": "속이 안 좋아요"}]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "따뜻한 차를 드세요", "is_recipe": false}));

        let (status, history) = call(&app, get("/api/v1/sessions/s-1/messages")).await;
        assert_eq!(status, StatusCode::OK);
        let turns: Vec<(&str, &str)> = history
            .as_array()
            .unwrap()
            .iter()
            .map(|m| (m["role"].as_str().unwrap(), m["content"].as_str().unwrap()))
            .collect();
        assert_eq!(
            turns,
            vec![("user", "속이 안 좋아요"), ("assistant", "따뜻한 차를 드세요")]
        );
    }

    #[tokio::test]
    async fn proxy_chat_stores_recipes_from_reply() {
        let list = json!([recipe_json("죽"), recipe_json("수프")]).to_string();
        let gateway = spawn_gateway(json!({"message": list, "is_recipe": true})).await;
        let app = app_with(Config::for_tests(gateway)).await;

        let (status, body) = call(
            &app,
            post_json(
                "/api/v1/proxy-chat",
                json!({"messages": [{"role": "user", "content": "레시피 추천"}]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_recipe"], true);

        let stored: Vec<Value> = serde_json::from_str(body["message"].as_str().unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0]["title"], "죽");
        assert_eq!(stored[1]["title"], "수프");

        let id = stored[1]["id"].as_str().unwrap();
        let (status, fetched) = call(&app, get(&format!("/api/v1/recipes/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "수프");
    }

    #[tokio::test]
    async fn empty_conversation_is_400() {
        let app = app_with(Config::for_tests("http://127.0.0.1:9")).await;
        let (status, _) = call(&app, post_json("/api/v1/proxy-chat", json!({"messages": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreachable_gateway_is_502() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let app = app_with(Config::for_tests(format!("http://{addr}"))).await;

        let (status, _) = call(
            &app,
            post_json(
                "/api/v1/proxy-chat",
                json!({"messages": [{"role": "user", "content": "hi"}]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn openapi_document_follows_swagger_flag() {
        let mut config = Config::for_tests("http://127.0.0.1:9");
        let app = app_with(config.clone()).await;
        let (status, _) = call(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        config.enable_swagger = true;
        let app = app_with(config).await;
        let (status, doc) = call(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/v1/proxy-chat"].is_object());
        assert!(doc["paths"]["/health"].is_object());
    }

    fn experiment_request() -> Value {
        json!({
            "qa_history_json": "[]",
            "provider": "openai",
            "model": "gpt-4o-mini",
            "prompt_str": "체질별 저녁 추천"
        })
    }

    #[tokio::test]
    async fn experiment_run_is_stored_and_listed() {
        let path = format!("{}/test", mealbot_gateway::DEFAULT_CHAT_PATH);
        let gateway = spawn_gateway_at(
            &path,
            StatusCode::OK,
            json!({
                "prompt_str": "체질별 저녁 추천",
                "provider": "openai",
                "model": "gpt-4o-mini",
                "qa_result": [{"q": "소음인?", "score": 1}],
                "qa_score": 0.8,
                "recipe_score": 0.6,
                "average_score": 0.7
            }),
        )
        .await;
        let app = app_with(Config::for_tests(gateway)).await;

        let (status, result) =
            call(&app, post_json("/api/v1/experiments/test", experiment_request())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["average_score"], 0.7);
        assert_eq!(result["recipe_result"], json!([]));

        let (status, listed) = call(&app, get("/api/v1/experiments")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["model"], "gpt-4o-mini");
        assert_eq!(listed[0]["qa_score"], 0.8);
        assert!(listed[0]["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn rejected_experiment_is_502_and_not_stored() {
        let path = format!("{}/test", mealbot_gateway::DEFAULT_CHAT_PATH);
        let gateway = spawn_gateway_at(
            &path,
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"detail": "qa_history_json is not valid"}),
        )
        .await;
        let app = app_with(Config::for_tests(gateway)).await;

        let (status, body) =
            call(&app, post_json("/api/v1/experiments/test", experiment_request())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("422"));

        let (_, listed) = call(&app, get("/api/v1/experiments")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn oversized_streamed_body_is_rejected_without_buffering_it_all() {
        const CHUNK: usize = 64 * 1024;
        const CHUNKS: usize = 160;

        let app = app_with(Config::for_tests("http://127.0.0.1:9")).await;
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let chunks = futures::stream::iter(0..CHUNKS).map(move |_| {
            counter.fetch_add(CHUNK, Ordering::SeqCst);
            Ok::<_, std::io::Error>(Bytes::from(vec![b' '; CHUNK]))
        });
        let req = Request::post("/api/v1/proxy-chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from_stream(chunks))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(
            pulled.load(Ordering::SeqCst) < CHUNK * CHUNKS / 2,
            "pulled {} bytes",
            pulled.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn small_json_bodies_still_reach_the_handler() {
        let app = app_with(Config::for_tests("http://127.0.0.1:9")).await;
        let body = recipe_json("작은 요청");
        assert!(body.to_string().len() <= 1024);

        let (status, saved) = call(&app, post_json("/api/v1/recipes/save", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["title"], "작은 요청");
    }
}
