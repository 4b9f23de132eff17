use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub async fn run_sse(options: super::cli::SseOptions, context: super::Context) -> Result<()> {
    let verbose = context.global.verbose;
    if verbose {
        eprintln!(
            "Starting catalog server with SSE transport on {}:{}...",
            options.host, options.port
        );
    }

    let addr = format!("{}:{}", options.host, options.port);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app_router = router(Arc::new(context)).layer(cors);

    if verbose {
        eprintln!("Catalog server listening on http://{}", addr);
        eprintln!("SSE endpoint: http://{}/sse", addr);
        eprintln!("Message endpoint: http://{}/message", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("listening on {addr}");

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(context: Arc<super::Context>) -> Router {
    Router::new()
        .route("/sse", get(sse_handler))
        .route("/message", post(message_handler))
        .with_state(context)
}

async fn sse_handler(
    State(context): State<Arc<super::Context>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let size = context.service.len().await;
    let stream = stream::once(async move {
        Ok(Event::default().data(format!("Catalog SSE endpoint ready ({size} tools)")))
    });
    Sse::new(stream)
}

async fn message_handler(
    State(context): State<Arc<super::Context>>,
    Json(request): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let request_str = serde_json::to_string(&request).unwrap_or_default();
    let response = super::handle_request(&request_str, &context).await;
    Json(serde_json::to_value(response).unwrap_or(serde_json::Value::Null))
}
