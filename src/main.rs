mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;
mod utils;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    handlers::{comments, dashboard, interviews, reminders, stream, users},
    middleware::auth::{auth_middleware, optional_auth_middleware},
    middleware::logging::log_requests,
    repositories::{Datastore, PostgresDatastore},
    utils::database::create_pool,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    pub identity_secret: String,
    pub stream_api_key: String,
    pub stream_api_secret: String,
}

/// Builds the full router. Identity gating differs per route: most reads on
/// the meeting path are public, `/interviews/mine` answers anonymous callers
/// with an empty list, and everything else requires a verified subject.
pub fn app(state: AppState) -> Router {
    let optional_routes = Router::new()
        .route("/interviews/mine", get(interviews::get_my_interviews))
        .layer(from_fn_with_state(state.clone(), optional_auth_middleware));

    let protected_routes = Router::new()
        .route("/interviews", post(interviews::create_interview))
        .route("/interviews", get(interviews::get_interviews))
        .route("/interviews/:id/comments", post(comments::add_comment))
        .route("/users", get(users::get_users))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/stream/token", get(stream::get_stream_token))
        .route("/reminders/trigger", post(reminders::trigger_reminders))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/users/sync", post(users::sync_user))
        .route("/users/:clerk_id", get(users::get_user_by_clerk_id))
        .route(
            "/interviews/stream/:stream_call_id",
            get(interviews::get_interview_by_stream_call_id),
        )
        .route(
            "/interviews/:id/status",
            put(interviews::update_interview_status),
        )
        .route("/interviews/:id/comments", get(comments::get_comments))
        .merge(optional_routes)
        .merge(protected_routes)
        .layer(from_fn(log_requests))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interview_platform_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let identity_secret =
        env::var("IDENTITY_JWT_SECRET").expect("IDENTITY_JWT_SECRET must be set");
    let stream_api_key = env::var("STREAM_API_KEY").expect("STREAM_API_KEY must be set");
    let stream_api_secret = env::var("STREAM_API_SECRET").expect("STREAM_API_SECRET must be set");

    let db = create_pool(&database_url).await?;

    sqlx::migrate!("./migrations").run(&db).await?;

    let state = AppState {
        store: Arc::new(PostgresDatastore::new(db)),
        identity_secret,
        stream_api_key,
        stream_api_secret,
    };

    let cors_origin =
        env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let cors = if cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(HeaderValue::from_static("*"))
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    } else {
        CorsLayer::new()
            .allow_origin(cors_origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    };

    let app = app(state.clone()).layer(cors).layer(DefaultBodyLimit::max(
        env::var("MAX_REQUEST_BODY_MB")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<usize>()
            .unwrap_or(2)
            * 1024
            * 1024,
    ));

    // Start background reminder scheduler
    let reminder_store = state.store.clone();
    tokio::spawn(async move {
        use crate::services::reminder::ReminderService;
        use tokio_cron_scheduler::{Job, JobScheduler};

        let sched = JobScheduler::new()
            .await
            .expect("Failed to create scheduler");

        // Run reminders daily at 8 AM
        let job = Job::new_async("0 0 8 * * *", move |_uuid, _l| {
            let store = reminder_store.clone();
            Box::pin(async move {
                let reminder_service = ReminderService::new(store);
                match reminder_service.process_due_reminders().await {
                    Ok(count) => tracing::info!("Daily reminder pass finished: {} due", count),
                    Err(e) => tracing::error!("Failed to process reminders: {}", e),
                }
            })
        })
        .expect("Failed to create reminder job");

        sched.add(job).await.expect("Failed to add job");
        sched.start().await.expect("Failed to start scheduler");

        tracing::info!("Reminder scheduler started - running daily at 8 AM");

        // Keep the scheduler running
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(3600)).await;
        }
    });

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    tracing::info!("Server running on http://0.0.0.0:8000");

    axum::serve(listener, app).await?;

    Ok(())
}
