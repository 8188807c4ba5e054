use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use actions::Actions;
use database::PgPersistence;
use errors::ServerError;
use repositories::credentials::{CredentialsProvider, PgUsers};
use repositories::page_cache::{MemoryPageCache, PageCache, RedisPageCache};

pub mod actions;
pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod messages;
pub mod models;
pub mod repositories;

pub fn app(actions: Actions) -> Router {
    Router::new()
        .route("/dashboard/invoices", post(handlers::invoice::create))
        .route("/dashboard/invoices/delete", post(handlers::invoice::delete))
        .route("/dashboard/invoices/:id", post(handlers::invoice::update))
        .route("/login", post(handlers::auth::login))
        .route("/", get(handlers::hello_world))
        .layer(TraceLayer::new_for_http())
        .with_state(actions)
}

pub async fn axum() -> Result<(), ServerError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invoice_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv().ok();

    let config = config::Config::from_env()?;

    let pool = PgPoolOptions::new()
        .min_connections(config.pg.poolminsize)
        .max_connections(config.pg.poolmaxsize)
        .connect(&config.database_url())
        .await?;

    let cache: Arc<dyn PageCache> = match &config.redis {
        Some(redis_config) => {
            let client = redis::Client::open(redis_config.url.as_str())?;
            Arc::new(RedisPageCache::new(client))
        }
        None => {
            tracing::warn!("no redis configured, page cache invalidation stays in memory");
            Arc::new(MemoryPageCache::new())
        }
    };

    let verifier = CredentialsProvider::new(PgUsers::new(pool.clone()), config.auth.secret.clone());

    let actions = Actions::new(Arc::new(PgPersistence::new(pool)), cache, Arc::new(verifier))
        .with_locale(config.app.locale);

    let addr = config.listen_address().parse::<SocketAddr>()?;

    tracing::debug!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app(actions).into_make_service())
        .await
        .map_err(|err| ServerError::Serve(err.to_string()))
}
