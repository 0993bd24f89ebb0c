use axum::{Router, Server, middleware::from_fn};
use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager as DbConnectionManager},
};
use dochub_backend::{AppState, db::DbPool, relay};
use std::process;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match dochub_backend::config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    dochub_backend::init_tracing(&config);

    // Initialize database. A pool that cannot reach the database yet is
    // still usable later, so an unreachable database logs and continues.
    let manager = DbConnectionManager::<PgConnection>::new(&config.database_url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(config.database_max_connections)
        .build_unchecked(manager);

    match db.get() {
        Ok(_) => info!("Database connection established"),
        Err(e) => warn!("Database not reachable at startup: {}", e),
    }

    let addr: std::net::SocketAddr = match config.server_address().parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid server address {}: {}", config.server_address(), e);
            process::exit(1);
        }
    };

    // CORS configuration
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let state = Arc::new(AppState::new(db, config));

    // Relay state and the sweep task for dead connections
    let relay_state = relay::create_relay_state(Arc::new(state.db.clone()), &state.config);
    let relay_manager = relay_state.manager.clone();
    tokio::spawn(async move {
        relay::start_sweep_task(relay_manager).await;
    });

    let api_routes = dochub_backend::routes::create_router(state.clone()).layer(
        axum::middleware::from_fn_with_state(
            state.clone(),
            dochub_backend::middleware::auth::auth_middleware,
        ),
    );

    let app = Router::new()
        .nest("/api", api_routes)
        .merge(relay::create_relay_routes().with_state(relay_state))
        .layer(cors)
        .layer(from_fn(dochub_backend::middleware::logger::logger));

    info!("Server running at http://{}", addr);
    info!("WebSocket endpoint available at ws://{}/ws", addr);

    // Failing to bind the port is fatal.
    let server = match Server::try_bind(&addr) {
        Ok(builder) => builder.serve(app.into_make_service()),
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };

    if let Err(e) = server.await {
        error!("Server error: {}", e);
        process::exit(1);
    }
}
