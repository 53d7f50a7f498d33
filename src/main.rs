use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use marketplace_api::bootstrap::app_context::{AppContext, AppServices};
use marketplace_api::bootstrap::config::Config;
use marketplace_api::infrastructure::db::repositories::bid_repository_sqlx::SqlxBidRepository;
use marketplace_api::infrastructure::db::repositories::project_repository_sqlx::SqlxProjectRepository;
use marketplace_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            marketplace_api::presentation::http::auth::register,
            marketplace_api::presentation::http::auth::login,
            marketplace_api::presentation::http::auth::me,
            marketplace_api::presentation::http::projects::list_projects,
            marketplace_api::presentation::http::projects::create_project,
            marketplace_api::presentation::http::projects::get_project,
            marketplace_api::presentation::http::projects::update_project,
            marketplace_api::presentation::http::projects::delete_project,
            marketplace_api::presentation::http::bids::list_bids,
            marketplace_api::presentation::http::bids::create_bid,
            marketplace_api::presentation::http::bids::get_bid,
            marketplace_api::presentation::http::bids::update_bid,
            marketplace_api::presentation::http::bids::delete_bid,
            marketplace_api::presentation::http::health::health,
        ),
        components(schemas(
            marketplace_api::presentation::http::auth::RegisterRequest,
            marketplace_api::presentation::http::auth::LoginRequest,
            marketplace_api::presentation::http::auth::LoginResponse,
            marketplace_api::presentation::http::auth::UserResponse,
            marketplace_api::presentation::http::projects::ProjectResponse,
            marketplace_api::presentation::http::projects::ProjectListResponse,
            marketplace_api::presentation::http::projects::CreateProjectRequest,
            marketplace_api::presentation::http::projects::UpdateProjectRequest,
            marketplace_api::presentation::http::bids::BidResponse,
            marketplace_api::presentation::http::bids::BidListResponse,
            marketplace_api::presentation::http::bids::CreateBidRequest,
            marketplace_api::presentation::http::bids::UpdateBidRequest,
            marketplace_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration and login"),
            (name = "Projects", description = "Project postings"),
            (name = "Bids", description = "Bids on projects"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "marketplace_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting marketplace backend");

    // Database
    let pool = marketplace_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    marketplace_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let project_repo = Arc::new(SqlxProjectRepository::new(pool.clone()));
    let bid_repo = Arc::new(SqlxBidRepository::new(pool.clone()));

    let services = AppServices::new(user_repo, project_repo, bid_repo);
    let ctx = AppContext::new(cfg.clone(), services);

    let cors = build_cors(&cfg);

    let app = Router::new()
        .nest(
            "/api",
            marketplace_api::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api",
            marketplace_api::presentation::http::auth::routes(ctx.clone()),
        )
        .nest(
            "/api",
            marketplace_api::presentation::http::projects::routes(ctx.clone()),
        )
        .nest(
            "/api",
            marketplace_api::presentation::http::bids::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    match cfg
        .frontend_url
        .as_deref()
        .and_then(|origin| HeaderValue::from_str(origin).ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        None if cfg.is_production => {
            // FRONTEND_URL is mandatory in production (enforced at startup),
            // but fall back to deny-all rather than mirroring.
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
                .allow_methods(methods)
                .allow_headers(headers)
        }
        None => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    }
}
