//! Talentscope backend binary: configuration, wiring, and the axum server.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::{middleware, routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use talentscope::adapters::auth::JwtSessionValidator;
use talentscope::adapters::email::{FailoverEmailSender, ResendEmailSender, SesEmailSender};
use talentscope::adapters::export::{ChromiumReportExporter, PrintpdfReportRenderer};
use talentscope::adapters::http::middleware::{auth_middleware, AuthState};
use talentscope::adapters::http::{
    assignments_routes, benchmarks_routes, clients_routes, dimensions_routes, emails_routes,
    groups_routes, profiles_routes, reports_routes, AssignmentsHandlers, BenchmarksHandlers,
    ClientsHandlers, EmailsHandlers, GroupsHandlers, ProfilesHandlers, ReportsHandlers,
};
use talentscope::adapters::postgres::{
    PostgresAnswerRepository, PostgresAssignmentRepository, PostgresBenchmarkRepository,
    PostgresClientRepository, PostgresFeedbackRepository, PostgresGroupRepository,
    PostgresProfileRepository, PostgresScoringReader,
};
use talentscope::application::handlers::assessment::{
    CreateAssignmentHandler, SubmitAnswersHandler,
};
use talentscope::application::handlers::directory::{
    BulkUploadGroupsHandler, BulkUploadProfilesHandler,
};
use talentscope::application::handlers::messaging::SendAssessmentEmailHandler;
use talentscope::application::handlers::reporting::{BuildReportHandler, ExportReportHandler};
use talentscope::config::AppConfig;
use talentscope::ports::{
    AnswerRepository, AssignmentRepository, BenchmarkRepository, ClientRepository, EmailSender,
    FeedbackRepository, GroupRepository, ProfileRepository, ReportExporter, ReportRenderer,
    ScoringReader, SessionValidator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting talentscope backend"
    );

    // Database pool.
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Storage adapters.
    let clients: Arc<dyn ClientRepository> = Arc::new(PostgresClientRepository::new(pool.clone()));
    let profiles: Arc<dyn ProfileRepository> =
        Arc::new(PostgresProfileRepository::new(pool.clone()));
    let groups: Arc<dyn GroupRepository> = Arc::new(PostgresGroupRepository::new(pool.clone()));
    let assignments: Arc<dyn AssignmentRepository> =
        Arc::new(PostgresAssignmentRepository::new(pool.clone()));
    let answers: Arc<dyn AnswerRepository> = Arc::new(PostgresAnswerRepository::new(pool.clone()));
    let feedback: Arc<dyn FeedbackRepository> =
        Arc::new(PostgresFeedbackRepository::new(pool.clone()));
    let benchmarks: Arc<dyn BenchmarkRepository> =
        Arc::new(PostgresBenchmarkRepository::new(pool.clone()));
    let scoring: Arc<dyn ScoringReader> = Arc::new(PostgresScoringReader::new(pool.clone()));

    // Email provider chain: SES preferred, Resend fallback.
    let from_header = config.email.from_header();
    let mut email_chain = FailoverEmailSender::new();
    if let (true, Some(region)) = (config.email.ses_enabled, config.email.ses_region.clone()) {
        email_chain = email_chain.with_sender(Arc::new(
            SesEmailSender::from_default_chain(region, from_header.clone()).await,
        ));
    }
    if let Some(key) = &config.email.resend_api_key {
        email_chain =
            email_chain.with_sender(Arc::new(ResendEmailSender::new(key, from_header.clone())));
    }
    if !config.email.any_provider_configured() {
        tracing::warn!("No email provider configured; sends will return 503");
    }
    let email_sender: Arc<dyn EmailSender> = Arc::new(email_chain);

    // Export adapters.
    let exporter: Arc<dyn ReportExporter> =
        Arc::new(ChromiumReportExporter::new(config.export.clone()));
    let renderer: Arc<dyn ReportRenderer> = Arc::new(PrintpdfReportRenderer::new());

    // Use-case handlers.
    let bulk_profiles = Arc::new(BulkUploadProfilesHandler::new(
        clients.clone(),
        profiles.clone(),
    ));
    let bulk_groups = Arc::new(BulkUploadGroupsHandler::new(clients.clone(), groups.clone()));
    let create_assignment = Arc::new(CreateAssignmentHandler::new(
        profiles.clone(),
        assignments.clone(),
    ));
    let submit_answers = Arc::new(SubmitAnswersHandler::new(
        assignments.clone(),
        answers.clone(),
        feedback.clone(),
    ));
    let build_report = Arc::new(BuildReportHandler::new(profiles.clone(), scoring.clone()));
    let export_report = Arc::new(ExportReportHandler::new(
        profiles.clone(),
        scoring.clone(),
        exporter,
        renderer,
        config.export.clone(),
    ));
    let send_email = Arc::new(SendAssessmentEmailHandler::new(email_sender));

    // Authentication.
    let validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(&config.auth));
    let auth_state = AuthState {
        validator,
        cookie_name: config.auth.cookie_name.clone(),
    };

    // Router assembly.
    let api = Router::new()
        .nest("/clients", clients_routes(ClientsHandlers::new(clients)))
        .nest(
            "/profiles",
            profiles_routes(ProfilesHandlers::new(profiles, bulk_profiles)),
        )
        .nest(
            "/groups",
            groups_routes(GroupsHandlers::new(groups, bulk_groups)),
        )
        .nest(
            "/assignments",
            assignments_routes(AssignmentsHandlers::new(
                assignments,
                create_assignment,
                submit_answers,
            )),
        )
        .nest(
            "/benchmarks",
            benchmarks_routes(BenchmarksHandlers::new(benchmarks.clone())),
        )
        .nest(
            "/dimensions",
            dimensions_routes(BenchmarksHandlers::new(benchmarks)),
        )
        .nest(
            "/reports",
            reports_routes(ReportsHandlers::new(
                build_report,
                export_report,
                config.auth.cookie_name.clone(),
                &config.export.report_base_url,
            )),
        )
        .nest("/emails", emails_routes(EmailsHandlers::new(send_email)));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
    }
    tracing::info!("Shutdown signal received");
}
