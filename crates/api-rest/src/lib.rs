//! # API REST
//!
//! REST API for the prestadores back end.
//!
//! Handles:
//! - HTTP endpoints with axum, under `/v1/prestadores`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON rejection mapping, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `prestadores-core` for everything behind the handlers.

#![warn(rust_2018_idioms)]

pub mod error;
mod handlers;

use axum::routing::{get, patch, post};
use axum::Router;
use prestadores_core::Services;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::{afiliados, situaciones, solicitudes, system};

pub use error::ApiError;

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        system::health,
        system::ping,
        system::login,
        afiliados::list_afiliados,
        afiliados::get_afiliado,
        afiliados::get_historia_clinica,
        situaciones::list_situaciones,
        situaciones::create_situacion,
        situaciones::patch_situacion,
        situaciones::cambiar_estado_situacion,
        situaciones::delete_situacion,
        solicitudes::list_autorizaciones,
        solicitudes::get_autorizacion,
        solicitudes::create_autorizacion,
        solicitudes::update_autorizacion,
        solicitudes::cambiar_estado_autorizacion,
        solicitudes::list_recetas,
        solicitudes::get_receta,
        solicitudes::create_receta,
        solicitudes::update_receta,
        solicitudes::cambiar_estado_receta,
        solicitudes::list_reintegros,
        solicitudes::get_reintegro,
        solicitudes::create_reintegro,
        solicitudes::update_reintegro,
        solicitudes::cambiar_estado_reintegro,
    ),
    components(schemas(
        api_shared::health::HealthRes,
        api_shared::health::PingRes,
        api_shared::auth::LoginReq,
        api_shared::auth::LoginRes,
        api_shared::ErrorRes,
        api_shared::MessageRes,
        api_shared::AfiliadoBasico,
        api_shared::HistorialEstado,
        api_shared::CambioEstadoReq,
        api_shared::CambioEstadoRes,
        api_shared::CreateSolicitudRes,
        api_shared::PaginatedAutorizaciones,
        api_shared::PaginatedRecetas,
        api_shared::PaginatedReintegros,
        api_shared::AutorizacionListItem,
        api_shared::AutorizacionDetalle,
        api_shared::CreateAutorizacionReq,
        api_shared::UpdateAutorizacionReq,
        api_shared::RecetaListItem,
        api_shared::RecetaDetalle,
        api_shared::CreateRecetaReq,
        api_shared::UpdateRecetaReq,
        api_shared::ReintegroListItem,
        api_shared::ReintegroDetalle,
        api_shared::CreateReintegroReq,
        api_shared::UpdateReintegroReq,
        api_shared::Situacion,
        api_shared::IntegranteSituaciones,
        api_shared::SituacionesAfiliadoRes,
        api_shared::SituacionesGrupoRes,
        api_shared::SituacionesRes,
        api_shared::CreateSituacionReq,
        api_shared::CreateSituacionRes,
        api_shared::PatchSituacionReq,
        api_shared::CambioEstadoSituacionReq,
        api_shared::CambioEstadoSituacionRes,
        api_shared::AfiliadoListItem,
        api_shared::AfiliadoDetalle,
        api_shared::NotaTurno,
        api_shared::Turno,
        api_shared::HistoriaClinica,
    ))
)]
pub struct ApiDoc;

fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(system::ping))
        .route("/login", post(system::login))
        .route("/afiliados", get(afiliados::list_afiliados))
        .route("/afiliados/:id", get(afiliados::get_afiliado))
        .route(
            "/afiliados/:id/historia-clinica",
            get(afiliados::get_historia_clinica),
        )
        .route(
            "/afiliados/:id/situaciones",
            get(situaciones::list_situaciones).post(situaciones::create_situacion),
        )
        .route(
            "/afiliados/:id/situaciones/:situacion_id",
            patch(situaciones::patch_situacion).delete(situaciones::delete_situacion),
        )
        .route(
            "/afiliados/:id/situaciones/:situacion_id/estado",
            patch(situaciones::cambiar_estado_situacion),
        )
        .route(
            "/solicitudes/autorizaciones",
            get(solicitudes::list_autorizaciones).post(solicitudes::create_autorizacion),
        )
        .route(
            "/solicitudes/autorizaciones/:id",
            get(solicitudes::get_autorizacion).patch(solicitudes::update_autorizacion),
        )
        .route(
            "/solicitudes/autorizaciones/:id/estado",
            patch(solicitudes::cambiar_estado_autorizacion),
        )
        .route(
            "/solicitudes/recetas",
            get(solicitudes::list_recetas).post(solicitudes::create_receta),
        )
        .route(
            "/solicitudes/recetas/:id",
            get(solicitudes::get_receta).patch(solicitudes::update_receta),
        )
        .route(
            "/solicitudes/recetas/:id/estado",
            patch(solicitudes::cambiar_estado_receta),
        )
        .route(
            "/solicitudes/reintegros",
            get(solicitudes::list_reintegros).post(solicitudes::create_reintegro),
        )
        .route(
            "/solicitudes/reintegros/:id",
            get(solicitudes::get_reintegro).patch(solicitudes::update_reintegro),
        )
        .route(
            "/solicitudes/reintegros/:id/estado",
            patch(solicitudes::cambiar_estado_reintegro),
        )
}

/// Builds the full application: API routes, Swagger UI and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/v1/prestadores", v1_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
