//! HTTP handler functions for the rent map dashboard.

use actix_web::{HttpResponse, web};
use rent_map_analytics::to_feature_collection;
use rent_map_presentation::{render_error_page, render_page};
use rent_map_server_models::{ApiControl, ApiHealth, ApiZones, SelectionQueryParams};

use crate::{AppState, ServerError, render_view};

/// `GET /`
///
/// Renders the dashboard page for the selection in the query string.
pub async fn index(
    state: web::Data<AppState>,
    params: web::Query<SelectionQueryParams>,
) -> HttpResponse {
    let page = match render_view(&state, params.to_selection()).await {
        Ok(view) => render_page(&view.selection, &view.description, &view.figure)
            .map_err(ServerError::from),
        Err(e) => Err(e),
    };

    match page {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("Failed to render dashboard: {e}");
            HttpResponse::InternalServerError()
                .content_type("text/html; charset=utf-8")
                .body(render_error_page(&e.to_string()))
        }
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/options`
///
/// Returns the four filter controls and their fixed option tables.
pub async fn options() -> HttpResponse {
    HttpResponse::Ok().json(ApiControl::all())
}

/// `GET /api/zones`
///
/// Returns the aggregated zones for the selection in the query string.
pub async fn zones(
    state: web::Data<AppState>,
    params: web::Query<SelectionQueryParams>,
) -> HttpResponse {
    match render_view(&state, params.to_selection()).await {
        Ok(view) => {
            let range = view.aggregation.value_range();
            HttpResponse::Ok().json(ApiZones {
                description: view.description.to_string(),
                range: view.description.range,
                color_domain: range.map(|r| r.color_domain()),
                zones: to_feature_collection(&view.aggregation),
                selection: view.selection,
            })
        }
        Err(e) => {
            log::error!("Failed to aggregate zones: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}
