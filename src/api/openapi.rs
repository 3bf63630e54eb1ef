//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::handlers;

/// Generated OpenAPI description, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "lead-dashboard",
        description = "Lead aggregation, pagination and edit API for the moving-leads dashboard."
    ),
    paths(
        handlers::leads::load_leads,
        handlers::leads::get_lead,
        handlers::leads::update_lead,
        handlers::leads::update_field,
        handlers::leads::list_duplicates,
        handlers::leads::list_booked,
        handlers::dashboard::get_dashboard,
        handlers::vendors::search_vendors,
        handlers::system::health_handler,
        handlers::system::granularities_handler,
    ),
    tags(
        (name = "Leads", description = "Lead collection and edits"),
        (name = "Dashboard", description = "Bucketed charts and the lead table"),
        (name = "Vendors", description = "Vendor lookup"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/api/v1/leads",
            "/api/v1/leads/{id}",
            "/api/v1/leads/{id}/fields/{field}",
            "/api/v1/leads/duplicates",
            "/api/v1/leads/booked",
            "/api/v1/dashboard",
            "/api/v1/vendors",
            "/health",
            "/config/granularities",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
