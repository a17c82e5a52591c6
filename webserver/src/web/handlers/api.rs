//! REST API handlers for lead CRUD, import/export, and history

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use leads::core::csv;
use leads::{LeadError, LeadFilter, RecordStore};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{BuyerLead, HistoryEntry, LeadId, LeadInput};

use crate::error::WebServerResult;
use crate::state::AppState;
use crate::web::identity::{request_origin, Identity};

const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Query parameters of the list and export routes.
///
/// Filter values are handled leniently: an unknown enum spelling is
/// dropped from the filter instead of failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub q: Option<String>,
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub timeline: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> LeadFilter {
        LeadFilter {
            q: self.q.filter(|s| !s.is_empty()),
            city: self.city.as_deref().and_then(|s| s.parse().ok()),
            property_type: self.property_type.as_deref().and_then(|s| s.parse().ok()),
            status: self.status.as_deref().and_then(|s| s.parse().ok()),
            timeline: self.timeline.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// `POST /api/buyers`
pub async fn create_lead(
    State(state): State<AppState>,
    Identity(actor): Identity,
    headers: HeaderMap,
    Json(input): Json<LeadInput>,
) -> WebServerResult<impl IntoResponse> {
    let origin = request_origin(&headers);
    let lead = state.create.create(&actor, &origin, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": lead.id }))))
}

/// `GET /api/buyers`
pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> WebServerResult<Json<Vec<BuyerLead>>> {
    let leads = state.store.query(query.into_filter()).await?;
    Ok(Json(leads))
}

/// `GET /api/buyers/:id`
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebServerResult<Json<BuyerLead>> {
    let lead_id = parse_lead_id(&id)?;
    let lead = state
        .store
        .find_by_id(lead_id)
        .await?
        .ok_or(LeadError::NotFound { id })?;
    Ok(Json(lead))
}

/// `GET /api/buyers/:id/history`
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> WebServerResult<Json<Vec<HistoryEntry>>> {
    let lead_id = parse_lead_id(&id)?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let entries = state.store.query_history(lead_id, limit).await?;
    Ok(Json(entries))
}

/// `PUT /api/buyers/:id`
pub async fn update_lead(
    State(state): State<AppState>,
    Identity(actor): Identity,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<LeadInput>,
) -> WebServerResult<Json<BuyerLead>> {
    let lead_id = parse_lead_id(&id)?;
    let origin = request_origin(&headers);
    let updated = state.update.update(&actor, &origin, lead_id, &input).await?;
    Ok(Json(updated))
}

/// `POST /api/buyers/import` — body is the raw CSV document.
pub async fn import_leads(
    State(state): State<AppState>,
    Identity(actor): Identity,
    body: String,
) -> WebServerResult<Json<Value>> {
    let rows = csv::parse_rows(&body)?;
    let inserted = state.import.import(&actor, &rows).await?;
    Ok(Json(json!({ "inserted": inserted })))
}

/// `GET /api/buyers/export` — same filters as the list route.
pub async fn export_leads(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> WebServerResult<impl IntoResponse> {
    let leads = state.store.query(query.into_filter()).await?;
    let document = csv::export(&leads);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=buyers.csv",
            ),
        ],
        document,
    ))
}

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Unparseable ids behave like missing records, not like bad requests.
fn parse_lead_id(raw: &str) -> Result<LeadId, LeadError> {
    LeadId::from_string(raw).map_err(|_| LeadError::NotFound {
        id: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{City, Status};

    #[test]
    fn list_query_parses_known_filter_values() {
        let query = ListQuery {
            q: Some("asha".into()),
            city: Some("Mohali".into()),
            status: Some("Qualified".into()),
            ..Default::default()
        };
        let filter = query.into_filter();
        assert_eq!(filter.q.as_deref(), Some("asha"));
        assert_eq!(filter.city, Some(City::Mohali));
        assert_eq!(filter.status, Some(Status::Qualified));
        assert_eq!(filter.timeline, None);
    }

    #[test]
    fn unknown_filter_values_are_dropped() {
        let query = ListQuery {
            q: Some(String::new()),
            city: Some("Gotham".into()),
            ..Default::default()
        };
        let filter = query.into_filter();
        assert_eq!(filter.q, None, "empty q is dropped");
        assert_eq!(filter.city, None);
    }
}
