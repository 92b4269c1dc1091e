//! Purchase history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use insura_core::purchase::HistoryRecord;

use super::MessageQuery;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;
use crate::store::HistoryRepository;

/// Display format for payment timestamps (UTC).
const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One row of the history table.
pub struct HistoryRow {
    pub id: String,
    pub product: String,
    pub type_label: &'static str,
    pub date: String,
    pub price: i64,
    pub status: String,
}

impl From<HistoryRecord> for HistoryRow {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            product: record.product,
            type_label: record.product_type.label(),
            date: record.date.format(DATE_FORMAT).to_string(),
            price: record.price,
            status: record.status.to_string(),
        }
    }
}

/// History page template.
#[derive(Template, WebTemplate)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
    pub current_user: Option<CurrentUser>,
    pub rows: Vec<HistoryRow>,
    pub success: Option<String>,
}

/// Display every paid invoice, newest first.
///
/// The history is shared by everyone using the store, so the page is open
/// to visitors who are not logged in.
#[instrument(skip(state, current_user, query))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> HistoryTemplate {
    let rows = HistoryRepository::new(state.storage())
        .list()
        .into_iter()
        .map(HistoryRow::from)
        .collect();

    HistoryTemplate {
        current_user,
        rows,
        success: query.success_message(),
    }
}
