// Dashboard: one line per section with its record count

use anyhow::Result;
use backoffice_client::ApiClient;
use backoffice_core::ResourceKind;
use serde_json::{Map, Value};

use super::{for_resource, Document};
use crate::components::PageMeta;
use crate::output::{table_header, table_row};
use crate::session::Session;

const COLUMNS: [(&str, usize); 3] = [("SECTION", 18), ("TOTAL", 8), ("ROUTE", 16)];

pub async fn dashboard_page(client: &ApiClient, session: &Session) -> Result<Document> {
    let mut lines = vec![table_header(&COLUMNS)];
    let mut totals = Map::new();

    for kind in ResourceKind::ALL {
        // A one-item page is enough to read totalElements
        let total = for_resource!(kind, R => client.service::<R>().list(0, 1).await?.total_elements);
        let count = total.to_string();
        let route = format!("/{}", kind);
        lines.push(table_row(&[
            (kind.title(), COLUMNS[0].1),
            (count.as_str(), COLUMNS[1].1),
            (route.as_str(), COLUMNS[2].1),
        ]));
        totals.insert(kind.slug().to_string(), Value::from(total));
    }

    let meta = PageMeta::new("Dashboard")
        .with_description(format!("Welcome back, {}", session.display_name()));
    Ok(Document::new(meta, lines, Value::Object(totals)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_client::FakeTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_dashboard_counts_every_section() {
        let transport = FakeTransport::demo();
        let client = ApiClient::new(Arc::new(transport.clone()));

        let doc = dashboard_page(&client, &Session::anonymous()).await.unwrap();

        assert_eq!(doc.lines.len(), 1 + ResourceKind::ALL.len());
        assert_eq!(doc.data["applications"], 12);
        assert_eq!(doc.data["users"], 1);
        assert_eq!(doc.meta.description.as_deref(), Some("Welcome back, Guest"));
        assert_eq!(transport.requests().await.len(), ResourceKind::ALL.len());
    }

    #[tokio::test]
    async fn test_dashboard_fails_on_first_error() {
        let transport = FakeTransport::demo();
        transport
            .respond_next(backoffice_client::ApiResponse::new(500, Vec::new()))
            .await;
        let client = ApiClient::new(Arc::new(transport));

        let err = dashboard_page(&client, &Session::anonymous())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch blogs");
    }
}
