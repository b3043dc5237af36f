use super::config::EXPORT_PATH;
use super::coordinator::IssuedRequest;
use super::error::FetchError;
use super::query::{compile_export, QueryParams};
use super::state::FilterState;
use crate::shared::api_utils::api_url;
use contracts::dashboards::d410_inventory::{InventoryListResponse, InventoryPage};
use gloo_net::http::Request;

/// Joins an endpoint path and its query string.
pub fn request_url(path: &str, query: &QueryParams) -> String {
    if query.is_empty() {
        api_url(path)
    } else {
        format!("{}?{}", api_url(path), query.to_query_string())
    }
}

/// Load one page of inventory rows.
pub async fn fetch_inventory(path: &str, request: &IssuedRequest) -> Result<InventoryPage, FetchError> {
    let url = request_url(path, &request.query);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Http(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Payload(e.to_string()))?;

    parse_inventory_response(&body, request.page, request.page_size)
}

/// Decodes and normalizes a list response body.
pub fn parse_inventory_response(
    body: &str,
    page: u32,
    page_size: u32,
) -> Result<InventoryPage, FetchError> {
    let response: InventoryListResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;
    response
        .into_page(page, page_size)
        .map_err(FetchError::Unsuccessful)
}

/// Export link for the current filters.
pub fn export_url(state: &FilterState) -> String {
    request_url(EXPORT_PATH, &compile_export(state))
}

/// Opens the export in a new tab. The browser handles the download.
pub fn open_export(state: &FilterState) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    window
        .open_with_url_and_target(&export_url(state), "_blank")
        .map_err(|e| format!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_planning_payload() {
        let body = r#"{
            "success": true,
            "data": [{"brand": "Urban Gabru", "gb_sku": 100000661934, "currentStock": "12"}],
            "pagination": {"page": 2, "limit": 25, "total": 40, "totalPages": 2}
        }"#;
        let page = parse_inventory_response(body, 1, 10).unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].gb_sku.as_deref(), Some("100000661934"));
        assert_eq!(page.rows[0].current_stock, Some(12));
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_inventory_response("<html>", 1, 10),
            Err(FetchError::Payload(_))
        ));
        assert_eq!(
            parse_inventory_response(r#"{"success": false, "message": "DB down"}"#, 1, 10),
            Err(FetchError::Unsuccessful("DB down".to_string()))
        );
    }
}
