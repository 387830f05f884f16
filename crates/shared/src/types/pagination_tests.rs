use super::pagination::*;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page(), 1);
    assert_eq!(request.limit(), 10);
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest::new(1).offset(), 0);
    assert_eq!(PageRequest::new(2).offset(), 10);
    assert_eq!(PageRequest::new(5).offset(), 40);
}

#[test]
fn test_page_zero_is_first_page() {
    assert_eq!(PageRequest::new(0).offset(), 0);
    let raw: PageRequest = serde_json::from_str(r#"{"pageNo":0}"#).unwrap();
    assert_eq!(raw.page(), 1);
}

#[test]
fn test_page_request_deserializes_page_no() {
    let request: PageRequest = serde_json::from_str(r#"{"pageNo":3}"#).unwrap();
    assert_eq!(request.page(), 3);

    let request: PageRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(request.page(), 1);
}

#[test]
fn test_page_response_total_pages() {
    // 25 items, 10 per page -> 3 pages
    let response: PageResponse<i32> = PageResponse::new(vec![], PageRequest::new(1), 25);
    assert_eq!(response.meta.total_pages, 3);
    assert_eq!(response.meta.per_page, 10);

    let response: PageResponse<i32> = PageResponse::new(vec![], PageRequest::new(1), 10);
    assert_eq!(response.meta.total_pages, 1);
}

#[test]
fn test_page_response_empty() {
    let response: PageResponse<i32> = PageResponse::new(vec![], PageRequest::new(1), 0);
    assert_eq!(response.meta.total_pages, 1);
    assert!(response.is_empty());
}

#[test]
fn test_page_response_map_keeps_meta() {
    let response = PageResponse::new(vec![1, 2, 3], PageRequest::new(2), 13);
    let mapped = response.map(|n| n * 10);
    assert_eq!(mapped.data, vec![10, 20, 30]);
    assert_eq!(mapped.meta.page, 2);
    assert_eq!(mapped.meta.total, 13);
}
