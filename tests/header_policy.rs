use httptape::{
    filter_headers, set_header_policy, HeaderPolicy, Headers, HttpTape, InteractionData,
    RequestData, RequestHandler, ResponseData, MASK,
};
use std::fs;

fn headers(entries: &[(&str, &str)]) -> Headers {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// The policy is process-wide, so this file holds a single test and owns the
// whole test binary.
#[test]
fn configured_policy_governs_comparison_and_storage() {
    set_header_policy(HeaderPolicy::new(
        vec!["content-type", "authorization", "x-api-key"],
        vec!["authorization", "x-api-key"],
    ));

    let raw = headers(&[
        ("Content-Type", "application/json"),
        ("Authorization", "Bearer secret-token"),
        ("X-Api-Key", "k-123456"),
        ("X-Trace-Id", "trace-1"),
    ]);

    let filtered = filter_headers(&raw);
    assert_eq!(
        filtered,
        headers(&[
            ("content-type", "application/json"),
            ("authorization", MASK),
            ("x-api-key", MASK),
        ])
    );
    // filtering is idempotent
    assert_eq!(filter_headers(&filtered), filtered);

    // recorded fixtures carry the same redaction the comparison sees
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("redacted.json");
    let tape = HttpTape::for_file(&path).unwrap();
    let request = RequestData {
        method: "GET".into(),
        url: "https://api.test/me".into(),
        headers: raw,
        body: None,
    };
    tape.on_response(
        &request,
        ResponseData {
            protocol: "HTTP/1.1".into(),
            status_code: 200,
            status_text: "OK".into(),
            headers: headers(&[("content-type", "application/json")]),
            body: None,
        },
    )
    .unwrap();
    tape.close().unwrap();

    let stored: Vec<InteractionData> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        stored[0].request.headers.get("authorization").map(String::as_str),
        Some(MASK)
    );
    assert!(stored[0].request.headers.get("x-trace-id").is_none());
}
