use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use playground_core::{
    ApiBase, DataOutcome, DataRequest, MetaOutcome, QueryPairs, QueryParams, SheetReference,
    SheetSelector,
};
use playground_engine::{FailureKind, FetchSettings, ReqwestSheetApi, SheetApi};

const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/abc/edit#gid=0";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(playground_logging::initialize_for_tests);
}

fn api_for(server: &MockServer) -> ReqwestSheetApi {
    ReqwestSheetApi::new(FetchSettings::with_base_url(server.uri())).expect("client")
}

fn data_request(server: &MockServer, reference: &SheetReference, params: QueryParams) -> DataRequest {
    let query = QueryPairs::for_sheet(reference, &params);
    let base = ApiBase::resolve(Some(server.uri().as_str()), None);
    DataRequest {
        spreadsheet_id: reference.spreadsheet_id.clone(),
        api_url: playground_core::build_api_url(&base, &reference.spreadsheet_id, &query),
        query,
    }
}

#[tokio::test]
async fn resolve_sheet_sends_encoded_url_and_reads_reference() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet_meta"))
        .and(query_param("sheet_url", urlencoding::encode(SHEET_URL).into_owned()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "sheet_id_or_name": {"tab_sheet_id": null, "tab_sheet_name": "Sheet1"},
                "spread_sheet_id": "abc"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = api_for(&server).resolve_sheet(SHEET_URL).await;
    assert_eq!(
        outcome,
        MetaOutcome::Resolved(SheetReference::new(
            "abc",
            SheetSelector::ByName("Sheet1".to_string())
        ))
    );
}

#[tokio::test]
async fn resolve_sheet_classifies_error_statuses() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet_meta"))
        .and(query_param("sheet_url", "missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sheet_meta"))
        .and(query_param("sheet_url", "garbage"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error_message": "query parameter sheet_url is invalid"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(api.resolve_sheet("missing").await, MetaOutcome::NotFound);
    assert_eq!(api.resolve_sheet("garbage").await, MetaOutcome::Invalid);
}

#[tokio::test]
async fn fetch_data_uses_same_query_as_displayed_url() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "a"}],
            "pagination": {"offset": 0, "limit": 10}
        })))
        .mount(&server)
        .await;

    let reference = SheetReference::new("abc", SheetSelector::ByName("Sheet1".to_string()));
    let request = data_request(
        &server,
        &reference,
        QueryParams {
            offset: Some(0),
            limit: Some(10),
            row: None,
        },
    );

    let outcome = api_for(&server).fetch_data(&request).await;
    assert_eq!(
        outcome,
        DataOutcome::Response {
            status: 200,
            body: json!({"data": [{"name": "a"}], "pagination": {"offset": 0, "limit": 10}}),
        }
    );

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.query(), Some("sheet_name=Sheet1&offset=0&limit=10"));
    assert_eq!(
        request.api_url,
        format!("{}/sheet/abc?sheet_name=Sheet1&offset=0&limit=10", server.uri())
    );
}

#[tokio::test]
async fn fetch_data_surfaces_error_status_with_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet/abc"))
        .and(query_param("sheet_id", "7"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let reference = SheetReference::new("abc", SheetSelector::ById(7));
    let request = data_request(&server, &reference, QueryParams::default());

    let outcome = api_for(&server).fetch_data(&request).await;
    assert_eq!(
        outcome,
        DataOutcome::Response {
            status: 500,
            body: json!({"error": "boom"}),
        }
    );
}

#[tokio::test]
async fn slow_backend_is_a_transport_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet_meta"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::with_base_url(server.uri())
    };
    let api = ReqwestSheetApi::new(settings).expect("client");

    match api.resolve_sheet(SHEET_URL).await {
        MetaOutcome::Transport(detail) => assert!(detail.starts_with("timeout"), "{detail}"),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn service_account_is_read_from_meta() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"service_account": "reader@example.iam.gserviceaccount.com"})),
        )
        .mount(&server)
        .await;

    let account = api_for(&server).service_account().await.expect("account");
    assert_eq!(account, "reader@example.iam.gserviceaccount.com");
}

#[tokio::test]
async fn service_account_error_status_is_reported() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error_message": "no service account file"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).service_account().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789AB"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::with_base_url(server.uri())
    };
    let api = ReqwestSheetApi::new(settings).expect("client");

    let err = api.service_account().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(12)
        }
    );
}

#[tokio::test]
async fn large_data_body_is_still_a_response() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"name": "a"}]})))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::with_base_url(server.uri())
    };
    let api = ReqwestSheetApi::new(settings).expect("client");
    let reference = SheetReference::new("abc", SheetSelector::Unspecified);
    let request = data_request(&server, &reference, QueryParams::default());

    assert_eq!(
        api.fetch_data(&request).await,
        DataOutcome::Response {
            status: 200,
            body: json!({"data": [{"name": "a"}]}),
        }
    );
}

#[tokio::test]
async fn slow_data_stage_is_a_transport_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"data": []})),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::with_base_url(server.uri())
    };
    let api = ReqwestSheetApi::new(settings).expect("client");
    let reference = SheetReference::new("abc", SheetSelector::ById(0));
    let request = data_request(&server, &reference, QueryParams::default());

    match api.fetch_data(&request).await {
        DataOutcome::Transport(detail) => assert!(detail.starts_with("timeout"), "{detail}"),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn escaped_spreadsheet_id_reaches_backend_as_one_segment() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet/a%3Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let reference = SheetReference::new("a?b", SheetSelector::Unspecified);
    let request = data_request(&server, &reference, QueryParams::default());
    assert_eq!(request.api_url, format!("{}/sheet/a%3Fb", server.uri()));

    let outcome = api_for(&server).fetch_data(&request).await;
    assert_eq!(
        outcome,
        DataOutcome::Response {
            status: 200,
            body: json!({"data": []}),
        }
    );
}
