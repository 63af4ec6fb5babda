use std::time::Duration;

use pretty_assertions::assert_eq;
use triage_engine::{Category, ClassifySettings, Classifier, FailureKind, HttpClassifier};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClassifySettings {
    ClassifySettings {
        base_url: server.uri(),
        ..ClassifySettings::default()
    }
}

fn categories_body() -> serde_json::Value {
    serde_json::json!({
        "categories": [
            { "name": "Care", "probability": 72.5 },
            { "name": "Fairness", "probability": 12.0 }
        ]
    })
}

#[tokio::test]
async fn analyze_posts_json_and_returns_categories() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(serde_json::json!({ "text": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories_body()))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(settings_for(&server));
    let categories = classifier.analyze("hello").await.expect("analyze ok");

    assert_eq!(
        categories,
        vec![
            Category {
                name: "Care".to_string(),
                probability: 72.5,
            },
            Category {
                name: "Fairness".to_string(),
                probability: 12.0,
            },
        ]
    );
}

#[tokio::test]
async fn analyze_reports_rejection_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({ "message": "text too short" })),
        )
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(settings_for(&server));
    let err = classifier.analyze("hi").await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::ServerRejected {
            status: 422,
            server_message: Some("text too short".to_string()),
        }
    );
}

#[tokio::test]
async fn analyze_reports_rejection_without_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(settings_for(&server));
    let err = classifier.analyze("hello").await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::ServerRejected {
            status: 500,
            server_message: None,
        }
    );
}

#[tokio::test]
async fn analyze_times_out_as_no_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(categories_body()),
        )
        .mount(&server)
        .await;

    let settings = ClassifySettings {
        analyze_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let classifier = HttpClassifier::new(settings);
    let err = classifier.analyze("hello").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::NoResponse);
}

#[tokio::test]
async fn refused_connection_maps_to_no_response() {
    // Grab an address that stops listening when the server is dropped.
    let server = MockServer::start().await;
    let settings = settings_for(&server);
    drop(server);

    let classifier = HttpClassifier::new(settings);
    let err = classifier.analyze("hello").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::NoResponse);
}

#[tokio::test]
async fn invalid_base_address_is_a_build_failure() {
    let settings = ClassifySettings {
        base_url: "not a service address".to_string(),
        ..ClassifySettings::default()
    };

    let classifier = HttpClassifier::new(settings);
    let err = classifier.analyze("hello").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::RequestBuild);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(settings_for(&server));
    let err = classifier.analyze("hello").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Unknown);
}

#[tokio::test]
async fn upload_posts_multipart_and_returns_categories() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories_body()))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(settings_for(&server));
    let categories = classifier
        .upload("report.txt", b"quarterly report".to_vec())
        .await
        .expect("upload ok");

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Care");
}

#[tokio::test]
async fn upload_times_out_as_no_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(categories_body()),
        )
        .mount(&server)
        .await;

    let settings = ClassifySettings {
        upload_timeout: Some(Duration::from_millis(50)),
        ..settings_for(&server)
    };
    let classifier = HttpClassifier::new(settings);
    let err = classifier
        .upload("report.txt", b"quarterly report".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::NoResponse);
}

#[tokio::test]
async fn unbounded_upload_waits_out_a_slow_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(categories_body()),
        )
        .mount(&server)
        .await;

    let settings = ClassifySettings {
        upload_timeout: None,
        ..settings_for(&server)
    };
    let classifier = HttpClassifier::new(settings);
    let categories = classifier
        .upload("report.txt", b"quarterly report".to_vec())
        .await
        .expect("upload ok");

    assert_eq!(categories.len(), 2);
}

#[test]
fn accepts_known_document_extensions() {
    let settings = ClassifySettings::default();

    assert!(settings.is_accepted_document("report.txt"));
    assert!(settings.is_accepted_document("notes.PDF"));
    assert!(settings.is_accepted_document("minutes.docx"));
}

#[test]
fn rejects_unknown_and_bare_names() {
    let settings = ClassifySettings::default();

    assert!(!settings.is_accepted_document("archive.zip"));
    assert!(!settings.is_accepted_document("report"));
    assert!(!settings.is_accepted_document(".txt"));
}
