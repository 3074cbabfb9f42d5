use std::{sync::Arc, time::Duration};

use mockito::Matcher;
use speak_client::{
    config::Config,
    speech::{encoding::RequestEncoding, http::HttpBackend, sink::MemorySink},
    SpeakError, SpeakRequestHandler,
};

fn setup(server: &mockito::Server, encoding: RequestEncoding) -> (SpeakRequestHandler, Arc<MemorySink>) {
    let config = Config {
        endpoint: format!("{}/tts", server.url()),
        encoding,
        ..Config::default()
    };
    setup_with_config(&config)
}

fn setup_with_config(config: &Config) -> (SpeakRequestHandler, Arc<MemorySink>) {
    let backend = HttpBackend::from_config(config).unwrap();
    let sink = Arc::new(MemorySink::new());
    let handler = SpeakRequestHandler::new(Arc::new(backend), sink.clone());
    (handler, sink)
}

#[tokio::test]
async fn test_blank_text_issues_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/tts")
        .expect(0)
        .create_async()
        .await;

    let (handler, sink) = setup(&server, RequestEncoding::Form);
    let err = handler.speak("   ").await.unwrap_err();

    assert!(matches!(err, SpeakError::Validation(_)));
    assert_eq!(err.notification(), "Please enter some text.");
    assert_eq!(sink.source(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_success_updates_playback_source() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/tts")
        .match_body(Matcher::UrlEncoded("text".to_string(), "Hello".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"audio_url": "https://x/a.mp3"}"#)
        .expect(1)
        .create_async()
        .await;

    let (handler, sink) = setup(&server, RequestEncoding::Form);
    let outcome = handler.speak("Hello").await.unwrap();

    assert_eq!(outcome.audio_url, "https://x/a.mp3");
    assert_eq!(sink.source().as_deref(), Some("https://x/a.mp3"));
    assert_eq!(sink.play_count(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_relative_audio_url_and_autoplay() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/tts")
        .match_body(Matcher::Json(serde_json::json!({ "text": "Hello" })))
        .with_status(200)
        .with_body(r#"{"audio_url": "/static/0b1c.mp3", "message": "Demo mode: Generated placeholder audio file"}"#)
        .create_async()
        .await;

    let (handler, sink) = setup(&server, RequestEncoding::Json);
    let handler = handler.with_autoplay(true);
    let outcome = handler.speak("Hello").await.unwrap();

    let expected = format!("{}/static/0b1c.mp3", server.url());
    assert_eq!(sink.source(), Some(expected.clone()));
    assert_eq!(outcome.audio_url, expected);
    assert_eq!(sink.play_count(), 1);
    assert_eq!(outcome.playback_warning, None);
}

#[tokio::test]
async fn test_application_error_keeps_source() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/tts")
        .with_status(200)
        .with_body(r#"{"error": "synthesis failed"}"#)
        .create_async()
        .await;

    let (handler, sink) = setup(&server, RequestEncoding::Form);
    let err = handler.speak("Hello").await.unwrap_err();

    assert!(matches!(&err, SpeakError::Application(message) if message == "synthesis failed"));
    assert_eq!(err.notification(), "Error: synthesis failed");
    assert_eq!(sink.source(), None);
}

#[tokio::test]
async fn test_unexpected_shape_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/tts")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let (handler, sink) = setup(&server, RequestEncoding::Form);
    let err = handler.speak("Hello").await.unwrap_err();

    assert!(matches!(&err, SpeakError::Protocol(message) if message == "unexpected response format"));
    assert_eq!(sink.source(), None);
}

#[tokio::test]
async fn test_http_500_is_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/tts")
        .with_status(500)
        .with_body(r#"{"error": "Server error", "details": "disk full"}"#)
        .create_async()
        .await;

    let (handler, sink) = setup(&server, RequestEncoding::Form);
    let err = handler.speak("Hello").await.unwrap_err();

    match &err {
        SpeakError::Transport { status, message } => {
            assert_eq!(*status, Some(500));
            assert_eq!(message, "Server error: disk full");
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
    assert_eq!(sink.source(), None);
    assert_eq!(handler.metrics().get_stats().transport_errors, 1);
}

#[tokio::test]
async fn test_same_text_twice_is_two_cycles() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/tts")
        .match_body(Matcher::UrlEncoded("text".to_string(), "again".to_string()))
        .with_status(200)
        .with_body(r#"{"audio_url": "https://x/again.mp3"}"#)
        .expect(2)
        .create_async()
        .await;

    let (handler, sink) = setup(&server, RequestEncoding::Form);
    let first = handler.speak("again").await.unwrap();
    let second = handler.speak("again").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(sink.source().as_deref(), Some("https://x/again.mp3"));
    let stats = handler.metrics().get_stats();
    assert_eq!(stats.requests, 2);
    assert_eq!(stats.successes, 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_configured_timeout_is_transport_error() {
    // Accepts connections but never writes a response.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = Config {
        endpoint: format!("http://{}/tts", addr),
        timeout_secs: Some(1),
        ..Config::default()
    };
    let (handler, sink) = setup_with_config(&config);

    let err = tokio::time::timeout(Duration::from_secs(10), handler.speak("Hello"))
        .await
        .expect("request should time out on its own")
        .unwrap_err();

    assert!(matches!(err, SpeakError::Transport { status: None, .. }));
    assert_eq!(sink.source(), None);
    assert_eq!(handler.metrics().get_stats().transport_errors, 1);
    silent.abort();
}
