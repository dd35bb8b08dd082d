// tests/reachability_tests.rs
use page_reachability::check::{HttpNavigator, TransportKind};
use page_reachability::config::CheckSettings;
use page_reachability::{CheckError, CheckRequest, ErrorKind, ReachabilityChecker, Runner};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::{TcpListener, TcpSocket, TcpStream};

// Stub servers are local; keep any proxy in the environment out of the way.
fn settings() -> CheckSettings {
    CheckSettings {
        use_system_proxy: false,
        ..CheckSettings::default()
    }
}

fn checker_with_timeout(timeout: Duration) -> ReachabilityChecker {
    let navigator = HttpNavigator::new(&settings()).unwrap();
    ReachabilityChecker::with_navigator(Arc::new(navigator), timeout)
}

#[tokio::test]
async fn test_home_page_returns_200() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/home")
        .with_status(200)
        .with_body("<h1>Home</h1>")
        .create_async()
        .await;

    let checker = ReachabilityChecker::new(&settings()).unwrap();
    let request = CheckRequest::new(format!("{}/home", server.url()));
    let result = checker.check(&request).await;

    mock.assert_async().await;
    assert!(result.passed);
    assert_eq!(result.observed_status, Some(200));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_home_page_returns_404() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/home")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let checker = checker_with_timeout(Duration::from_secs(5));
    let result = checker
        .check(&CheckRequest::new(format!("{}/home", server.url())))
        .await;

    mock.assert_async().await;
    assert!(!result.passed);
    assert_eq!(result.observed_status, Some(404));
    assert_eq!(result.error.unwrap().to_string(), "expected 200, got 404");
}

#[tokio::test]
async fn test_server_error_is_mismatch() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;

    let result = checker_with_timeout(Duration::from_secs(5))
        .check(&CheckRequest::new(format!("{}/", server.url())))
        .await;

    assert_eq!(result.observed_status, Some(503));
    assert_eq!(result.error.unwrap().kind(), ErrorKind::StatusMismatch);
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mut server = mockito::Server::new_async().await;
    let redirect = server
        .mock("GET", "/")
        .with_status(301)
        .with_header("location", &format!("{}/home", server.url()))
        .create_async()
        .await;
    let home = server
        .mock("GET", "/home")
        .with_status(200)
        .create_async()
        .await;

    let result = checker_with_timeout(Duration::from_secs(5))
        .check(&CheckRequest::new(format!("{}/", server.url())))
        .await;

    redirect.assert_async().await;
    home.assert_async().await;
    assert!(result.passed);
    assert_eq!(result.observed_status, Some(200));
}

#[tokio::test]
async fn test_malformed_url_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = checker_with_timeout(Duration::from_secs(5))
        .check(&CheckRequest::new("not a url"))
        .await;

    mock.assert_async().await;
    assert!(!result.passed);
    assert_eq!(result.observed_status, None);
    assert_eq!(result.error.unwrap().kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    // Bind then drop to get a local port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = checker_with_timeout(Duration::from_secs(5))
        .check(&CheckRequest::new(format!("http://127.0.0.1:{}/home", port)))
        .await;

    let error = result.error.unwrap();
    assert!(!result.passed);
    assert_eq!(result.observed_status, None);
    assert_eq!(error.kind(), ErrorKind::Transport);
    assert_eq!(error.transport_kind(), Some(TransportKind::ConnectionRefused));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept connections and hold them open without ever answering.
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let timeout = Duration::from_millis(300);
    let start = Instant::now();
    let result = checker_with_timeout(timeout)
        .check(&CheckRequest::new(format!("http://{}/home", addr)))
        .await;
    let waited = start.elapsed();

    assert!(!result.passed);
    assert_eq!(result.observed_status, None);
    assert_eq!(result.error.unwrap().kind(), ErrorKind::Timeout);
    assert!(waited >= timeout);
    assert!(waited < timeout + Duration::from_secs(2), "waited {:?}", waited);
}

#[tokio::test]
async fn test_connect_timeout_reports_connect_limit() {
    // Backlog of zero and never accepted: once the queue is full, further
    // SYNs go unanswered and the connect hangs.
    let socket = TcpSocket::new_v4().unwrap();
    socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let listener = socket.listen(0).unwrap();
    let addr = listener.local_addr().unwrap();

    let mut fillers = Vec::new();
    for _ in 0..4 {
        let attempt = tokio::time::timeout(Duration::from_millis(200), TcpStream::connect(addr));
        if let Ok(Ok(stream)) = attempt.await {
            fillers.push(stream);
        }
    }

    let settings = CheckSettings {
        connect_timeout_secs: 1,
        timeout_secs: 5,
        ..settings()
    };
    let start = Instant::now();
    let result = ReachabilityChecker::new(&settings)
        .unwrap()
        .check(&CheckRequest::new(format!("http://{}/home", addr)))
        .await;
    let waited = start.elapsed();

    let error = result.error.unwrap();
    assert_eq!(error, CheckError::Timeout(Duration::from_secs(1)));
    assert_eq!(error.to_string(), "no response within 1s");
    assert!(waited < Duration::from_secs(4), "waited {:?}", waited);
    drop(listener);
}

#[tokio::test]
async fn test_runner_checks_environments_concurrently() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server.mock("GET", "/home").with_status(200).create_async().await;
    let _missing = server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;

    let requests = vec![
        CheckRequest::new(format!("{}/home", server.url())).named("home"),
        CheckRequest::new(format!("{}/missing", server.url())).named("missing"),
    ];

    let summary = Runner::new(checker_with_timeout(Duration::from_secs(5)))
        .run(requests)
        .await;

    assert_eq!(summary.passed(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.exit_code(), 1);
    assert_eq!(summary.results()[1].observed_status, Some(404));
}
