use super::*;
use crate::starfield::{DisplayList, Starfield, StarfieldConfig, Viewport};
use crate::{FALLBACK_QUOTES, Quote, SeededRandom, ThreadRandom};
use serde_json::json;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct SlowSource {
    calls: AtomicUsize,
}

impl QuoteSource for SlowSource {
    async fn fetch(&self) -> Result<Quote, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(Quote::new("Alda Merini", "Sono nata il ventuno a primavera."))
    }
}

struct FailingSource;

impl QuoteSource for FailingSource {
    async fn fetch(&self) -> Result<Quote, FetchError> {
        Err(FetchError::Status {
            status: 502,
            body: "bad gateway".into(),
        })
    }
}

async fn proxy_returning(template: ResponseTemplate) -> (MockServer, HttpQuoteSource) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-quote"))
        .and(body_json(json!({})))
        .respond_with(template)
        .mount(&server)
        .await;
    let source = HttpQuoteSource::new(format!("{}/generate-quote", server.uri()));
    (server, source)
}

fn assert_is_fallback(delivered: &Delivered) {
    assert_eq!(delivered.origin, QuoteOrigin::Fallback);
    assert!(
        FALLBACK_QUOTES
            .iter()
            .any(|(q, a)| delivered.quote.quote == *q && delivered.quote.author == *a),
        "not a fallback: {:?}",
        delivered.quote
    );
}

#[tokio::test]
async fn http_source_returns_proxy_quote() {
    let (_server, source) = proxy_returning(ResponseTemplate::new(200).set_body_json(json!({
        "author": "Leopardi",
        "quote": "Sempre caro mi fu quest'ermo colle.",
        "ts": 1_760_000_000_000u64
    })))
    .await;

    let delivered = fetch_or_fallback(&source, &mut ThreadRandom).await;
    assert_eq!(delivered.origin, QuoteOrigin::Remote);
    assert_eq!(delivered.quote.author, "Leopardi");
    assert_eq!(delivered.quote.quote, "Sempre caro mi fu quest'ermo colle.");
}

#[tokio::test]
async fn missing_author_is_tolerated() {
    let (_server, source) =
        proxy_returning(ResponseTemplate::new(200).set_body_json(json!({ "quote": "Notte." })))
            .await;
    let quote = source.fetch().await.unwrap();
    assert_eq!(quote.author, "");
    assert_eq!(quote.attribution(), "— Autore sconosciuto");
}

#[tokio::test]
async fn error_status_falls_back() {
    let (_server, source) = proxy_returning(
        ResponseTemplate::new(500).set_body_json(json!({ "error": "Missing OPENAI_API_KEY" })),
    )
    .await;

    let err = source.fetch().await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let delivered = fetch_or_fallback(&source, &mut ThreadRandom).await;
    assert_is_fallback(&delivered);
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let source = HttpQuoteSource::new(server.uri());

    assert!(matches!(source.fetch().await, Err(FetchError::Decode(_))));
    assert_is_fallback(&fetch_or_fallback(&source, &mut ThreadRandom).await);
}

#[tokio::test]
async fn empty_quote_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "author": "X", "quote": "" })))
        .mount(&server)
        .await;
    let source = HttpQuoteSource::new(server.uri());

    assert!(matches!(source.fetch().await, Err(FetchError::MissingQuote)));
}

#[tokio::test]
async fn unreachable_proxy_falls_back() {
    // Grab a free port and release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let source = HttpQuoteSource::new(format!("http://127.0.0.1:{port}/generate-quote"));
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_is_fallback(&fetch_or_fallback(&source, &mut ThreadRandom).await);
}

#[tokio::test]
async fn fallback_is_always_a_predefined_literal() {
    let mut rng = SeededRandom::new(99);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..64 {
        let delivered = fetch_or_fallback(&FailingSource, &mut rng).await;
        assert_is_fallback(&delivered);
        seen.insert(delivered.quote.quote);
    }
    assert_eq!(seen.len(), 2);
}

#[tokio::test]
async fn reveal_opens_modal_and_shows_quote() {
    let revealer = Revealer::new(SlowSource {
        calls: AtomicUsize::new(0),
    });
    let modal = Mutex::new(QuoteModal::new());

    let delivered = revealer.reveal(&modal, &mut ThreadRandom).await.unwrap();
    assert_eq!(delivered.origin, QuoteOrigin::Remote);

    let modal = modal.into_inner().unwrap();
    assert!(modal.is_visible());
    assert!(!modal.is_loading());
    assert_eq!(modal.meta().as_deref(), Some("— Alda Merini"));
    assert!(!revealer.is_fetching());
}

#[tokio::test]
async fn overlapping_triggers_are_ignored() {
    let revealer = Revealer::new(SlowSource {
        calls: AtomicUsize::new(0),
    });
    let modal = Mutex::new(QuoteModal::new());
    let mut rng_a = ThreadRandom;
    let mut rng_b = ThreadRandom;

    let (first, second) = tokio::join!(
        revealer.reveal(&modal, &mut rng_a),
        revealer.reveal(&modal, &mut rng_b),
    );
    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(revealer.source().calls.load(Ordering::SeqCst), 1);

    // Once the first fetch is done, a new trigger goes through.
    assert!(revealer.reveal(&modal, &mut rng_a).await.is_some());
    assert_eq!(revealer.source().calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn starfield_reveal_drives_the_modal() {
    let mut field = Starfield::new(
        Viewport::new(640.0, 480.0, 1.0),
        StarfieldConfig::default(),
        SeededRandom::new(21),
    );
    let revealer = Revealer::new(FailingSource);
    let modal = Mutex::new(QuoteModal::new());
    let mut canvas = DisplayList::new();
    let mut rng = SeededRandom::new(22);
    let mut reveals = 0;

    for i in 0..2_000 {
        canvas.reset();
        if field.frame(i as f64 * 16.0, &mut canvas).revealed {
            reveals += 1;
            let delivered = revealer.reveal(&modal, &mut rng).await.unwrap();
            assert_is_fallback(&delivered);
        }
    }

    assert_eq!(reveals, 1);
    let modal = modal.into_inner().unwrap();
    assert!(modal.is_visible());
    assert!(modal.quote().is_some_and(Quote::is_fallback));
}
