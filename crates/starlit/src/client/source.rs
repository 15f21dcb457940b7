use super::FetchError;
use crate::Quote;
use reqwest::Client;
use serde::Deserialize;

/// Where quotes come from.
///
/// Futures are not required to be `Send`: on the web the fetch runs on the
/// page's single thread.
pub trait QuoteSource {
    fn fetch(&self) -> impl Future<Output = Result<Quote, FetchError>>;
}

impl<S: QuoteSource + ?Sized> QuoteSource for &S {
    fn fetch(&self) -> impl Future<Output = Result<Quote, FetchError>> {
        (**self).fetch()
    }
}

/// Lenient view of the proxy's body: only `quote` is required.
#[derive(Deserialize)]
struct ProxyBody {
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    quote: Option<String>,
}

/// Fetches quotes from the proxy with `POST <endpoint>` and an empty JSON
/// object as body.
///
/// No timeout is configured; a hung request simply leaves the loader
/// spinning until the browser gives up.
#[derive(Clone, Debug)]
pub struct HttpQuoteSource {
    client: Client,
    endpoint: String,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuoteSource for HttpQuoteSource {
    async fn fetch(&self) -> Result<Quote, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body: ProxyBody = serde_json::from_slice(&bytes)?;
        match body.quote {
            Some(quote) if !quote.trim().is_empty() => {
                Ok(Quote::new(body.author.unwrap_or_default(), quote))
            }
            _ => Err(FetchError::MissingQuote),
        }
    }
}
