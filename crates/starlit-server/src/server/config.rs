use anyhow::bail;
use clap::Parser;
use core::fmt;
use core::time::Duration;

/// Runtime configuration for the `starlit-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Clone)]
#[command(
    name = "starlit-server",
    version,
    about = "Proxies quote requests to a language model without exposing the API key"
)]
pub struct CliArgs {
    /// Secret credential for the upstream generation API.
    ///
    /// Not required at start-up: while it is missing, every quote request is
    /// answered with `500`.
    ///
    /// Environment variable: `OPENAI_API_KEY`
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8888"))]
    pub server_addr: String,

    /// Endpoint of the generation API.
    ///
    /// Environment variable: `UPSTREAM_URL`
    #[arg(long, env = "UPSTREAM_URL", default_value_t = String::from(DEFAULT_UPSTREAM_URL))]
    pub upstream_url: String,

    /// Model asked for the quote.
    ///
    /// Environment variable: `MODEL`
    #[arg(long, env = "MODEL", default_value_t = String::from(DEFAULT_MODEL))]
    pub model: String,

    /// Seconds to wait for the generation API before giving up.
    ///
    /// Environment variable: `UPSTREAM_TIMEOUT_SECS`
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,
}

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct ServerConfig {
    /// `None` when unset or blank.
    pub api_key: Option<String>,
    pub server_addr: String,
    pub upstream_url: String,
    pub model: String,
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("server_addr", &self.server_addr)
            .field("upstream_url", &self.upstream_url)
            .field("model", &self.model)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl fmt::Debug for CliArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliArgs")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("server_addr", &self.server_addr)
            .field("upstream_url", &self.upstream_url)
            .field("model", &self.model)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.upstream_timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than 0");
        }

        if !(args.upstream_url.starts_with("https://") || args.upstream_url.starts_with("http://"))
        {
            bail!(
                "UPSTREAM_URL must be an http(s) URL, got `{}`",
                args.upstream_url
            );
        }

        let model = args.model.trim();
        if model.is_empty() {
            bail!("MODEL must not be empty");
        }

        let api_key = args
            .openai_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            api_key,
            server_addr: args.server_addr,
            upstream_url: args.upstream_url,
            model: model.to_string(),
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config(api_key: Option<&str>, upstream_url: &str) -> ServerConfig {
    ServerConfig {
        api_key: api_key.map(str::to_string),
        server_addr: "127.0.0.1:0".into(),
        upstream_url: upstream_url.into(),
        model: DEFAULT_MODEL.into(),
        upstream_timeout: Duration::from_secs(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            openai_api_key: Some("sk-test".into()),
            server_addr: "0.0.0.0:8888".into(),
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            model: DEFAULT_MODEL.into(),
            upstream_timeout_secs: 30,
        }
    }

    #[test]
    fn accepts_defaults() {
        let config = ServerConfig::try_from(args()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = ServerConfig::try_from(CliArgs {
            openai_api_key: Some("   ".into()),
            ..args()
        })
        .unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ServerConfig::try_from(CliArgs {
            upstream_timeout_secs: 0,
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_SECS"));
    }

    #[test]
    fn rejects_non_http_upstream() {
        assert!(
            ServerConfig::try_from(CliArgs {
                upstream_url: "ftp://example.com".into(),
                ..args()
            })
            .is_err()
        );
    }

    #[test]
    fn debug_redacts_key() {
        let config = ServerConfig::try_from(args()).unwrap();
        let shown = format!("{config:?} {:?}", args());
        assert!(!shown.contains("sk-test"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn parses_flags() {
        let args = CliArgs::try_parse_from([
            "starlit-server",
            "--openai-api-key",
            "sk-flag",
            "--server-addr",
            "127.0.0.1:9000",
            "--model",
            "gpt-4.1-mini",
        ])
        .unwrap();
        assert_eq!(args.openai_api_key.as_deref(), Some("sk-flag"));
        assert_eq!(args.server_addr, "127.0.0.1:9000");
        assert_eq!(args.model, "gpt-4.1-mini");
    }
}
