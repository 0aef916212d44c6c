use std::{fmt, time::Duration};

/// Unique identifier for an address provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderId(pub &'static str);

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The address providers this crate knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    BrasilApi,
    ViaCep,
    AwesomeApi,
}

impl ProviderKind {
    /// Every supported provider, in the order they are raced by default.
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::BrasilApi,
        ProviderKind::ViaCep,
        ProviderKind::AwesomeApi,
    ];

    pub fn id(self) -> ProviderId {
        match self {
            ProviderKind::BrasilApi => ProviderId("brasilapi"),
            ProviderKind::ViaCep => ProviderId("viacep"),
            ProviderKind::AwesomeApi => ProviderId("awesomeapi"),
        }
    }

    /// Public endpoint used when no override is configured.
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::BrasilApi => "https://brasilapi.com.br",
            ProviderKind::ViaCep => "https://viacep.com.br",
            ProviderKind::AwesomeApi => "https://cep.awesomeapi.com.br",
        }
    }
}

/// Configuration for a single address provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Which provider schema to speak.
    pub kind: ProviderKind,
    /// Base URL, without a trailing slash.
    pub base_url: String,
}

impl ProviderConfig {
    /// Points `kind` at its public endpoint.
    pub fn public(kind: ProviderKind) -> Self {
        Self {
            kind,
            base_url: kind.default_base_url().to_string(),
        }
    }

    /// Points `kind` at a custom endpoint, e.g. a mirror or a test server.
    pub fn with_base_url(kind: ProviderKind, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            kind,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Race strategy configuration.
///
/// Every selected provider is queried at once; the first successful answer
/// wins and the rest are abandoned.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Maximum number of providers to involve in a single lookup.
    ///
    /// Providers are taken in configuration order.
    pub max_providers: usize,

    /// Maximum time to wait for any provider to answer.
    ///
    /// Measured from the start of the lookup and applied to the whole race,
    /// not to each provider.
    pub overall_timeout: Duration,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            max_providers: usize::MAX,
            overall_timeout: Duration::from_secs(1),
        }
    }
}

impl RaceConfig {
    /// Creates a latency-first configuration.
    ///
    /// - Races every provider
    /// - 500ms deadline
    pub fn fast(providers_len: usize) -> Self {
        Self {
            max_providers: providers_len,
            overall_timeout: Duration::from_millis(500),
        }
    }

    /// Creates a configuration for slow or distant networks.
    ///
    /// - Races every provider
    /// - 5 second deadline
    pub fn patient(providers_len: usize) -> Self {
        Self {
            max_providers: providers_len,
            overall_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, overall_timeout: Duration) -> Self {
        self.overall_timeout = overall_timeout;
        self
    }
}
