//! Environment configuration for provider endpoints.

use std::env;

use hedged_cep_client::config::{ProviderConfig, ProviderKind};

/// Environment variable that overrides the base URL of `kind`.
pub fn base_url_env_key(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::BrasilApi => "BRASILAPI_BASE_URL",
        ProviderKind::ViaCep => "VIACEP_BASE_URL",
        ProviderKind::AwesomeApi => "AWESOMEAPI_BASE_URL",
    }
}

/// Builds the configuration for `kind`, honoring a base URL override if set.
pub fn provider_from_env(kind: ProviderKind) -> ProviderConfig {
    match env::var(base_url_env_key(kind)) {
        Ok(url) if !url.trim().is_empty() => ProviderConfig::with_base_url(kind, url.trim()),
        _ => ProviderConfig::public(kind),
    }
}

/// Builds provider configurations for `kinds`, in order, skipping duplicates.
///
/// Looks for the following environment variables:
/// - `BRASILAPI_BASE_URL`
/// - `VIACEP_BASE_URL`
/// - `AWESOMEAPI_BASE_URL`
pub fn providers_from_env(kinds: &[ProviderKind]) -> Vec<ProviderConfig> {
    let mut providers: Vec<ProviderConfig> = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        if providers.iter().any(|p| p.kind == kind) {
            continue;
        }
        providers.push(provider_from_env(kind));
    }

    providers
}
