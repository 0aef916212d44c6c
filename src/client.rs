use std::sync::Arc;

use crate::{
    address::NormalizedAddress,
    config::{ProviderConfig, ProviderId, RaceConfig},
    errors::{RaceError, TransportError},
    outcome::RaceResult,
    provider::{build_adapter, ProviderAdapter},
    race::RaceCoordinator,
    transport::{HttpTransport, Transport, DEFAULT_REQUEST_TIMEOUT},
};

/// A postal-code client that races lookups across multiple providers.
///
/// Every lookup queries all selected providers at once and returns the first
/// successful answer, bounded by the configured overall timeout.
#[derive(Clone)]
pub struct HedgedCepClient {
    adapters: Arc<Vec<Arc<dyn ProviderAdapter>>>,
    coordinator: RaceCoordinator,
    cfg: RaceConfig,
}

impl HedgedCepClient {
    /// Creates a client that talks HTTP to the configured providers.
    ///
    /// # Example
    /// ```no_run
    /// use hedged_cep_client::{HedgedCepClient, ProviderConfig, ProviderKind, RaceConfig};
    ///
    /// let providers = vec![
    ///     ProviderConfig::public(ProviderKind::BrasilApi),
    ///     ProviderConfig::public(ProviderKind::ViaCep),
    /// ];
    ///
    /// let client = HedgedCepClient::new(providers, RaceConfig::default())?;
    /// # Ok::<(), hedged_cep_client::TransportError>(())
    /// ```
    pub fn new(provider_cfgs: Vec<ProviderConfig>, cfg: RaceConfig) -> Result<Self, TransportError> {
        let adapters = provider_cfgs.iter().map(build_adapter).collect();
        let transport = Arc::new(HttpTransport::with_request_timeout(request_timeout(&cfg))?);
        Ok(Self::with_transport(adapters, transport, cfg))
    }

    /// Creates a client over arbitrary adapters and transport.
    pub fn with_transport(
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        transport: Arc<dyn Transport>,
        cfg: RaceConfig,
    ) -> Self {
        Self {
            adapters: Arc::new(adapters),
            coordinator: RaceCoordinator::new(transport),
            cfg,
        }
    }

    /// Identifiers of the configured providers, in race order.
    pub fn providers(&self) -> Vec<ProviderId> {
        self.adapters.iter().map(|a| a.id()).collect()
    }

    pub fn config(&self) -> &RaceConfig {
        &self.cfg
    }

    /// Races up to `max_providers` providers for `key`.
    pub async fn lookup(&self, key: &str) -> RaceResult {
        let max_idx = self.cfg.max_providers.min(self.adapters.len());
        let selected = &self.adapters[..max_idx];

        self.coordinator
            .resolve(key, selected, self.cfg.overall_timeout)
            .await
    }

    /// Looks up `key` and returns the address with the provider that answered first.
    pub async fn lookup_address(
        &self,
        key: &str,
    ) -> Result<(ProviderId, NormalizedAddress), RaceError> {
        let winner = self.lookup(key).await.into_result()?;
        Ok((winner.provider, winner.address))
    }

    /// Looks up `key`, returning only the address without provider information.
    pub async fn lookup_address_any(&self, key: &str) -> Result<NormalizedAddress, RaceError> {
        let (_id, address) = self.lookup_address(key).await?;
        Ok(address)
    }
}

/// Per-request timeout for the HTTP transport.
///
/// Never shorter than the race deadline, so long deadlines are not cut short
/// by the transport.
fn request_timeout(cfg: &RaceConfig) -> std::time::Duration {
    cfg.overall_timeout.max(DEFAULT_REQUEST_TIMEOUT)
}
