use serde::Deserialize;

use super::{decode, Fields, ProviderAdapter};
use crate::{
    address::NormalizedAddress,
    config::{ProviderId, ProviderKind},
    errors::NormalizationError,
    key::LookupKey,
    transport::{RawResponse, RequestSpec},
};

/// AwesomeAPI CEP service (`/json/{cep}`).
#[derive(Debug, Clone)]
pub struct AwesomeApi {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Payload {
    cep: Option<String>,
    address: Option<String>,
    state: Option<String>,
    district: Option<String>,
    city: Option<String>,
}

impl AwesomeApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for AwesomeApi {
    fn default() -> Self {
        Self::new(ProviderKind::AwesomeApi.default_base_url())
    }
}

impl ProviderAdapter for AwesomeApi {
    fn id(&self) -> ProviderId {
        ProviderKind::AwesomeApi.id()
    }

    fn build_request(&self, key: &LookupKey) -> RequestSpec {
        RequestSpec {
            provider: self.id(),
            url: format!("{}/json/{}", self.base_url, key),
        }
    }

    fn normalize(&self, response: &RawResponse) -> Result<NormalizedAddress, NormalizationError> {
        let payload: Payload = decode(response)?;
        Fields {
            postal_code: payload.cep,
            region: payload.state,
            city: payload.city,
            district: payload.district,
            street: payload.address,
        }
        .into_address()
    }
}
