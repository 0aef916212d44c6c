use serde::Deserialize;
use serde_json::Value;

use super::{decode, Fields, ProviderAdapter};
use crate::{
    address::NormalizedAddress,
    config::{ProviderId, ProviderKind},
    errors::NormalizationError,
    key::LookupKey,
    transport::{RawResponse, RequestSpec},
};

/// ViaCEP JSON web service (`/ws/{cep}/json/`).
#[derive(Debug, Clone)]
pub struct ViaCep {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Payload {
    cep: Option<String>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    // ViaCEP answers 200 with `"erro": true` (or `"true"`) for unknown CEPs.
    erro: Option<Value>,
}

impl Payload {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl ViaCep {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ViaCep {
    fn default() -> Self {
        Self::new(ProviderKind::ViaCep.default_base_url())
    }
}

impl ProviderAdapter for ViaCep {
    fn id(&self) -> ProviderId {
        ProviderKind::ViaCep.id()
    }

    fn build_request(&self, key: &LookupKey) -> RequestSpec {
        RequestSpec {
            provider: self.id(),
            url: format!("{}/ws/{}/json/", self.base_url, key),
        }
    }

    fn normalize(&self, response: &RawResponse) -> Result<NormalizedAddress, NormalizationError> {
        let payload: Payload = decode(response)?;
        if payload.is_not_found() {
            return Err(NormalizationError::NotFound);
        }

        Fields {
            postal_code: payload.cep,
            region: payload.uf,
            city: payload.localidade,
            district: payload.bairro,
            street: payload.logradouro,
        }
        .into_address()
    }
}
