use serde::Deserialize;

use super::{decode, Fields, ProviderAdapter};
use crate::{
    address::NormalizedAddress,
    config::{ProviderId, ProviderKind},
    errors::NormalizationError,
    key::LookupKey,
    transport::{RawResponse, RequestSpec},
};

/// BrasilAPI CEP v1 (`/api/cep/v1/{cep}`).
#[derive(Debug, Clone)]
pub struct BrasilApi {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Payload {
    cep: Option<String>,
    state: Option<String>,
    city: Option<String>,
    neighborhood: Option<String>,
    street: Option<String>,
}

impl BrasilApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for BrasilApi {
    fn default() -> Self {
        Self::new(ProviderKind::BrasilApi.default_base_url())
    }
}

impl ProviderAdapter for BrasilApi {
    fn id(&self) -> ProviderId {
        ProviderKind::BrasilApi.id()
    }

    fn build_request(&self, key: &LookupKey) -> RequestSpec {
        RequestSpec {
            provider: self.id(),
            url: format!("{}/api/cep/v1/{}", self.base_url, key),
        }
    }

    fn normalize(&self, response: &RawResponse) -> Result<NormalizedAddress, NormalizationError> {
        let payload: Payload = decode(response)?;
        Fields {
            postal_code: payload.cep,
            region: payload.state,
            city: payload.city,
            district: payload.neighborhood,
            street: payload.street,
        }
        .into_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> LookupKey {
        LookupKey::parse("29330000").unwrap()
    }

    #[test]
    fn builds_v1_url() {
        let req = BrasilApi::new("http://localhost:8080/").build_request(&key());
        assert_eq!(req.url, "http://localhost:8080/api/cep/v1/29330000");
        assert_eq!(req.provider, ProviderId("brasilapi"));
    }

    #[test]
    fn normalizes_full_payload() {
        let body = r#"{"cep":"29330000","state":"ES","city":"Muqui","neighborhood":"","street":"","service":"open-cep"}"#;
        let addr = BrasilApi::default()
            .normalize(&RawResponse::new(200, body))
            .unwrap();
        assert_eq!(addr.postal_code(), "29330000");
        assert_eq!(addr.region(), "ES");
        assert_eq!(addr.city(), "Muqui");
        assert_eq!(addr.street(), "");
    }

    #[test]
    fn not_found_status_is_rejected() {
        let body = r#"{"name":"CepPromiseError","message":"Todos os serviços de CEP retornaram erro.","type":"service_error"}"#;
        let err = BrasilApi::default()
            .normalize(&RawResponse::new(404, body))
            .unwrap_err();
        assert_eq!(err, NormalizationError::UnexpectedStatus(404));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = BrasilApi::default()
            .normalize(&RawResponse::new(200, "{\"cep\": "))
            .unwrap_err();
        assert!(matches!(err, NormalizationError::Decode(_)));
    }
}
