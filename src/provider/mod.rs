//! Provider adapters.
//!
//! Each adapter knows one provider's URL layout and payload schema. Adapters
//! are pure: all I/O goes through the [`Transport`](crate::transport::Transport).

mod awesome_api;
mod brasil_api;
mod via_cep;

use std::{fmt, sync::Arc};

use serde::de::DeserializeOwned;

pub use awesome_api::AwesomeApi;
pub use brasil_api::BrasilApi;
pub use via_cep::ViaCep;

use crate::{
    address::NormalizedAddress,
    config::{ProviderConfig, ProviderId, ProviderKind},
    errors::NormalizationError,
    key::{digits_only, LookupKey},
    transport::{RawResponse, RequestSpec},
};

/// Builds requests for one provider and turns its answers into
/// [`NormalizedAddress`] values.
pub trait ProviderAdapter: fmt::Debug + Send + Sync {
    fn id(&self) -> ProviderId;

    /// Must be total: the key has already been validated.
    fn build_request(&self, key: &LookupKey) -> RequestSpec;

    /// Must never panic, whatever the response contains.
    fn normalize(&self, response: &RawResponse) -> Result<NormalizedAddress, NormalizationError>;
}

/// Instantiates the adapter described by `cfg`.
pub fn build_adapter(cfg: &ProviderConfig) -> Arc<dyn ProviderAdapter> {
    match cfg.kind {
        ProviderKind::BrasilApi => Arc::new(BrasilApi::new(&cfg.base_url)),
        ProviderKind::ViaCep => Arc::new(ViaCep::new(&cfg.base_url)),
        ProviderKind::AwesomeApi => Arc::new(AwesomeApi::new(&cfg.base_url)),
    }
}

/// Rejects non-2xx answers and decodes the body as `T`.
fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, NormalizationError> {
    if !response.is_success() {
        return Err(NormalizationError::UnexpectedStatus(response.status));
    }
    serde_json::from_slice(&response.body).map_err(|e| NormalizationError::Decode(e.to_string()))
}

/// Raw fields as a provider reported them, before mandatory-field checks.
struct Fields {
    postal_code: Option<String>,
    region: Option<String>,
    city: Option<String>,
    district: Option<String>,
    street: Option<String>,
}

impl Fields {
    /// A postal code and at least one of region/city are required.
    fn into_address(self) -> Result<NormalizedAddress, NormalizationError> {
        let postal_code = self
            .postal_code
            .map(|c| digits_only(&c))
            .filter(|c| !c.is_empty())
            .ok_or(NormalizationError::MissingField("postal_code"))?;

        let region = non_blank(self.region);
        let city = non_blank(self.city);
        if region.is_empty() && city.is_empty() {
            return Err(NormalizationError::MissingField("city"));
        }

        Ok(NormalizedAddress::new(
            postal_code,
            region,
            city,
            non_blank(self.district),
            non_blank(self.street),
        ))
    }
}

fn non_blank(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_adapter_respects_kind() {
        for kind in ProviderKind::ALL {
            let adapter = build_adapter(&ProviderConfig::public(kind));
            assert_eq!(adapter.id(), kind.id());
        }
    }

    #[test]
    fn decode_rejects_non_success_status() {
        let res: Result<serde_json::Value, _> = decode(&RawResponse::new(404, "{}"));
        assert_eq!(res, Err(NormalizationError::UnexpectedStatus(404)));
    }

    #[test]
    fn fields_require_postal_code() {
        let fields = Fields {
            postal_code: Some("  ".into()),
            region: Some("ES".into()),
            city: None,
            district: None,
            street: None,
        };
        assert_eq!(
            fields.into_address(),
            Err(NormalizationError::MissingField("postal_code"))
        );
    }

    #[test]
    fn missing_optional_fields_become_empty() {
        let fields = Fields {
            postal_code: Some("29330-000".into()),
            region: Some("ES".into()),
            city: Some("Muqui".into()),
            district: None,
            street: None,
        };
        let addr = fields.into_address().unwrap();
        assert_eq!(addr.postal_code(), "29330000");
        assert_eq!(addr.district(), "");
        assert_eq!(addr.street(), "");
    }
}
