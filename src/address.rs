use serde::Serialize;

/// Provider-independent address record.
///
/// Fields a provider omits are empty strings rather than missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAddress {
    postal_code: String,
    region: String,
    city: String,
    district: String,
    street: String,
}

impl NormalizedAddress {
    pub fn new(
        postal_code: impl Into<String>,
        region: impl Into<String>,
        city: impl Into<String>,
        district: impl Into<String>,
        street: impl Into<String>,
    ) -> Self {
        Self {
            postal_code: postal_code.into(),
            region: region.into(),
            city: city.into(),
            district: district.into(),
            street: street.into(),
        }
    }

    /// Eight-digit postal code.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// State abbreviation (UF), e.g. `ES`.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Neighborhood (bairro).
    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn street(&self) -> &str {
        &self.street
    }
}
