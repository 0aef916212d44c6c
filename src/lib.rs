//! A Brazilian postal-code (CEP) client that races lookups across multiple providers.
//!
//! This library sends the same lookup to several address providers at once and
//! returns the first successful answer, normalized into a common schema, while
//! bounding total latency with a hard deadline.
//!
//! # Quick Start
//!
//! ```no_run
//! use hedged_cep_client::{HedgedCepClient, ProviderConfig, ProviderKind, RaceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let providers = vec![
//!     ProviderConfig::public(ProviderKind::BrasilApi),
//!     ProviderConfig::public(ProviderKind::ViaCep),
//! ];
//!
//! let client = HedgedCepClient::new(providers, RaceConfig::default())?;
//!
//! let (provider, address) = client.lookup_address("29330-000").await?;
//! println!("{} answered first: {}/{}", provider, address.city(), address.region());
//! # Ok(())
//! # }
//! ```
//!
//! # Race Strategy
//!
//! 1. The key is validated; invalid keys never reach a provider
//! 2. Every selected provider is queried concurrently
//! 3. The first successful, normalized answer wins and the rest are cancelled
//! 4. If every provider fails, all failures are reported
//! 5. If the deadline elapses first, the race ends as timed out
//!
//! [`RaceCoordinator::resolve`] never returns an error; inspect the
//! [`RaceResult`] or use [`RaceResult::into_result`].

pub mod address;
pub mod channel;
pub mod client;
pub mod config;
pub mod errors;
pub mod key;
pub mod outcome;
pub mod provider;
pub mod race;
pub mod transport;

pub use address::NormalizedAddress;
pub use client::HedgedCepClient;
pub use config::{ProviderConfig, ProviderId, ProviderKind, RaceConfig};
pub use errors::{
    ErrorKind, LookupError, NormalizationError, RaceError, TransportError, ValidationError,
};
pub use key::LookupKey;
pub use outcome::{Failure, Outcome, RaceResult, Success};
pub use provider::ProviderAdapter;
pub use race::RaceCoordinator;
pub use transport::{HttpTransport, RawResponse, RequestSpec, Transport};
