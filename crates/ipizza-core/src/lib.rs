//! iPizza Core: service codes, the mandatory fields of each message type,
//! and the payment/authentication/declined service groups.

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use registry::ServiceRegistry;
pub use types::{Field, FieldId, IbField, ServiceCode, ServiceGroup};
