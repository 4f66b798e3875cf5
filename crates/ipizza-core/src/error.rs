/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unsupported service id: {0}")]
    UnknownServiceCode(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
