use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("unknown permission '{module}' / '{entity}' / '{key}'")]
    UnknownPath {
        module: String,
        entity: String,
        key: String,
    },

    #[error("unknown OSHA entity '{0}'")]
    UnknownOshaEntity(String),
}
