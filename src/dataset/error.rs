use thiserror::Error;

/// Errors raised while loading or validating a command dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Empty {field} in {context}")]
    EmptyField { field: &'static str, context: String },

    #[error("Duplicate {kind} '{name}' in {context}")]
    Duplicate {
        kind: &'static str,
        name: String,
        context: String,
    },

    #[error("Format for installer '{installer}' has no {{package}} placeholder")]
    MissingPackagePlaceholder { installer: String },

    #[error("Dataset declares no package managers")]
    NoPackageManagers,
}

impl DatasetError {
    pub fn empty(field: &'static str, context: impl Into<String>) -> Self {
        Self::EmptyField {
            field,
            context: context.into(),
        }
    }

    pub fn duplicate(kind: &'static str, name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
            context: context.into(),
        }
    }
}
