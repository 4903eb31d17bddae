use model::env::{FORM_TABLE_CONDITIONAL_PUT, FORM_TABLE_NAME};

/// Settings for [`crate::DynamoDbRecordStore`], read once per execution context.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamoDbStoreConfig {
    pub table_name: String,
    /// Reject a put when the `form_id` already exists in the table
    pub conditional_put: bool,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),
    #[error("Invalid value {value:?} for {var} environment variable")]
    Invalid { var: &'static str, value: String },
}

impl DynamoDbStoreConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        DynamoDbStoreConfig {
            table_name: table_name.into(),
            conditional_put: false,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name: String = lookup(FORM_TABLE_NAME)
            .filter(|name| !name.trim().is_empty())
            .ok_or(ConfigError::Missing(FORM_TABLE_NAME))?;

        let conditional_put: bool = match lookup(FORM_TABLE_CONDITIONAL_PUT) {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" | "false" | "0" => false,
                "true" | "1" => true,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: FORM_TABLE_CONDITIONAL_PUT,
                        value,
                    });
                }
            },
        };

        Ok(DynamoDbStoreConfig {
            table_name,
            conditional_put,
        })
    }
}
