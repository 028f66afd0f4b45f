use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
