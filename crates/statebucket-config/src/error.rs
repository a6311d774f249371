use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Invalid region '{0}'. Expected an AWS region name such as ap-southeast-2 or us-east-1"
    )]
    InvalidRegion(String),

    #[error("Invalid bucket prefix '{0}': {1}")]
    InvalidPrefix(String, &'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
