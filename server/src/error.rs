use dataset::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
