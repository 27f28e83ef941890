use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors raised while building a client channel
#[derive(Error, Debug)]
pub enum GrpcError {
  /// The address could not be parsed as an endpoint URI
  #[error("Invalid URI: {0}")]
  InvalidUri(#[from] tonic::transport::Error),

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
}

impl From<GrpcError> for tonic::Status {
  fn from(err: GrpcError) -> Self {
    tonic::Status::invalid_argument(err.to_string())
  }
}
