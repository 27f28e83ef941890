//! # gRPC Client Library
//!
//! Channel construction for outbound gRPC calls, with HTTP/2 keep-alive and
//! timeout tuning applied uniformly.
//!
//! Channels are created lazily so the service can start before its peers:
//!
//! ```ignore
//! use grpc_client::{ChannelConfig, create_channel_lazy_with_config};
//! use rpc::usuario::usuario_service_client::UsuarioServiceClient;
//!
//! let channel = create_channel_lazy_with_config("http://usuario:50051", ChannelConfig::default())?;
//! let client = UsuarioServiceClient::new(channel);
//! ```

pub mod channel;
pub mod error;

pub use channel::{ChannelConfig, create_channel_lazy, create_channel_lazy_with_config};
pub use error::{GrpcError, GrpcResult};
