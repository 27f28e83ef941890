//! Produtos Domain
//!
//! Catalog CRUD with soft deactivation, paginated listing and the PDF
//! export that mails the report to the requesting user.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌──────────────────────────────────────┐
//! │   Service   │      │ ExportService                        │
//! │             │      │  ReportBuilder · IdentityLookup ·    │
//! │             │      │  MailDispatcher                      │
//! └──────┬──────┘      └──────┬───────────────────────────────┘
//!        │                    │
//! ┌──────▼────────────────────▼──┐
//! │ Repository                   │  ← Data access (trait + implementations)
//! └──────┬───────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_produtos::{
//!     handlers, ExportService, GrpcIdentityLookup, InMemoryProdutoRepository,
//!     PdfReportBuilder, ProdutoService, StreamMailDispatcher,
//! };
//! use std::sync::Arc;
//!
//! let repository = InMemoryProdutoRepository::new();
//! let export = ExportService::new(
//!     Arc::new(repository.clone()),
//!     Arc::new(GrpcIdentityLookup::new(channel)),
//!     Arc::new(PdfReportBuilder::new("tmp/export")),
//!     Arc::new(StreamMailDispatcher::from_redis(redis)),
//! );
//!
//! let router = handlers::router(ProdutoService::new(repository), export);
//! ```

pub mod entity;
pub mod error;
pub mod export;
pub mod handlers;
pub mod identity;
pub mod mail;
pub mod messages;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProdutoError, ProdutoResult};
pub use export::{ExportService, PdfReportBuilder, ReportBuilder, monetary_format};
pub use handlers::ApiDoc;
pub use identity::{GrpcIdentityLookup, IdentityLookup};
pub use mail::{MailDispatcher, MailStream, StreamMailDispatcher};
pub use models::{
    CreateProduto, EnviarEmail, ExportRequest, FilterCondition, FindAllFilter, FindAllOrder,
    Produto, ProdutoColumn, ProdutoResumo, SortDirection, UpdateProduto, Usuario,
};
pub use postgres::PgProdutoRepository;
pub use repository::{InMemoryProdutoRepository, ProdutoRepository};
pub use service::ProdutoService;
