//! Fakes and helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use domain_produtos::export::{ReportBuilder, ReportTable};
use domain_produtos::*;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Identity service answering from a fixed table; unknown ids come back as id 0.
#[derive(Default)]
pub struct FakeIdentity {
    usuarios: HashMap<i32, Usuario>,
    unreachable: bool,
}

impl FakeIdentity {
    pub fn with(usuario: Usuario) -> Self {
        let mut usuarios = HashMap::new();
        usuarios.insert(usuario.id, usuario);
        Self {
            usuarios,
            unreachable: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            usuarios: HashMap::new(),
            unreachable: true,
        }
    }
}

#[async_trait]
impl IdentityLookup for FakeIdentity {
    async fn find_one(&self, id: i32) -> ProdutoResult<Usuario> {
        if self.unreachable {
            return Err(ProdutoError::IdentityUnavailable(
                "transport error".to_string(),
            ));
        }
        Ok(self.usuarios.get(&id).cloned().unwrap_or_default())
    }
}

/// Keeps every dispatched mail.
#[derive(Clone, Default)]
pub struct RecordingMail {
    pub sent: Arc<Mutex<Vec<EnviarEmail>>>,
}

impl RecordingMail {
    pub fn sent(&self) -> Vec<EnviarEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailDispatcher for RecordingMail {
    async fn dispatch(&self, email: EnviarEmail) -> ProdutoResult<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Writes a tiny placeholder file instead of a real PDF.
pub struct StubReports {
    dir: PathBuf,
    pub tables: Arc<Mutex<Vec<ReportTable>>>,
}

impl StubReports {
    pub fn new(test_name: &str) -> Self {
        Self {
            dir: scratch_dir(test_name),
            tables: Arc::default(),
        }
    }
}

#[async_trait]
impl ReportBuilder for StubReports {
    async fn build(&self, id_usuario: i32, table: ReportTable) -> ProdutoResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await.unwrap();
        let path = self.dir.join(format!("relatorio-{}.pdf", id_usuario));
        tokio::fs::write(&path, b"%PDF-stub").await.unwrap();
        self.tables.lock().unwrap().push(table);
        Ok(path)
    }
}

pub fn scratch_dir(test_name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "domain-produtos-{}-{}",
        test_name,
        std::process::id()
    ))
}

pub fn ana() -> Usuario {
    Usuario {
        id: 1,
        nome: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
    }
}

/// Router over an in-memory store with fake export collaborators.
pub fn app(
    repository: InMemoryProdutoRepository,
    identity: FakeIdentity,
    mail: RecordingMail,
    test_name: &str,
) -> Router {
    let export = ExportService::new(
        Arc::new(repository.clone()),
        Arc::new(identity),
        Arc::new(StubReports::new(test_name)),
        Arc::new(mail),
    );
    handlers::router(ProdutoService::new(repository), export)
}

pub async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
