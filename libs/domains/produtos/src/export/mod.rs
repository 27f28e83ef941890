//! PDF export of the catalog.
//!
//! ```text
//! find_page × N ──► ReportBuilder ──► read file ──► base64
//!                                                    │
//!            MailDispatcher ◄── EnviarEmail ◄── IdentityLookup
//! ```
//!
//! Stages run strictly in order. Rows are read in pages of
//! [`EXPORT_PAGE_SIZE`] until a page comes back short; records written while
//! the export runs can be skipped or read twice.

mod format;
mod report;

pub use format::{monetary_format, sim_nao, slug};
pub use report::{Alignment, PdfReportBuilder, ReportBuilder, ReportTable};

#[cfg(test)]
pub use report::MockReportBuilder;

use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProdutoError, ProdutoResult};
use crate::identity::IdentityLookup;
use crate::mail::MailDispatcher;
use crate::models::{EnviarEmail, FindAllFilter, FindAllOrder, ProdutoResumo};
use crate::repository::ProdutoRepository;

pub const EXPORT_PAGE_SIZE: u64 = 100;
pub const REPORT_TITLE: &str = "Listagem de Produtos";

const REPORT_HEADERS: [&str; 5] = [
    "Código",
    "Descrição",
    "Preco de Custo (R$)",
    "Preço de Venda (R$)",
    "Ativo",
];

const REPORT_ALIGNMENTS: [Alignment; 5] = [
    Alignment::Left,
    Alignment::Left,
    Alignment::Right,
    Alignment::Right,
    Alignment::Center,
];

/// Catalog rows as report cells.
pub fn produtos_table(rows: &[ProdutoResumo]) -> ReportTable {
    ReportTable {
        title: REPORT_TITLE.to_string(),
        headers: REPORT_HEADERS.iter().map(|h| h.to_string()).collect(),
        alignments: REPORT_ALIGNMENTS.to_vec(),
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.id.to_string(),
                    row.descricao.clone(),
                    monetary_format(row.preco_custo, 3),
                    monetary_format(row.preco_venda, 2),
                    sim_nao(row.ativo).to_string(),
                ]
            })
            .collect(),
    }
}

/// Builds the catalog PDF and mails it to the requesting user.
#[derive(Clone)]
pub struct ExportService {
    repository: Arc<dyn ProdutoRepository>,
    identity: Arc<dyn IdentityLookup>,
    reports: Arc<dyn ReportBuilder>,
    mail: Arc<dyn MailDispatcher>,
}

impl ExportService {
    pub fn new(
        repository: Arc<dyn ProdutoRepository>,
        identity: Arc<dyn IdentityLookup>,
        reports: Arc<dyn ReportBuilder>,
        mail: Arc<dyn MailDispatcher>,
    ) -> Self {
        Self {
            repository,
            identity,
            reports,
            mail,
        }
    }

    /// Returns `true` once the mail command is queued.
    ///
    /// Identity failures keep their own error; every other failure becomes
    /// [`ProdutoError::ExportFailed`].
    #[instrument(skip(self, order, filter))]
    pub async fn export_pdf(
        &self,
        id_usuario: i32,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<bool> {
        match self.run(id_usuario, order, filter).await {
            Ok(()) => Ok(true),
            Err(err @ ProdutoError::IdentityUnresolved(_))
            | Err(err @ ProdutoError::IdentityUnavailable(_)) => {
                tracing::warn!(error = %err, "PDF export aborted");
                Err(err)
            }
            Err(err) => {
                tracing::error!(error = %err, "PDF export failed");
                Err(match err {
                    ProdutoError::ExportFailed(cause) => ProdutoError::ExportFailed(cause),
                    other => ProdutoError::ExportFailed(other.to_string()),
                })
            }
        }
    }

    async fn run(
        &self,
        id_usuario: i32,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<()> {
        let rows = self.collect_rows(order, filter).await?;

        let path = self
            .reports
            .build(id_usuario, produtos_table(&rows))
            .await?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ProdutoError::ExportFailed(format!("{}: {}", path.display(), e)))?;
        let encoded = STANDARD.encode(bytes);

        let usuario = self.identity.find_one(id_usuario).await?;
        if usuario.id == 0 {
            return Err(ProdutoError::IdentityUnresolved(id_usuario));
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.mail
            .dispatch(EnviarEmail::relatorio(&usuario, filename, encoded))
            .await?;

        tracing::info!(
            rows = rows.len(),
            path = %path.display(),
            "PDF export queued"
        );
        Ok(())
    }

    /// Reads pages until one holds fewer than [`EXPORT_PAGE_SIZE`] rows.
    async fn collect_rows(
        &self,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<Vec<ProdutoResumo>> {
        let mut rows = Vec::new();
        let mut page = 0;

        loop {
            let batch = self
                .repository
                .find_page(page, EXPORT_PAGE_SIZE, order, filter.clone())
                .await?;
            let fetched = batch.len() as u64;
            rows.extend(batch);

            tracing::debug!(page, fetched, "Export page read");
            if fetched < EXPORT_PAGE_SIZE {
                return Ok(rows);
            }
            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MockIdentityLookup;
    use crate::mail::MockMailDispatcher;
    use crate::models::Usuario;
    use crate::repository::MockProdutoRepository;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn resumo(id: i32) -> ProdutoResumo {
        ProdutoResumo {
            id,
            descricao: format!("Produto {}", id),
            preco_custo: Decimal::new(125, 1),
            preco_venda: Decimal::new(1625, 2),
            ativo: id % 2 == 0,
        }
    }

    /// Repository holding `total` rows, expecting exactly `reads` page reads.
    fn repository(total: u64, reads: usize) -> MockProdutoRepository {
        let mut repo = MockProdutoRepository::new();
        repo.expect_find_page()
            .times(reads)
            .returning(move |page, size, _, _| {
                let start = page * size;
                let end = (start + size).min(total);
                Ok((start..end).map(|i| resumo(i as i32 + 1)).collect())
            });
        repo
    }

    fn ana() -> Usuario {
        Usuario {
            id: 5,
            nome: "Ana".into(),
            email: "ana@example.com".into(),
        }
    }

    /// Writes a stand-in report file and returns its path.
    async fn report_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("produto-export-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join(name);
        tokio::fs::write(&path, b"%PDF-1.3 test").await.unwrap();
        path
    }

    fn reports_returning(path: PathBuf, expected_rows: usize) -> MockReportBuilder {
        let mut reports = MockReportBuilder::new();
        reports
            .expect_build()
            .withf(move |id, table| *id == 5 && table.rows.len() == expected_rows)
            .times(1)
            .returning(move |_, _| Ok(path.clone()));
        reports
    }

    fn identity_returning(usuario: Usuario) -> MockIdentityLookup {
        let mut identity = MockIdentityLookup::new();
        identity
            .expect_find_one()
            .returning(move |_| Ok(usuario.clone()));
        identity
    }

    fn service(
        repo: MockProdutoRepository,
        identity: MockIdentityLookup,
        reports: MockReportBuilder,
        mail: MockMailDispatcher,
    ) -> ExportService {
        ExportService::new(
            Arc::new(repo),
            Arc::new(identity),
            Arc::new(reports),
            Arc::new(mail),
        )
    }

    #[test]
    fn test_table_formats_rows() {
        let table = produtos_table(&[resumo(2)]);
        assert_eq!(table.title, "Listagem de Produtos");
        assert_eq!(table.headers[2], "Preco de Custo (R$)");
        assert_eq!(
            table.rows[0],
            vec!["2", "Produto 2", "12,500", "16,25", "Sim"]
        );
        assert_eq!(table.alignments[4], Alignment::Center);
    }

    #[tokio::test]
    async fn test_export_reads_until_short_page() {
        let path = report_file("listagem-de-produtos-5-1.pdf").await;
        let mut mail = MockMailDispatcher::new();
        mail.expect_dispatch()
            .withf(|email| {
                email.to == "ana@example.com"
                    && email.context.name == "Ana"
                    && email.attachments.len() == 1
                    && email.attachments[0].filename == "listagem-de-produtos-5-1.pdf"
                    && email.attachments[0].base64 == STANDARD.encode(b"%PDF-1.3 test")
            })
            .times(1)
            .returning(|_| Ok(()));

        let export = service(
            repository(250, 3),
            identity_returning(ana()),
            reports_returning(path, 250),
            mail,
        );

        let result = export
            .export_pdf(5, FindAllOrder::default(), FindAllFilter::default())
            .await;
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn test_export_of_exact_multiple_reads_an_empty_page() {
        let path = report_file("exact.pdf").await;
        let mut mail = MockMailDispatcher::new();
        mail.expect_dispatch().times(1).returning(|_| Ok(()));

        let export = service(
            repository(200, 3),
            identity_returning(ana()),
            reports_returning(path, 200),
            mail,
        );

        assert!(
            export
                .export_pdf(5, FindAllOrder::default(), FindAllFilter::default())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_export_of_empty_catalog_reads_once() {
        let path = report_file("empty.pdf").await;
        let mut mail = MockMailDispatcher::new();
        mail.expect_dispatch().times(1).returning(|_| Ok(()));

        let export = service(
            repository(0, 1),
            identity_returning(ana()),
            reports_returning(path, 0),
            mail,
        );

        assert!(
            export
                .export_pdf(5, FindAllOrder::default(), FindAllFilter::default())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_user_is_unresolved_and_not_mailed() {
        let path = report_file("unknown.pdf").await;
        let mut mail = MockMailDispatcher::new();
        mail.expect_dispatch().never();

        let export = service(
            repository(3, 1),
            identity_returning(Usuario::default()),
            reports_returning(path, 3),
            mail,
        );

        let result = export
            .export_pdf(5, FindAllOrder::default(), FindAllFilter::default())
            .await;
        assert!(matches!(result, Err(ProdutoError::IdentityUnresolved(5))));
    }

    #[tokio::test]
    async fn test_identity_transport_failure_passes_through() {
        let path = report_file("rpc.pdf").await;
        let mut identity = MockIdentityLookup::new();
        identity.expect_find_one().returning(|_| {
            Err(ProdutoError::IdentityUnavailable(
                "connection refused".into(),
            ))
        });
        let mut mail = MockMailDispatcher::new();
        mail.expect_dispatch().never();

        let export = service(repository(1, 1), identity, reports_returning(path, 1), mail);

        let result = export
            .export_pdf(5, FindAllOrder::default(), FindAllFilter::default())
            .await;
        assert!(matches!(result, Err(ProdutoError::IdentityUnavailable(_))));
    }

    #[tokio::test]
    async fn test_store_failure_becomes_export_failed() {
        let mut repo = MockProdutoRepository::new();
        repo.expect_find_page()
            .returning(|_, _, _, _| Err(ProdutoError::Database("pool timed out".into())));
        let mut reports = MockReportBuilder::new();
        reports.expect_build().never();
        let mut mail = MockMailDispatcher::new();
        mail.expect_dispatch().never();

        let export = service(repo, MockIdentityLookup::new(), reports, mail);

        let result = export
            .export_pdf(5, FindAllOrder::default(), FindAllFilter::default())
            .await;
        assert!(
            matches!(result, Err(ProdutoError::ExportFailed(cause)) if cause.contains("pool timed out"))
        );
    }

    #[tokio::test]
    async fn test_missing_report_file_becomes_export_failed() {
        let mut reports = MockReportBuilder::new();
        reports
            .expect_build()
            .returning(|_, _| Ok(PathBuf::from("/nonexistent/produto/report.pdf")));
        let mut mail = MockMailDispatcher::new();
        mail.expect_dispatch().never();

        let export = service(repository(1, 1), MockIdentityLookup::new(), reports, mail);

        let result = export
            .export_pdf(5, FindAllOrder::default(), FindAllFilter::default())
            .await;
        assert!(matches!(result, Err(ProdutoError::ExportFailed(_))));
    }
}
