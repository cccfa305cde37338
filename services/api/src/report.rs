use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use socios::error::AppError;
use socios::registry::{
    DirectoryFilter, DirectoryService, PadronCsvImporter, PartnerDocumentView,
};

use crate::infra::{read_json, InMemoryPartnerStore};

#[derive(Args, Debug)]
pub(crate) struct DirectorioArgs {
    /// Padron CSV with the partner roster
    #[arg(long)]
    pub(crate) padron_csv: PathBuf,
    /// Documents JSON (array of socio_documentos rows)
    #[arg(long)]
    pub(crate) documentos_json: Option<PathBuf>,
    /// Income JSON (array of {dni, receipt_number})
    #[arg(long)]
    pub(crate) ingresos_json: Option<PathBuf>,
    /// Free-text filter applied to DNI, names, and locality
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Restrict the listing to one locality
    #[arg(long)]
    pub(crate) localidad: Option<String>,
}

pub(crate) async fn run_directorio(args: DirectorioArgs) -> Result<(), AppError> {
    let DirectorioArgs {
        padron_csv,
        documentos_json,
        ingresos_json,
        query,
        localidad,
    } = args;

    let partners = PadronCsvImporter::from_path(padron_csv)?;
    let documents = match documentos_json {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let incomes = match ingresos_json {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let store = Arc::new(InMemoryPartnerStore::seeded(partners, documents, incomes));
    let service = DirectoryService::new(store);
    let filter = DirectoryFilter::new(query, localidad);
    let views = service.directory(&filter).await?;

    render_directory(&views);
    Ok(())
}

fn render_directory(views: &[PartnerDocumentView]) {
    println!("Directorio de socios ({} resultados)", views.len());

    for view in views {
        println!(
            "\n- {} | DNI {} | {} | {}",
            view.nombre_completo,
            view.partner.dni,
            view.partner.localidad,
            view.payment.status_label
        );

        if let Some(receipt) = &view.payment.receipt_number {
            println!("  Recibo: {receipt}");
        }

        if view.documents.is_empty() {
            println!("  Documentos: ninguno");
        } else {
            for document in &view.documents {
                let link = document
                    .link_documento
                    .as_deref()
                    .unwrap_or("sin enlace");
                println!("  Documento: {} ({link})", document.tipo_documento.label());
            }
        }

        if view.is_complete() {
            println!("  Faltantes: ninguno");
        } else {
            println!("  Faltantes: {}", view.missing_document_labels.join(", "));
        }
    }
}
