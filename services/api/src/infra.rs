use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use socios::error::AppError;
use socios::registry::{
    IncomeRef, PadronCsvImporter, Partner, PartnerDocument, PartnerStore, RetrievalError,
};

use crate::cli::ServeArgs;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store backed by seed files. Stands in for the hosted tabular backend so
/// the service can run self-contained; partners are kept sorted by paternal
/// surname to honor the store contract.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPartnerStore {
    partners: Arc<Mutex<Vec<Partner>>>,
    documents: Arc<Mutex<Vec<PartnerDocument>>>,
    incomes: Arc<Mutex<Vec<IncomeRef>>>,
}

impl InMemoryPartnerStore {
    pub(crate) fn seeded(
        mut partners: Vec<Partner>,
        documents: Vec<PartnerDocument>,
        incomes: Vec<IncomeRef>,
    ) -> Self {
        partners.sort_by(|a, b| a.apellido_paterno.cmp(&b.apellido_paterno));
        Self {
            partners: Arc::new(Mutex::new(partners)),
            documents: Arc::new(Mutex::new(documents)),
            incomes: Arc::new(Mutex::new(incomes)),
        }
    }
}

impl PartnerStore for InMemoryPartnerStore {
    async fn fetch_partners(&self) -> Result<Vec<Partner>, RetrievalError> {
        Ok(self.partners.lock().expect("store mutex poisoned").clone())
    }

    async fn fetch_documents(&self) -> Result<Vec<PartnerDocument>, RetrievalError> {
        Ok(self.documents.lock().expect("store mutex poisoned").clone())
    }

    async fn fetch_income_refs(&self) -> Result<Vec<IncomeRef>, RetrievalError> {
        Ok(self.incomes.lock().expect("store mutex poisoned").clone())
    }
}

/// Build a store from the seed files named in `ServeArgs`; absent files mean
/// an empty collection.
pub(crate) fn store_from_args(args: &ServeArgs) -> Result<InMemoryPartnerStore, AppError> {
    let partners = match &args.padron_csv {
        Some(path) => PadronCsvImporter::from_path(path)?,
        None => Vec::new(),
    };
    let documents = match &args.documentos_json {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let incomes = match &args.ingresos_json {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    Ok(InMemoryPartnerStore::seeded(partners, documents, incomes))
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
