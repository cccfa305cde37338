use std::future::Future;

use serde::{Deserialize, Serialize};

use super::domain::{Partner, PartnerDocument};

/// Minimal projection of an `ingresos` row used to annotate payment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeRef {
    pub dni: String,
    #[serde(default)]
    pub receipt_number: Option<String>,
}

/// Read boundary over the hosted tabular store. Implementations own
/// transport, auth, and retry; this library only consumes the rows.
///
/// The fetches are independent and may run concurrently; the directory
/// service joins them before reconciling.
pub trait PartnerStore: Send + Sync {
    /// Partners ordered by paternal surname ascending.
    fn fetch_partners(
        &self,
    ) -> impl Future<Output = Result<Vec<Partner>, RetrievalError>> + Send;

    /// All partner documents, unordered.
    fn fetch_documents(
        &self,
    ) -> impl Future<Output = Result<Vec<PartnerDocument>, RetrievalError>> + Send;

    /// Income references keyed by DNI, unordered.
    fn fetch_income_refs(
        &self,
    ) -> impl Future<Output = Result<Vec<IncomeRef>, RetrievalError>> + Send;
}

/// Failure surfaced by the store; no retry is attempted here.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("store transport failed: {0}")]
    Transport(String),
    #[error("store rejected the session credentials")]
    Unauthorized,
    #[error("store returned malformed rows: {0}")]
    Malformed(String),
}
