//! Partner registry: the domain model for socios and their documents, the
//! store boundary, and the reconciliation pipeline that backs the directory.

pub mod domain;
pub mod filter;
pub mod import;
pub mod reconcile;
pub mod router;
pub mod service;
pub mod store;
pub mod views;

pub use domain::{DocumentKind, EconomicSituation, Partner, PartnerDocument, PartnerId};
pub use filter::DirectoryFilter;
pub use import::{PadronCsvImporter, PadronImportError};
pub use reconcile::reconcile;
pub use router::directory_router;
pub use service::DirectoryService;
pub use store::{IncomeRef, PartnerStore, RetrievalError};
pub use views::{PartnerDocumentView, PaymentInfo, PaymentStatus};
