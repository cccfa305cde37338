use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use super::domain::DocumentKind;
use super::filter::DirectoryFilter;
use super::reconcile::reconcile;
use super::store::{IncomeRef, PartnerStore, RetrievalError};
use super::views::{PartnerDocumentView, PaymentInfo};

/// Fetch-reconcile-filter pipeline over a [`PartnerStore`].
///
/// Every call re-reads the store; nothing is cached, so a later call simply
/// supersedes an earlier one's results.
pub struct DirectoryService<S> {
    store: Arc<S>,
}

impl<S> Clone for DirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S> DirectoryService<S>
where
    S: PartnerStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Build the filtered directory. The three reads run concurrently and all
    /// must succeed before reconciliation starts.
    pub async fn directory(
        &self,
        filter: &DirectoryFilter,
    ) -> Result<Vec<PartnerDocumentView>, RetrievalError> {
        let (partners, documents, incomes) = tokio::try_join!(
            self.store.fetch_partners(),
            self.store.fetch_documents(),
            self.store.fetch_income_refs(),
        )?;

        debug!(
            partners = partners.len(),
            documents = documents.len(),
            incomes = incomes.len(),
            "directory fetch complete"
        );

        let mut views = reconcile(partners, documents, &DocumentKind::REQUIRED);
        attach_payments(&mut views, incomes);
        Ok(filter.apply(views))
    }

    /// Distinct non-empty localities, sorted ascending. Source for the
    /// locality filter dropdown.
    pub async fn localities(&self) -> Result<Vec<String>, RetrievalError> {
        let partners = self.store.fetch_partners().await?;
        let unique: BTreeSet<String> = partners
            .into_iter()
            .map(|partner| partner.localidad)
            .filter(|localidad| !localidad.trim().is_empty())
            .collect();
        Ok(unique.into_iter().collect())
    }
}

/// Mark views paid when an income record carries the partner's DNI. Later
/// income rows for the same DNI win, matching the store's iteration order.
fn attach_payments(views: &mut [PartnerDocumentView], incomes: Vec<IncomeRef>) {
    let mut by_dni: HashMap<String, Option<String>> = HashMap::new();
    for income in incomes {
        if income.dni.trim().is_empty() {
            continue;
        }
        by_dni.insert(income.dni, income.receipt_number);
    }

    for view in views.iter_mut() {
        if let Some(receipt_number) = by_dni.get(&view.partner.dni) {
            view.payment = PaymentInfo::paid(receipt_number.clone());
        }
    }
}
