use serde::Serialize;

use super::domain::{DocumentKind, Partner, PartnerDocument};

/// Whether an income record with the partner's DNI exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pagado,
    NoPagado,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pagado => "Pagado",
            Self::NoPagado => "No Pagado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentInfo {
    pub status: PaymentStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
}

impl PaymentInfo {
    pub fn unpaid() -> Self {
        Self {
            status: PaymentStatus::NoPagado,
            status_label: PaymentStatus::NoPagado.label(),
            receipt_number: None,
        }
    }

    pub fn paid(receipt_number: Option<String>) -> Self {
        Self {
            status: PaymentStatus::Pagado,
            status_label: PaymentStatus::Pagado.label(),
            receipt_number,
        }
    }
}

/// Derived row rendered by the directory: a partner, every document attached
/// to it, and the required kinds it still lacks. Recomputed on each fetch,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerDocumentView {
    #[serde(flatten)]
    pub partner: Partner,
    pub nombre_completo: String,
    pub documents: Vec<PartnerDocument>,
    pub missing_documents: Vec<DocumentKind>,
    pub missing_document_labels: Vec<&'static str>,
    pub payment: PaymentInfo,
}

impl PartnerDocumentView {
    pub(crate) fn new(
        partner: Partner,
        documents: Vec<PartnerDocument>,
        missing_documents: Vec<DocumentKind>,
    ) -> Self {
        let nombre_completo = partner.full_name();
        let missing_document_labels = missing_documents
            .iter()
            .map(|kind| kind.label())
            .collect();

        Self {
            partner,
            nombre_completo,
            documents,
            missing_documents,
            missing_document_labels,
            payment: PaymentInfo::unpaid(),
        }
    }

    /// True when every required document kind is present.
    pub fn is_complete(&self) -> bool {
        self.missing_documents.is_empty()
    }
}
