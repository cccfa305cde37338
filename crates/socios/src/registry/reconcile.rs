use std::collections::{HashMap, HashSet};

use super::domain::{DocumentKind, Partner, PartnerDocument, PartnerId};
use super::views::PartnerDocumentView;

/// Join documents to partners and compute the missing required kinds.
///
/// Partners come out in input order. Each partner keeps its documents in the
/// order they arrived, duplicates included. `missing_documents` is the set
/// difference `required \ present`, in `required`'s order. Documents whose
/// `socio_id` matches no partner are dropped.
pub fn reconcile(
    partners: Vec<Partner>,
    documents: Vec<PartnerDocument>,
    required: &[DocumentKind],
) -> Vec<PartnerDocumentView> {
    let mut by_partner: HashMap<PartnerId, Vec<PartnerDocument>> = HashMap::new();
    for document in documents {
        by_partner
            .entry(document.socio_id)
            .or_default()
            .push(document);
    }

    partners
        .into_iter()
        .map(|partner| {
            let documents = by_partner.remove(&partner.id).unwrap_or_default();
            let present: HashSet<DocumentKind> =
                documents.iter().map(|doc| doc.tipo_documento).collect();
            let missing = required
                .iter()
                .copied()
                .filter(|kind| !present.contains(kind))
                .collect();
            PartnerDocumentView::new(partner, documents, missing)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::registry::domain::EconomicSituation;

    fn partner(id: i64, dni: &str, apellido_paterno: &str) -> Partner {
        Partner {
            id: PartnerId(id),
            dni: dni.to_string(),
            nombres: "Juana".to_string(),
            apellido_paterno: apellido_paterno.to_string(),
            apellido_materno: "Quispe".to_string(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(1975, 3, 2).expect("valid date"),
            celular: None,
            situacion_economica: EconomicSituation::ExtremoPobre,
            direccion_dni: String::new(),
            region_dni: String::new(),
            provincia_dni: String::new(),
            distrito_dni: String::new(),
            localidad: "Las Lomas".to_string(),
            direccion_vivienda: None,
        }
    }

    fn document(id: i64, socio: i64, kind: DocumentKind) -> PartnerDocument {
        PartnerDocument {
            id,
            socio_id: PartnerId(socio),
            tipo_documento: kind,
            link_documento: Some(format!("https://files.example/doc/{id}")),
            subido_manual: false,
            impreso: false,
            confirmado: false,
        }
    }

    #[test]
    fn partner_without_documents_misses_everything() {
        let views = reconcile(vec![partner(1, "11111111", "Alva")], vec![], &DocumentKind::REQUIRED);
        assert_eq!(views.len(), 1);
        assert!(views[0].documents.is_empty());
        assert_eq!(views[0].missing_documents, DocumentKind::REQUIRED.to_vec());
    }

    #[test]
    fn missing_follows_canonical_order_regardless_of_input_order() {
        let documents = vec![
            document(10, 1, DocumentKind::PlanosDeUbicacion),
            document(11, 1, DocumentKind::Contrato),
        ];
        let views = reconcile(
            vec![partner(1, "11111111", "Alva")],
            documents,
            &DocumentKind::REQUIRED,
        );
        assert_eq!(
            views[0].missing_documents,
            vec![DocumentKind::Ficha, DocumentKind::MemoriaDescriptiva]
        );
        assert_eq!(
            views[0].missing_document_labels,
            vec!["Ficha", "Memoria descriptiva"]
        );
    }

    #[test]
    fn complete_partner_has_no_missing_documents() {
        let documents = DocumentKind::REQUIRED
            .iter()
            .enumerate()
            .map(|(idx, kind)| document(idx as i64, 1, *kind))
            .collect();
        let views = reconcile(
            vec![partner(1, "11111111", "Alva")],
            documents,
            &DocumentKind::REQUIRED,
        );
        assert!(views[0].is_complete());
    }

    #[test]
    fn extra_kinds_are_listed_but_never_satisfy_requirements() {
        let documents = vec![
            document(1, 1, DocumentKind::Dni),
            document(2, 1, DocumentKind::Otros),
        ];
        let views = reconcile(
            vec![partner(1, "11111111", "Alva")],
            documents,
            &DocumentKind::REQUIRED,
        );
        assert_eq!(views[0].documents.len(), 2);
        assert_eq!(views[0].missing_documents, DocumentKind::REQUIRED.to_vec());
    }

    #[test]
    fn duplicate_kinds_are_retained_in_arrival_order() {
        let documents = vec![
            document(5, 1, DocumentKind::Contrato),
            document(3, 1, DocumentKind::Contrato),
        ];
        let views = reconcile(
            vec![partner(1, "11111111", "Alva")],
            documents,
            &DocumentKind::REQUIRED,
        );
        let ids: Vec<i64> = views[0].documents.iter().map(|doc| doc.id).collect();
        assert_eq!(ids, vec![5, 3]);
        assert!(!views[0]
            .missing_documents
            .contains(&DocumentKind::Contrato));
    }

    #[test]
    fn orphaned_documents_are_dropped() {
        let documents = vec![document(1, 99, DocumentKind::Ficha)];
        let views = reconcile(
            vec![partner(1, "11111111", "Alva")],
            documents,
            &DocumentKind::REQUIRED,
        );
        assert!(views[0].documents.is_empty());
        assert_eq!(views[0].missing_documents, DocumentKind::REQUIRED.to_vec());
    }

    #[test]
    fn partner_order_is_preserved() {
        let partners = vec![
            partner(2, "22222222", "Zapata"),
            partner(1, "11111111", "Alva"),
        ];
        let views = reconcile(partners, vec![], &DocumentKind::REQUIRED);
        assert_eq!(views[0].partner.apellido_paterno, "Zapata");
        assert_eq!(views[1].partner.apellido_paterno, "Alva");
    }

    #[test]
    fn reconcile_is_idempotent_over_identical_inputs() {
        let partners = vec![partner(1, "11111111", "Alva"), partner(2, "22222222", "Bazán")];
        let documents = vec![
            document(1, 1, DocumentKind::Ficha),
            document(2, 2, DocumentKind::Contrato),
            document(3, 2, DocumentKind::Dni),
        ];

        let first = reconcile(partners.clone(), documents.clone(), &DocumentKind::REQUIRED);
        let second = reconcile(partners, documents, &DocumentKind::REQUIRED);
        assert_eq!(first, second);
    }
}
