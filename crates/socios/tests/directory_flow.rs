use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use tower::util::ServiceExt;

use socios::registry::{
    directory_router, DirectoryFilter, DirectoryService, DocumentKind, EconomicSituation,
    IncomeRef, Partner, PartnerDocument, PartnerId, PartnerStore, PaymentStatus, RetrievalError,
};

#[derive(Default, Clone)]
struct FixtureStore {
    partners: Vec<Partner>,
    documents: Vec<PartnerDocument>,
    incomes: Vec<IncomeRef>,
    fail_documents: bool,
}

impl PartnerStore for FixtureStore {
    async fn fetch_partners(&self) -> Result<Vec<Partner>, RetrievalError> {
        Ok(self.partners.clone())
    }

    async fn fetch_documents(&self) -> Result<Vec<PartnerDocument>, RetrievalError> {
        if self.fail_documents {
            return Err(RetrievalError::Transport(
                "socio_documentos unreachable".to_string(),
            ));
        }
        Ok(self.documents.clone())
    }

    async fn fetch_income_refs(&self) -> Result<Vec<IncomeRef>, RetrievalError> {
        Ok(self.incomes.clone())
    }
}

fn partner(id: i64, dni: &str, nombres: &str, paterno: &str, localidad: &str) -> Partner {
    Partner {
        id: PartnerId(id),
        dni: dni.to_string(),
        nombres: nombres.to_string(),
        apellido_paterno: paterno.to_string(),
        apellido_materno: "Quispe".to_string(),
        fecha_nacimiento: NaiveDate::from_ymd_opt(1982, 4, 18).expect("valid date"),
        celular: None,
        situacion_economica: EconomicSituation::Pobre,
        direccion_dni: String::new(),
        region_dni: String::new(),
        provincia_dni: String::new(),
        distrito_dni: String::new(),
        localidad: localidad.to_string(),
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
        confirmado: true,
    }
}

fn fixture() -> FixtureStore {
    FixtureStore {
        partners: vec![
            partner(1, "40000001", "Ana", "García", "San Juan"),
            partner(2, "40000002", "Rosa", "Torres", "Las Lomas"),
            partner(3, "40000003", "Elena", "Zapata", "San Juan"),
        ],
        documents: vec![
            document(10, 1, DocumentKind::Contrato),
            document(11, 1, DocumentKind::PlanosDeUbicacion),
            document(12, 2, DocumentKind::Ficha),
            document(13, 2, DocumentKind::Contrato),
            document(14, 2, DocumentKind::PlanosDeUbicacion),
            document(15, 2, DocumentKind::MemoriaDescriptiva),
            document(16, 2, DocumentKind::Dni),
            // Orphaned row: no partner 99 in the fixture.
            document(17, 99, DocumentKind::Ficha),
        ],
        incomes: vec![IncomeRef {
            dni: "40000001".to_string(),
            receipt_number: Some("R-1001".to_string()),
        }],
        fail_documents: false,
    }
}

#[tokio::test]
async fn directory_reconciles_documents_and_payments() {
    let service = DirectoryService::new(Arc::new(fixture()));
    let views = service
        .directory(&DirectoryFilter::default())
        .await
        .expect("directory builds");

    assert_eq!(views.len(), 3);

    // Partner 1 holds Contrato + Planos, so Ficha and Memoria are missing,
    // in canonical order.
    assert_eq!(
        views[0].missing_documents,
        vec![DocumentKind::Ficha, DocumentKind::MemoriaDescriptiva]
    );
    assert_eq!(views[0].payment.status, PaymentStatus::Pagado);
    assert_eq!(views[0].payment.receipt_number.as_deref(), Some("R-1001"));

    // Partner 2 holds every required kind plus an extra DNI document.
    assert!(views[1].is_complete());
    assert_eq!(views[1].documents.len(), 5);
    assert_eq!(views[1].payment.status, PaymentStatus::NoPagado);

    // Partner 3 has nothing: the full required list, in order.
    assert_eq!(views[2].missing_documents, DocumentKind::REQUIRED.to_vec());

    // The orphaned document attached to no fetched partner was dropped.
    let total_docs: usize = views.iter().map(|view| view.documents.len()).sum();
    assert_eq!(total_docs, 7);
}

#[tokio::test]
async fn directory_applies_query_and_localidad_filters() {
    let service = DirectoryService::new(Arc::new(fixture()));

    let by_name = service
        .directory(&DirectoryFilter::new("garcía", None))
        .await
        .expect("directory builds");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].partner.apellido_paterno, "García");

    let by_localidad = service
        .directory(&DirectoryFilter::new("", Some("San Juan".to_string())))
        .await
        .expect("directory builds");
    assert_eq!(by_localidad.len(), 2);
    assert!(by_localidad
        .iter()
        .all(|view| view.partner.localidad == "San Juan"));
}

#[tokio::test]
async fn directory_surfaces_retrieval_failures() {
    let mut store = fixture();
    store.fail_documents = true;
    let service = DirectoryService::new(Arc::new(store));

    let err = service
        .directory(&DirectoryFilter::default())
        .await
        .expect_err("document fetch fails");
    assert!(matches!(err, RetrievalError::Transport(_)));
}

#[tokio::test]
async fn localities_are_distinct_and_sorted() {
    let service = DirectoryService::new(Arc::new(fixture()));
    let localities = service.localities().await.expect("localities load");
    assert_eq!(localities, vec!["Las Lomas", "San Juan"]);
}

#[tokio::test]
async fn directory_endpoint_serves_filtered_views() {
    let service = Arc::new(DirectoryService::new(Arc::new(fixture())));
    let app = directory_router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/socios/directorio?q=torres&localidad=all")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let views: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    let rows = views.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["apellidoPaterno"], "Torres");
    assert_eq!(rows[0]["payment"]["status_label"], "No Pagado");
}

#[tokio::test]
async fn directory_endpoint_maps_retrieval_failure_to_bad_gateway() {
    let mut store = fixture();
    store.fail_documents = true;
    let service = Arc::new(DirectoryService::new(Arc::new(store)));
    let app = directory_router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/socios/directorio")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
