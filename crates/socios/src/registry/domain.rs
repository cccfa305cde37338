use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier for a `socio_titulares` row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartnerId(pub i64);

/// Document category tags as stored in `socio_documentos.tipo_documento`.
///
/// The store holds more tags than the directory requires; only the
/// [`DocumentKind::REQUIRED`] subset participates in the missing-document
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Ficha,
    Contrato,
    #[serde(rename = "Planos de ubicación")]
    PlanosDeUbicacion,
    #[serde(rename = "Memoria descriptiva")]
    MemoriaDescriptiva,
    #[serde(rename = "DNI")]
    Dni,
    #[serde(rename = "Acta de Constitución")]
    ActaDeConstitucion,
    #[serde(rename = "Vigencia de Poder")]
    VigenciaDePoder,
    Otros,
}

impl DocumentKind {
    /// Canonical ordered list of kinds every partner must supply.
    pub const REQUIRED: [Self; 4] = [
        Self::Ficha,
        Self::Contrato,
        Self::PlanosDeUbicacion,
        Self::MemoriaDescriptiva,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ficha => "Ficha",
            Self::Contrato => "Contrato",
            Self::PlanosDeUbicacion => "Planos de ubicación",
            Self::MemoriaDescriptiva => "Memoria descriptiva",
            Self::Dni => "DNI",
            Self::ActaDeConstitucion => "Acta de Constitución",
            Self::VigenciaDePoder => "Vigencia de Poder",
            Self::Otros => "Otros",
        }
    }
}

/// Economic situation category assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EconomicSituation {
    Pobre,
    #[serde(rename = "Extremo Pobre")]
    ExtremoPobre,
}

impl EconomicSituation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pobre => "Pobre",
            Self::ExtremoPobre => "Extremo Pobre",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pobre" => Some(Self::Pobre),
            "extremo pobre" | "extrema pobreza" => Some(Self::ExtremoPobre),
            _ => None,
        }
    }
}

/// A registered partner (`socio_titulares` row). Created by the external
/// registration flow; read-only from this library's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub dni: String,
    pub nombres: String,
    #[serde(rename = "apellidoPaterno")]
    pub apellido_paterno: String,
    #[serde(rename = "apellidoMaterno")]
    pub apellido_materno: String,
    #[serde(rename = "fechaNacimiento")]
    pub fecha_nacimiento: NaiveDate,
    #[serde(default)]
    pub celular: Option<String>,
    #[serde(rename = "situacionEconomica")]
    pub situacion_economica: EconomicSituation,
    #[serde(default, rename = "direccionDNI")]
    pub direccion_dni: String,
    #[serde(default, rename = "regionDNI")]
    pub region_dni: String,
    #[serde(default, rename = "provinciaDNI")]
    pub provincia_dni: String,
    #[serde(default, rename = "distritoDNI")]
    pub distrito_dni: String,
    #[serde(default)]
    pub localidad: String,
    #[serde(default, rename = "direccionVivienda")]
    pub direccion_vivienda: Option<String>,
}

impl Partner {
    /// Display name in `nombres apellido_paterno apellido_materno` order,
    /// skipping empty parts.
    pub fn full_name(&self) -> String {
        let mut name = String::new();
        for part in [&self.nombres, &self.apellido_paterno, &self.apellido_materno] {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(part);
        }
        name
    }
}

/// A document attached to a partner (`socio_documentos` row). Belongs to
/// exactly one partner via `socio_id`; the three flags are toggled
/// independently by reviewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerDocument {
    pub id: i64,
    pub socio_id: PartnerId,
    pub tipo_documento: DocumentKind,
    #[serde(default)]
    pub link_documento: Option<String>,
    #[serde(default)]
    pub subido_manual: bool,
    #[serde(default)]
    pub impreso: bool,
    #[serde(default)]
    pub confirmado: bool,
}
