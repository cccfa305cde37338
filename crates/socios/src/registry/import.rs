use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::{EconomicSituation, Partner, PartnerId};

/// Reads a padron spreadsheet export into [`Partner`] records.
///
/// Registrations arrive as CSV exports with Spanish column headers. Rows keep
/// their file order; identifiers are assigned sequentially since the export
/// carries none.
pub struct PadronCsvImporter;

impl PadronCsvImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Partner>, PadronImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Partner>, PadronImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut partners = Vec::new();
        for (index, record) in csv_reader.deserialize::<PadronRow>().enumerate() {
            // Header is line 1; data starts on line 2.
            let row_number = index + 2;
            let row = record?;
            partners.push(row.into_partner(index as i64 + 1, row_number)?);
        }

        Ok(partners)
    }
}

#[derive(Debug, Deserialize)]
struct PadronRow {
    #[serde(rename = "DNI")]
    dni: String,
    #[serde(rename = "Nombres")]
    nombres: String,
    #[serde(rename = "Apellido Paterno")]
    apellido_paterno: String,
    #[serde(rename = "Apellido Materno", default)]
    apellido_materno: String,
    #[serde(rename = "Fecha Nacimiento")]
    fecha_nacimiento: String,
    #[serde(rename = "Situacion Economica", default, deserialize_with = "empty_as_none")]
    situacion_economica: Option<String>,
    #[serde(rename = "Localidad", default)]
    localidad: String,
    #[serde(rename = "Celular", default, deserialize_with = "empty_as_none")]
    celular: Option<String>,
}

impl PadronRow {
    fn into_partner(self, id: i64, row: usize) -> Result<Partner, PadronImportError> {
        if self.dni.is_empty() {
            return Err(PadronImportError::MissingDni { row });
        }

        let fecha_nacimiento = NaiveDate::parse_from_str(&self.fecha_nacimiento, "%Y-%m-%d")
            .map_err(|_| PadronImportError::InvalidBirthDate {
                row,
                value: self.fecha_nacimiento.clone(),
            })?;

        let situacion_economica = match self.situacion_economica {
            Some(raw) => EconomicSituation::parse(&raw)
                .ok_or(PadronImportError::UnknownSituation { row, value: raw })?,
            None => EconomicSituation::Pobre,
        };

        Ok(Partner {
            id: PartnerId(id),
            dni: self.dni,
            nombres: self.nombres,
            apellido_paterno: self.apellido_paterno,
            apellido_materno: self.apellido_materno,
            fecha_nacimiento,
            celular: self.celular,
            situacion_economica,
            direccion_dni: String::new(),
            region_dni: String::new(),
            provincia_dni: String::new(),
            distrito_dni: String::new(),
            localidad: self.localidad,
            direccion_vivienda: None,
        })
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum PadronImportError {
    #[error("failed to open padron csv: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read padron csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing DNI")]
    MissingDni { row: usize },
    #[error("row {row}: invalid birth date '{value}' (expected YYYY-MM-DD)")]
    InvalidBirthDate { row: usize, value: String },
    #[error("row {row}: unknown economic situation '{value}'")]
    UnknownSituation { row: usize, value: String },
}
