use super::views::PartnerDocumentView;

/// Free-text and locality filtering over directory views.
///
/// A view passes when the selected localidad (if any) matches exactly, and
/// the query either is empty, appears as a case-insensitive substring of one
/// of {dni, nombres, apellido paterno, apellido materno, localidad}, or every
/// whitespace-separated term appears somewhere in the joined full name.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    pub query: String,
    pub localidad: Option<String>,
}

impl DirectoryFilter {
    pub fn new(query: impl Into<String>, localidad: Option<String>) -> Self {
        Self {
            query: query.into(),
            localidad,
        }
    }

    pub fn matches(&self, view: &PartnerDocumentView) -> bool {
        let partner = &view.partner;

        if let Some(localidad) = &self.localidad {
            if partner.localidad != *localidad {
                return false;
            }
        }

        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let fields = [
            &partner.dni,
            &partner.nombres,
            &partner.apellido_paterno,
            &partner.apellido_materno,
            &partner.localidad,
        ];
        if fields
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
        {
            return true;
        }

        // Multi-term name search: "juana quispe" should match across name
        // columns even though no single column contains the whole query.
        let full_name = partner.full_name().to_lowercase();
        query
            .split_whitespace()
            .all(|term| full_name.contains(term))
    }

    pub fn apply(&self, views: Vec<PartnerDocumentView>) -> Vec<PartnerDocumentView> {
        views.into_iter().filter(|view| self.matches(view)).collect()
    }
}
