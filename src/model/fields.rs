//! The user-supplied field record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Every text value a certificate is built from.
///
/// `title` and `body` carry the document; the remaining fields are optional
/// and an empty value suppresses the line it would produce. Values are
/// opaque: no format validation is applied to emails, phones or dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFields {
    /// Document title, also written as PDF metadata
    #[serde(alias = "titulo")]
    pub title: String,

    /// Body text, paragraphs separated by line breaks
    #[serde(alias = "cuerpo")]
    pub body: String,

    /// City used in the closing sentence
    #[serde(default, alias = "ciudad")]
    pub city: String,

    /// Free-form date used in the closing sentence
    #[serde(default, alias = "fecha")]
    pub date: String,

    /// Signer name (bold, below the signature line)
    #[serde(default, alias = "nombre_firma")]
    pub signer_name: String,

    /// Signer role
    #[serde(default, alias = "cargo_firma")]
    pub signer_role: String,

    /// Issuing organization
    #[serde(default, alias = "org_firma")]
    pub organization: String,

    /// Contact email, rendered as an underlined link
    #[serde(default)]
    pub email: String,

    /// Contact phone
    #[serde(default, alias = "celular")]
    pub phone: String,

    /// Contact address
    #[serde(default, alias = "direccion")]
    pub address: String,
}

impl DocumentFields {
    /// Create a field record with the two required values.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Parse a field record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Set the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set signer name, role and organization.
    pub fn with_signer(
        mut self,
        name: impl Into<String>,
        role: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        self.signer_name = name.into();
        self.signer_role = role.into();
        self.organization = organization.into();
        self
    }

    /// Set the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the contact phone.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the contact address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Body paragraphs, trimmed, in order. Blank lines yield empty strings,
    /// and an empty body is a single empty paragraph.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body.trim().split('\n').map(str::trim)
    }

    /// The closing sentence, present only when both city and date are set.
    pub fn closing_sentence(&self) -> Option<String> {
        if self.city.is_empty() || self.date.is_empty() {
            return None;
        }
        Some(format!(
            "Se extiende la presente constancia a petición de la parte interesada \
             y para los fines que a la misma convengan, en {} a {}.",
            self.city, self.date
        ))
    }
}

const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Write a date the way certificates phrase it, e.g.
/// `"los 16 días del mes de Febrero del 2026"`.
pub fn long_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    match date.day() {
        1 => format!("el primer día del mes de {} del {}", month, date.year()),
        day => format!("los {} días del mes de {} del {}", day, month, date.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let fields = DocumentFields::new("Constancia", "Texto")
            .with_city("Chihuahua")
            .with_date("hoy")
            .with_signer("Ana Ruiz", "Directora", "Centro X")
            .with_email("a@b.com")
            .with_address("Calle 1");

        assert_eq!(fields.title, "Constancia");
        assert_eq!(fields.signer_role, "Directora");
        assert_eq!(fields.organization, "Centro X");
        assert!(fields.phone.is_empty());
    }

    #[test]
    fn test_paragraphs_keep_blank_lines() {
        let fields = DocumentFields::new("T", "  Línea uno.\n\nLínea dos.  \n");
        let paragraphs: Vec<_> = fields.paragraphs().collect();
        assert_eq!(paragraphs, vec!["Línea uno.", "", "Línea dos."]);
    }

    #[test]
    fn test_paragraphs_strip_carriage_returns() {
        let fields = DocumentFields::new("T", "uno\r\ndos");
        let paragraphs: Vec<_> = fields.paragraphs().collect();
        assert_eq!(paragraphs, vec!["uno", "dos"]);
    }

    #[test]
    fn test_empty_body_is_one_blank_paragraph() {
        let fields = DocumentFields::new("T", "   \n ");
        let paragraphs: Vec<_> = fields.paragraphs().collect();
        assert_eq!(paragraphs, vec![""]);
        assert_eq!(DocumentFields::new("T", "").paragraphs().count(), 1);
    }

    #[test]
    fn test_closing_sentence_requires_city_and_date() {
        let base = DocumentFields::new("T", "B");
        assert!(base.closing_sentence().is_none());
        assert!(base.clone().with_city("Chihuahua").closing_sentence().is_none());
        assert!(base.clone().with_date("hoy").closing_sentence().is_none());

        let sentence = base
            .with_city("Chihuahua")
            .with_date("1 de enero de 2025")
            .closing_sentence()
            .unwrap();
        assert!(sentence.starts_with("Se extiende la presente constancia a petición"));
        assert!(sentence.ends_with("en Chihuahua a 1 de enero de 2025."));
    }

    #[test]
    fn test_from_json_with_spanish_keys() {
        let json = r#"{
            "titulo": "Constancia estudiantil",
            "cuerpo": "Texto",
            "ciudad": "Chihuahua",
            "celular": "614 1106956"
        }"#;
        let fields = DocumentFields::from_json(json).unwrap();
        assert_eq!(fields.title, "Constancia estudiantil");
        assert_eq!(fields.city, "Chihuahua");
        assert_eq!(fields.phone, "614 1106956");
        assert!(fields.email.is_empty());
    }

    #[test]
    fn test_from_json_requires_title() {
        let result = DocumentFields::from_json(r#"{ "body": "x" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        assert_eq!(long_date(date), "los 19 días del mes de Octubre del 2025");

        let first = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(long_date(first), "el primer día del mes de Febrero del 2026");
    }
}
