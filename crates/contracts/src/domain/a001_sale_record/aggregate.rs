use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Status
// ============================================================================

/// Lifecycle status of a sale document. Only `Emitted` takes part in indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SaleStatus {
    Emitted,
    Voided,
    #[default]
    Draft,
}

impl From<String> for SaleStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "emitted" => SaleStatus::Emitted,
            "voided" => SaleStatus::Voided,
            _ => SaleStatus::Draft,
        }
    }
}

// ============================================================================
// Line item
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    /// Amount in the parent record's currency.
    #[serde(default)]
    pub subtotal: f64,
}

impl LineItem {
    pub fn new(name: &str, subtotal: f64) -> Self {
        Self {
            name: name.to_string(),
            subtotal,
        }
    }
}

// ============================================================================
// Sale record
// ============================================================================

/// One entry of the sales ledger, as held by the snapshot store.
///
/// Monetary fields are denominated in `currency`. They must be normalized to
/// the base currency before being combined with other records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(default = "new_record_id")]
    pub id: String,
    /// Raw emission timestamp (RFC 3339, naive ISO datetime or plain date).
    pub emitted_at: String,
    #[serde(default)]
    pub status: SaleStatus,

    #[serde(default)]
    pub establishment_id: String,
    #[serde(default)]
    pub establishment_name: String,

    /// Free-form document type: boleta, factura, nota de venta...
    #[serde(default)]
    pub comprobante_type: String,

    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub client_identifier: String,
    #[serde(default)]
    pub client_name: String,

    /// Empty means the base currency.
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub exchange_rate: Option<f64>,

    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,

    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// Generates an opaque identifier for records submitted without one.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

impl SaleRecord {
    /// Minimal emitted record in the base currency; the remaining fields are empty.
    pub fn emitted(id: &str, emitted_at: &str, comprobante_type: &str, total: f64) -> Self {
        Self {
            id: id.to_string(),
            emitted_at: emitted_at.to_string(),
            status: SaleStatus::Emitted,
            establishment_id: String::new(),
            establishment_name: String::new(),
            comprobante_type: comprobante_type.to_string(),
            seller_name: String::new(),
            client_identifier: String::new(),
            client_name: String::new(),
            currency: String::new(),
            exchange_rate: None,
            total,
            subtotal: total,
            tax: 0.0,
            line_items: Vec::new(),
        }
    }

    pub fn is_emitted(&self) -> bool {
        self.status == SaleStatus::Emitted
    }
}
