use contracts::domain::a001_sale_record::SaleRecord;

/// Monetary field of a sale record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyField {
    Total,
    Subtotal,
    Tax,
}

/// Converts record amounts into the base currency using the rate attached
/// to each record. Every cross-record sum goes through here.
#[derive(Debug, Clone)]
pub struct CurrencyNormalizer {
    base_currency: String,
}

impl CurrencyNormalizer {
    pub fn new(base_currency: &str) -> Self {
        Self {
            base_currency: base_currency.trim().to_ascii_uppercase(),
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn is_base(&self, currency: &str) -> bool {
        let currency = currency.trim();
        currency.is_empty() || currency.eq_ignore_ascii_case(&self.base_currency)
    }

    /// Multiplier from the record's currency to the base currency.
    ///
    /// A foreign record without a usable rate (missing, zero, negative or
    /// non-finite) is taken at rate 1.
    pub fn rate_for(&self, record: &SaleRecord) -> f64 {
        if self.is_base(&record.currency) {
            return 1.0;
        }
        match record.exchange_rate {
            Some(rate) if rate.is_finite() && rate > 0.0 => rate,
            _ => {
                tracing::debug!(
                    "Indicators: record {} in {} has no usable exchange rate, using 1",
                    record.id,
                    record.currency
                );
                1.0
            }
        }
    }

    pub fn normalize(&self, record: &SaleRecord, field: MoneyField) -> f64 {
        let amount = match field {
            MoneyField::Total => record.total,
            MoneyField::Subtotal => record.subtotal,
            MoneyField::Tax => record.tax,
        };
        self.normalize_amount(record, amount)
    }

    /// Normalize an amount denominated in `record`'s currency, such as one
    /// of its line items.
    pub fn normalize_amount(&self, record: &SaleRecord, amount: f64) -> f64 {
        amount * self.rate_for(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(currency: &str, rate: Option<f64>) -> SaleRecord {
        let mut r = SaleRecord::emitted("r1", "2024-03-01", "factura", 100.0);
        r.tax = 18.0;
        r.currency = currency.to_string();
        r.exchange_rate = rate;
        r
    }

    #[test]
    fn test_base_currency_ignores_rate() {
        let n = CurrencyNormalizer::new("PEN");
        assert_eq!(n.normalize(&record("PEN", Some(3.7)), MoneyField::Total), 100.0);
        assert_eq!(n.normalize(&record("pen", None), MoneyField::Total), 100.0);
        assert_eq!(n.normalize(&record("", Some(3.7)), MoneyField::Total), 100.0);
    }

    #[test]
    fn test_foreign_currency_uses_rate() {
        let n = CurrencyNormalizer::new("PEN");
        let r = record("USD", Some(3.75));
        assert_eq!(n.normalize(&r, MoneyField::Total), 375.0);
        assert_eq!(n.normalize(&r, MoneyField::Tax), 67.5);
        assert_eq!(n.normalize_amount(&r, 10.0), 37.5);
    }

    #[test]
    fn test_missing_or_invalid_rate_defaults_to_one() {
        let n = CurrencyNormalizer::new("PEN");
        assert_eq!(n.normalize(&record("USD", None), MoneyField::Total), 100.0);
        assert_eq!(n.normalize(&record("USD", Some(0.0)), MoneyField::Total), 100.0);
        assert_eq!(n.normalize(&record("USD", Some(f64::NAN)), MoneyField::Total), 100.0);
    }
}
