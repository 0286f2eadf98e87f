use contracts::dashboards::d400_sales_indicators::ColorTokens;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fallback label for empty grouping keys.
pub const SIN_REGISTRO: &str = "Sin registro";

/// Chart colour of well-known comprobante types (lower-cased key).
static COMPROBANTE_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("boleta", "#3b82f6"),
        ("factura", "#10b981"),
        ("nota de venta", "#f59e0b"),
        ("nota de credito", "#ef4444"),
        ("nota de crédito", "#ef4444"),
        ("nota de debito", "#8b5cf6"),
        ("nota de débito", "#8b5cf6"),
    ])
});

/// Colours for types outside the table above, cycled by position.
const FALLBACK_COLORS: [&str; 5] = ["#6366f1", "#ec4899", "#14b8a6", "#f97316", "#64748b"];

/// (background, text, accent) per establishment rank, cycled.
const ESTABLISHMENT_TOKENS: [(&str, &str, &str); 6] = [
    ("bg-blue-50", "text-blue-700", "bg-blue-500"),
    ("bg-emerald-50", "text-emerald-700", "bg-emerald-500"),
    ("bg-amber-50", "text-amber-700", "bg-amber-500"),
    ("bg-violet-50", "text-violet-700", "bg-violet-500"),
    ("bg-rose-50", "text-rose-700", "bg-rose-500"),
    ("bg-slate-50", "text-slate-700", "bg-slate-500"),
];

pub fn comprobante_color(key: &str, position: usize) -> String {
    COMPROBANTE_COLORS
        .get(key)
        .copied()
        .unwrap_or(FALLBACK_COLORS[position % FALLBACK_COLORS.len()])
        .to_string()
}

pub fn establishment_color_tokens(position: usize) -> ColorTokens {
    let (background, text, accent) = ESTABLISHMENT_TOKENS[position % ESTABLISHMENT_TOKENS.len()];
    ColorTokens {
        background: background.to_string(),
        text: text.to_string(),
        accent: accent.to_string(),
    }
}

/// Trimmed key, or [`SIN_REGISTRO`] when empty.
pub fn key_or_sin_registro(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        SIN_REGISTRO.to_string()
    } else {
        trimmed.to_string()
    }
}
