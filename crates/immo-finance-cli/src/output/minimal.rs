use serde_json::Value;

/// Headline fields, most interesting first. The first one present and
/// non-null wins.
const HEADLINE_KEYS: [&str; 6] = [
    "monthly_payment",
    "monthly_cashflow",
    "after_tax_monthly_cashflow",
    "after_tax_roi",
    "total_interest",
    "total_cost",
];

/// Print a single headline figure from the output, for shell pipelines.
pub fn print_minimal(value: &Value) {
    // Unwrap the "result" envelope when present
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        for key in &HEADLINE_KEYS {
            if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
                println!("{}", render_scalar(val));
                return;
            }
        }

        // No headline field, fall back to the first entry
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, render_scalar(val));
            return;
        }
    }

    println!("{}", render_scalar(result));
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
