use arcdial::ValueFormatter;

/// UK-style currency text: pound sign, thousands grouped with commas.
pub struct CurrencyFormatter;

impl ValueFormatter for CurrencyFormatter {
    fn format_value(&self, value: i32) -> String {
        let sign = if value < 0 { "-" } else { "" };
        format!("{sign}£{}", group_thousands(value.unsigned_abs()))
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
