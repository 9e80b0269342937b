//! Calculator core: an expression buffer fed by button tokens

use crate::expr;

/// Shown in place of a result when evaluation fails.
pub const ERROR_MARKER: &str = "Error";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    expression: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_text(&self) -> &str {
        &self.expression
    }

    pub fn clear(&mut self) {
        self.expression.clear();
    }

    /// Append a digit, operator, decimal point or parenthesis. No syntax
    /// checking happens until `evaluate`. A pending error marker is replaced.
    pub fn append_token(&mut self, token: &str) {
        if self.expression == ERROR_MARKER {
            self.expression.clear();
        }
        self.expression.push_str(token);
    }

    /// Replace the buffer with the result, or with the error marker.
    pub fn evaluate(&mut self) {
        self.expression = match expr::evaluate(&self.expression) {
            Ok(value) => format_number(value),
            Err(e) => {
                tracing::debug!("evaluation of {:?} failed: {}", self.expression, e);
                ERROR_MARKER.to_string()
            }
        };
    }

    /// Handle a button label from the grid.
    pub fn press(&mut self, label: &str) {
        match label {
            "C" | "CE" => self.clear(),
            "=" => self.evaluate(),
            other => self.append_token(other),
        }
    }

    /// Append pasted text if it is a plain decimal number. Returns whether
    /// anything was appended.
    pub fn paste(&mut self, text: &str) -> bool {
        let text = text.trim();
        if is_plain_number(text) {
            self.append_token(text);
            true
        } else {
            false
        }
    }
}

/// Optional sign, digits, at most one decimal point, at least one digit.
fn is_plain_number(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut digits = 0;
    let mut dots = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Result text that `expr` can read back. Never uses an exponent.
fn format_number(n: f64) -> String {
    if n.is_nan() || n.is_infinite() {
        return ERROR_MARKER.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let exact = format!("{}", n);
    if n.fract() == 0.0 {
        return exact;
    }

    // Hide float noise like 0.1+0.2 when ten decimals are close enough
    let short = format!("{:.10}", n);
    let short = short.trim_end_matches('0').trim_end_matches('.');
    match short.parse::<f64>() {
        Ok(v) if ((v - n) / n).abs() < 1e-9 => short.to_string(),
        _ => exact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &[&str]) -> Calculator {
        let mut calc = Calculator::new();
        for key in keys {
            calc.press(key);
        }
        calc
    }

    #[test]
    fn test_evaluate_precedence() {
        let calc = typed(&["2", "+", "3", "*", "4", "="]);
        assert_eq!(calc.display_text(), "14");
    }

    #[test]
    fn test_divide_by_zero_shows_error() {
        let calc = typed(&["5", "/", "0", "="]);
        assert_eq!(calc.display_text(), ERROR_MARKER);
    }

    #[test]
    fn test_clear_then_digit() {
        let mut calc = typed(&["1", "2", "+"]);
        calc.clear();
        calc.append_token("7");
        assert_eq!(calc.display_text(), "7");

        let calc = typed(&["9", "CE"]);
        assert_eq!(calc.display_text(), "");
    }

    #[test]
    fn test_error_is_replaced_by_next_entry() {
        let calc = typed(&["(", "=", "4"]);
        assert_eq!(calc.display_text(), "4");
    }

    #[test]
    fn test_result_feeds_next_expression() {
        let calc = typed(&["7", "/", "2", "=", "*", "2", "="]);
        assert_eq!(calc.display_text(), "7");
        let calc = typed(&["1", "/", "4", "="]);
        assert_eq!(calc.display_text(), "0.25");
    }

    #[test]
    fn test_large_and_tiny_results_feed_next_expression() {
        let calc = typed(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "*", "1", "0", "0", "0", "0", "0", "="]);
        assert_eq!(calc.display_text(), "12345678900000");
        let mut calc = calc;
        for key in ["+", "1", "="] {
            calc.press(key);
        }
        assert_eq!(calc.display_text(), "12345678900001");

        let mut calc = typed(&["1", "/", "3", "0", "0", "0", "0", "0", "0", "="]);
        assert_ne!(calc.display_text(), ERROR_MARKER);
        assert_eq!(expr::evaluate(calc.display_text()), Ok(1.0 / 3_000_000.0));
        for key in ["*", "3", "="] {
            calc.press(key);
        }
        assert_ne!(calc.display_text(), ERROR_MARKER);
        let value = expr::evaluate(calc.display_text()).unwrap();
        assert!((value - 1e-6).abs() < 1e-15);
    }

    #[test]
    fn test_paste() {
        let mut calc = typed(&["2", "+"]);
        assert!(calc.paste(" 3.14\n"));
        assert_eq!(calc.display_text(), "2+3.14");
        assert!(!calc.paste("abc"));
        assert!(!calc.paste("1e5"));
        assert!(!calc.paste("inf"));
        assert!(!calc.paste("1.2.3"));
        assert!(!calc.paste("-"));
        assert_eq!(calc.display_text(), "2+3.14");
        assert!(calc.paste("-8"));
        assert_eq!(calc.display_text(), "2+3.14-8");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(1e13), "10000000000000");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), ERROR_MARKER);
    }
}
