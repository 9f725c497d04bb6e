/// Render a value the way the upstream CSV exports do: whole numbers keep a
/// trailing `.0` (`80.0`, `0.0`), everything else uses the shortest
/// round-trip form.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers_keep_decimal() {
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(1.0), "1.0");
        assert_eq!(format_value(80.0), "80.0");
        assert_eq!(format_value(-1.0), "-1.0");
    }

    #[test]
    fn test_fractions_use_shortest_form() {
        assert_eq!(format_value(0.25), "0.25");
        assert_eq!(format_value(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_value(-3.5), "-3.5");
    }
}
