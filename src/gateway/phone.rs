/// Normalizes a payer phone number into the `2547XXXXXXXX` shape Daraja
/// expects.
///
/// Non-digit characters are stripped first; the length checks below run on
/// the cleaned string. Inputs that match none of the known local formats
/// are returned as the cleaned digit string so the gateway performs the
/// final validation.
pub fn normalize(input: &str) -> String {
    let cleaned: String = input.chars().filter(char::is_ascii_digit).collect();

    if cleaned.starts_with('0') && cleaned.len() == 10 {
        format!("254{}", &cleaned[1..])
    } else if cleaned.starts_with('7') && cleaned.len() == 9 {
        format!("254{cleaned}")
    } else if cleaned.starts_with("254") && cleaned.len() == 12 {
        cleaned
    } else if input.starts_with("+254") && cleaned.len() == 13 {
        cleaned[1..].to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn local_format_with_leading_zero() {
        assert_eq!(normalize("0712345678"), "254712345678");
    }

    #[test]
    fn bare_subscriber_number() {
        assert_eq!(normalize("712345678"), "254712345678");
    }

    #[test]
    fn already_canonical() {
        assert_eq!(normalize("254712345678"), "254712345678");
    }

    #[test]
    fn international_prefix() {
        assert_eq!(normalize("+254712345678"), "254712345678");
    }

    #[test]
    fn separators_are_stripped() {
        assert_eq!(normalize("0712-345 678"), "254712345678");
        assert_eq!(normalize("+254 712 345 678"), "254712345678");
    }

    #[test]
    fn no_digits_survive() {
        assert_eq!(normalize("abc"), "");
    }

    #[test]
    fn unknown_shapes_pass_through_cleaned() {
        assert_eq!(normalize("12345"), "12345");
        assert_eq!(normalize("07123"), "07123");
    }

    #[test]
    fn idempotent_on_canonical_output() {
        for input in ["0712345678", "712345678", "254712345678", "+254712345678"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }
}
