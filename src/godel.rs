//! Gödel numbering of MIU strings, as the lesson presents it: a toy
//! digit concatenation plus the theoretical prime-power form. Once a
//! string is a number, arithmetic can talk about the string's structure.

const PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Digit assigned to each symbol (M -> 3, I -> 1, U -> 0).
fn digit(c: char) -> Option<u8> {
    match c {
        'M' => Some(3),
        'I' => Some(1),
        'U' => Some(0),
        _ => None,
    }
}

/// Concatenated-digit form, with `?` standing in for unknown symbols.
pub fn godel_number(s: &str) -> String {
    s.chars()
        .map(|c| match digit(c) {
            Some(d) => char::from(b'0' + d),
            None => '?',
        })
        .collect()
}

/// Prime-power display form, e.g. `2^3 × 3^1 × 5^0` for "MIU". Unknown
/// symbols count as exponent 0; positions past the listed primes fall
/// back to `p{n}`.
pub fn prime_form(s: &str) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            let power = digit(c).unwrap_or(0);
            match PRIMES.get(i) {
                Some(p) => format!("{p}^{power}"),
                None => format!("p{}^{power}", i + 1),
            }
        })
        .collect::<Vec<_>>()
        .join(" × ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miu_maps_to_310() {
        assert_eq!(godel_number("MIU"), "310");
        assert_eq!(godel_number("MIIII"), "31111");
    }

    #[test]
    fn unknown_symbols_become_question_marks() {
        assert_eq!(godel_number("MXI"), "3?1");
    }

    #[test]
    fn prime_form_uses_position_primes() {
        assert_eq!(prime_form("MIU"), "2^3 × 3^1 × 5^0");
    }

    #[test]
    fn prime_form_falls_back_past_the_table() {
        let s = "MIIIIIIIIIII"; // 12 symbols, two past the listed primes
        let form = prime_form(s);
        assert!(form.contains("29^1"));
        assert!(form.ends_with("p11^1 × p12^1"));
    }
}
