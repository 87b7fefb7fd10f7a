//! Character-level masking for phone and national ID numbers.
//!
//! Both transforms search for the first (leftmost) candidate run, mask it,
//! and splice it back between the untouched surrounding text. Later runs in
//! the same value are left as they are.

use once_cell::sync::Lazy;
use regex::{Match, Regex};

/// Mask character.
pub const MASK_CHAR: char = '*';

#[allow(clippy::expect_used)]
static PHONE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{11}").expect("valid phone pattern"));

#[allow(clippy::expect_used)]
static ANY_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit pattern"));

// 18-character form first so it wins over the 15-digit prefix of the same run.
#[allow(clippy::expect_used)]
static ID_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{17}[0-9Xx]|\d{15}").expect("valid id pattern"));

#[allow(clippy::expect_used)]
static ANY_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9A-Za-z]").expect("valid alphanumeric pattern"));

/// Mask a phone number that may be embedded in annotation text.
///
/// The first run of 11 digits becomes `DDD****DDDD`. Without such a run,
/// every digit in the value is replaced instead.
///
/// ```
/// use library_lookup::sanitize::mask_phone;
///
/// assert_eq!(mask_phone("13812345678"), "138****5678");
/// assert_eq!(mask_phone("联系电话13812345678转8"), "联系电话138****5678转8");
/// assert_eq!(mask_phone("110"), "***");
/// ```
#[must_use]
pub fn mask_phone(value: &str) -> String {
    let Some(m) = PHONE_RUN.find(value) else {
        return ANY_DIGIT
            .replace_all(value, MASK_CHAR.to_string().as_str())
            .into_owned();
    };

    let digits: Vec<char> = m.as_str().chars().collect();
    let masked = keep_ends(&digits, 3, 4, 4);
    splice(value, &m, &masked)
}

/// Mask a national ID number that may be embedded in annotation text.
///
/// - 18-character form (17 digits + digit/`X`): keep 6, mask 8, keep 4
/// - 15-digit form: keep 6, mask 6, keep 3
/// - anything else: [`mask_run`]
///
/// Without a candidate run, every ASCII letter and digit is replaced.
///
/// ```
/// use library_lookup::sanitize::mask_id_number;
///
/// assert_eq!(mask_id_number("110101199003071234"), "110101********1234");
/// assert_eq!(mask_id_number("110101900307123"), "110101******123");
/// ```
#[must_use]
pub fn mask_id_number(value: &str) -> String {
    let Some(m) = ID_RUN.find(value) else {
        return ANY_ALNUM
            .replace_all(value, MASK_CHAR.to_string().as_str())
            .into_owned();
    };

    let core: Vec<char> = m.as_str().chars().collect();
    let masked = match core.len() {
        18 => keep_ends(&core, 6, 4, 8),
        15 => keep_ends(&core, 6, 3, 6),
        _ => mask_run(m.as_str()),
    };
    splice(value, &m, &masked)
}

/// Generic mask for a run of unexpected length.
///
/// Runs of at most 5 characters are fully masked; longer runs keep the
/// first 3 and last 2 characters.
///
/// ```
/// use library_lookup::sanitize::mask_run;
///
/// assert_eq!(mask_run("AB12345678"), "AB1*****78");
/// assert_eq!(mask_run("12345"), "*****");
/// ```
#[must_use]
pub fn mask_run(run: &str) -> String {
    let chars: Vec<char> = run.chars().collect();
    if chars.len() <= 5 {
        return MASK_CHAR.to_string().repeat(chars.len());
    }
    keep_ends(&chars, 3, 2, chars.len() - 5)
}

/// `head` chars, then `stars` mask chars, then the last `tail` chars.
fn keep_ends(chars: &[char], head: usize, tail: usize, stars: usize) -> String {
    let mut out = String::with_capacity(head + stars + tail);
    out.extend(&chars[..head]);
    out.extend(std::iter::repeat(MASK_CHAR).take(stars));
    out.extend(&chars[chars.len() - tail..]);
    out
}

fn splice(value: &str, m: &Match<'_>, masked: &str) -> String {
    format!("{}{masked}{}", &value[..m.start()], &value[m.end()..])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("13812345678", "138****5678" ; "bare number")]
    #[test_case("联系电话13812345678转8", "联系电话138****5678转8" ; "annotated")]
    #[test_case("13812345678 (work)", "138****5678 (work)" ; "suffix only")]
    #[test_case("abc", "abc" ; "no digits")]
    #[test_case("tel: 010-1234", "tel: ***-****" ; "short digits starred")]
    #[test_case("", "" ; "empty")]
    fn test_mask_phone(input: &str, expected: &str) {
        assert_eq!(mask_phone(input), expected);
    }

    #[test]
    fn test_mask_phone_first_match_only() {
        assert_eq!(
            mask_phone("13812345678/13987654321"),
            "138****5678/13987654321"
        );
    }

    #[test]
    fn test_mask_phone_longer_run_takes_leftmost_eleven() {
        assert_eq!(mask_phone("8613812345678"), "861****345678");
    }

    #[test_case("110101199003071234", "110101********1234" ; "eighteen digits")]
    #[test_case("11010119900307123X", "110101********123X" ; "uppercase check char")]
    #[test_case("11010119900307123x", "110101********123x" ; "lowercase check char")]
    #[test_case("110101900307123", "110101******123" ; "fifteen digits")]
    #[test_case("身份证:110101199003071234(旧)", "身份证:110101********1234(旧)" ; "annotated")]
    #[test_case("ID A12345", "** ******" ; "no run stars alphanumerics")]
    #[test_case("证件-丢失", "证件-丢失" ; "no alphanumerics")]
    fn test_mask_id_number(input: &str, expected: &str) {
        assert_eq!(mask_id_number(input), expected);
    }

    #[test]
    fn test_mask_id_number_first_match_only() {
        assert_eq!(
            mask_id_number("110101199003071234,220202199001011111"),
            "110101********1234,220202199001011111"
        );
    }

    #[test]
    fn test_mask_id_number_sixteen_digits_uses_fifteen_prefix() {
        assert_eq!(mask_id_number("1101019003071234"), "110101******1234");
    }

    #[test_case("AB12345678", "AB1*****78" ; "ten chars")]
    #[test_case("123456", "123*56" ; "six chars")]
    #[test_case("12345", "*****" ; "five chars")]
    #[test_case("1", "*" ; "one char")]
    #[test_case("", "" ; "empty")]
    fn test_mask_run(input: &str, expected: &str) {
        assert_eq!(mask_run(input), expected);
    }

    #[test]
    fn test_remasking_phone_never_reveals_more() {
        let once = mask_phone("13812345678");
        let twice = mask_phone(&once);
        assert_eq!(twice, "***********");
        assert_eq!(mask_phone(&twice), twice);
    }

    #[test]
    fn test_remasking_id_never_reveals_more() {
        let once = mask_id_number("110101199003071234");
        let twice = mask_id_number(&once);
        assert_eq!(twice, "******************");
        assert_eq!(mask_id_number(&twice), twice);
    }

    proptest! {
        #[test]
        fn prop_mask_phone_preserves_char_count(s in "\\PC{0,40}") {
            prop_assert_eq!(mask_phone(&s).chars().count(), s.chars().count());
        }

        #[test]
        fn prop_mask_id_preserves_char_count(s in "\\PC{0,40}") {
            prop_assert_eq!(mask_id_number(&s).chars().count(), s.chars().count());
        }

        #[test]
        fn prop_mask_phone_hides_middle_digits(prefix in "[a-z]{0,5}", digits in "[0-9]{11}") {
            let masked = mask_phone(&format!("{prefix}{digits}"));
            prop_assert_eq!(masked, format!("{prefix}{}****{}", &digits[..3], &digits[7..]));
        }
    }
}
