//! HTML character reference decoding for display text.
//!
//! The trivia API escapes question and answer text as HTML. Only character
//! references are decoded here; markup is left as-is. Anything that does not
//! parse as a known reference is copied through unchanged, so this never fails.

use std::borrow::Cow;

/// Longest reference we try to match, `&` and `;` excluded.
const MAX_REFERENCE_LEN: usize = 32;

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("shy", '\u{ad}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("laquo", '\u{ab}'),
    ("raquo", '\u{bb}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
    ("bull", '\u{2022}'),
    ("middot", '\u{b7}'),
    ("deg", '\u{b0}'),
    ("prime", '\u{2032}'),
    ("Prime", '\u{2033}'),
    ("times", '\u{d7}'),
    ("divide", '\u{f7}'),
    ("plusmn", '\u{b1}'),
    ("frac12", '\u{bd}'),
    ("frac14", '\u{bc}'),
    ("frac34", '\u{be}'),
    ("sup2", '\u{b2}'),
    ("sup3", '\u{b3}'),
    ("micro", '\u{b5}'),
    ("pi", '\u{3c0}'),
    ("Pi", '\u{3a0}'),
    ("alpha", '\u{3b1}'),
    ("beta", '\u{3b2}'),
    ("gamma", '\u{3b3}'),
    ("delta", '\u{3b4}'),
    ("Delta", '\u{394}'),
    ("Sigma", '\u{3a3}'),
    ("Omega", '\u{3a9}'),
    ("rarr", '\u{2192}'),
    ("larr", '\u{2190}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("trade", '\u{2122}'),
    ("euro", '\u{20ac}'),
    ("pound", '\u{a3}'),
    ("yen", '\u{a5}'),
    ("cent", '\u{a2}'),
    ("sect", '\u{a7}'),
    ("para", '\u{b6}'),
    ("iexcl", '\u{a1}'),
    ("iquest", '\u{bf}'),
    ("Agrave", '\u{c0}'),
    ("Aacute", '\u{c1}'),
    ("Acirc", '\u{c2}'),
    ("Atilde", '\u{c3}'),
    ("Auml", '\u{c4}'),
    ("Aring", '\u{c5}'),
    ("AElig", '\u{c6}'),
    ("Ccedil", '\u{c7}'),
    ("Egrave", '\u{c8}'),
    ("Eacute", '\u{c9}'),
    ("Ecirc", '\u{ca}'),
    ("Euml", '\u{cb}'),
    ("Igrave", '\u{cc}'),
    ("Iacute", '\u{cd}'),
    ("Icirc", '\u{ce}'),
    ("Iuml", '\u{cf}'),
    ("Ntilde", '\u{d1}'),
    ("Ograve", '\u{d2}'),
    ("Oacute", '\u{d3}'),
    ("Ocirc", '\u{d4}'),
    ("Otilde", '\u{d5}'),
    ("Ouml", '\u{d6}'),
    ("Oslash", '\u{d8}'),
    ("Ugrave", '\u{d9}'),
    ("Uacute", '\u{da}'),
    ("Ucirc", '\u{db}'),
    ("Uuml", '\u{dc}'),
    ("Yacute", '\u{dd}'),
    ("szlig", '\u{df}'),
    ("agrave", '\u{e0}'),
    ("aacute", '\u{e1}'),
    ("acirc", '\u{e2}'),
    ("atilde", '\u{e3}'),
    ("auml", '\u{e4}'),
    ("aring", '\u{e5}'),
    ("aelig", '\u{e6}'),
    ("ccedil", '\u{e7}'),
    ("egrave", '\u{e8}'),
    ("eacute", '\u{e9}'),
    ("ecirc", '\u{ea}'),
    ("euml", '\u{eb}'),
    ("igrave", '\u{ec}'),
    ("iacute", '\u{ed}'),
    ("icirc", '\u{ee}'),
    ("iuml", '\u{ef}'),
    ("ntilde", '\u{f1}'),
    ("ograve", '\u{f2}'),
    ("oacute", '\u{f3}'),
    ("ocirc", '\u{f4}'),
    ("otilde", '\u{f5}'),
    ("ouml", '\u{f6}'),
    ("oslash", '\u{f8}'),
    ("ugrave", '\u{f9}'),
    ("uacute", '\u{fa}'),
    ("ucirc", '\u{fb}'),
    ("uuml", '\u{fc}'),
    ("yacute", '\u{fd}'),
    ("yuml", '\u{ff}'),
    ("scaron", '\u{161}'),
    ("Scaron", '\u{160}'),
    ("oelig", '\u{153}'),
    ("OElig", '\u{152}'),
];

/// Decodes HTML character references (`&amp;`, `&#039;`, `&#x27;`, ...) into
/// literal characters.
///
/// Input without any `&` is returned borrowed.
#[must_use]
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match decode_reference(after) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Decodes the reference at the start of `s` (text following a `&`).
///
/// Returns the character and the number of bytes consumed including `;`.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    let end = s
        .char_indices()
        .take(MAX_REFERENCE_LEN + 1)
        .find(|&(_, c)| c == ';')
        .map(|(i, _)| i)?;
    let name = &s[..end];

    let ch = match name.strip_prefix('#') {
        Some(numeric) => decode_numeric(numeric)?,
        None => NAMED
            .iter()
            .find(|(entity, _)| *entity == name)
            .map(|&(_, ch)| ch)?,
    };

    Some((ch, end + 1))
}

// Integer parsing accepts a leading sign, so the digit check comes first.
fn decode_numeric(digits: &str) -> Option<char> {
    let value = match digits.strip_prefix(['x', 'X']) {
        Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse::<u32>().ok()?,
        None => return None,
    };
    if value == 0 {
        return None;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_entities() {
        assert_eq!(normalize("A &amp; B &quot;test&quot;"), "A & B \"test\"");
        assert_eq!(normalize("It&#039;s"), "It's");
        assert_eq!(normalize("It&#x27;s &lt;3"), "It's <3");
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(normalize("no entities here"), Cow::Borrowed(_)));
    }

    #[test]
    fn decodes_accented_names() {
        assert_eq!(normalize("Pok&eacute;mon &amp; Bj&ouml;rk"), "Pokémon & Björk");
    }

    #[test]
    fn unknown_or_broken_references_pass_through() {
        assert_eq!(normalize("AT&T"), "AT&T");
        assert_eq!(normalize("&bogus; &"), "&bogus; &");
        assert_eq!(normalize("&#xZZ; &#0; &#1114112;"), "&#xZZ; &#0; &#1114112;");
        assert_eq!(normalize("trailing &amp"), "trailing &amp");
    }

    #[test]
    fn signed_numeric_references_pass_through() {
        assert_eq!(normalize("&#+65;"), "&#+65;");
        assert_eq!(normalize("&#x+41;"), "&#x+41;");
        assert_eq!(normalize("&#-65;"), "&#-65;");
        assert_eq!(normalize("&#65; &#x41;"), "A A");
    }

    #[test]
    fn decoding_is_single_pass() {
        assert_eq!(normalize("&amp;quot;"), "&quot;");
    }

    #[test]
    fn multibyte_text_around_references() {
        assert_eq!(normalize("日本&amp;東京"), "日本&東京");
    }
}
