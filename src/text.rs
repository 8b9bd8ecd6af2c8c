//! Text normalization and stable hashing shared by resources and units.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ESCAPED_WHITESPACE_REGEX: Regex = Regex::new(r"\\[btnfr]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

const HASH_MODULUS: u64 = 1_073_741_789;
const HASH_MULTIPLIER: u64 = 65_521;

const ENTITIES: [(&str, &str); 5] = [
    ("&apos;", "'"),
    ("&quot;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Normalizes a string for fuzzy comparison.
///
/// The result is lowercased, escaped and literal whitespace runs are collapsed
/// into a single space, the basic XML entities are decoded, backslashes are
/// stripped, typographic apostrophes become ASCII ones, and the ends are
/// trimmed.
pub fn clean_text(input: &str) -> String {
    normalize(&input.to_lowercase())
}

/// Like [`clean_text`], but passes `None` through.
pub fn clean_opt(input: Option<&str>) -> Option<String> {
    input.map(clean_text)
}

/// The [`clean_text`] pipeline without case folding.
///
/// Instance matching uses this so that "Save" and "save" stay distinct while
/// "Save  file" and "Save\nfile" do not.
pub fn clean_text_preserving_case(input: &str) -> String {
    normalize(input)
}

fn normalize(input: &str) -> String {
    let text = ESCAPED_WHITESPACE_REGEX.replace_all(input, " ");
    let mut text = WHITESPACE_REGEX.replace_all(&text, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    text.replace('\\', "")
        .replace('\u{2019}', "'")
        .trim()
        .to_string()
}

/// Raw value of the rolling hash over the UTF-16 code units of `input`.
pub fn hash_code(input: &str) -> u64 {
    input.encode_utf16().fold(0u64, |hash, unit| {
        ((hash + u64::from(unit)) % HASH_MODULUS) * HASH_MULTIPLIER % HASH_MODULUS
    })
}

/// Stable hash token for a string, `"r"` followed by the decimal hash.
///
/// These tokens are persisted by downstream tools, so the algorithm must never
/// change: `h = ((h + unit) mod 1073741789) * 65521 mod 1073741789` over each
/// UTF-16 code unit, starting from zero.
pub fn stable_hash(input: &str) -> String {
    format!("r{}", hash_code(input))
}
