//! Text normalization applied before any field is extracted.

use affiliation_gazetteer::Gazetteer;
use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

/// Literal abbreviations expanded regardless of the gazetteer's rule table.
static LITERAL_ABBREVIATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bDept\b\.?", "Department"),
        (r"\bSurg\b\.?", "Surgery"),
        (r"\bUniv\b\.?", "University"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// One or more leading "2 " / "2. " markers numbering the affiliations of a
/// byline. A lone digit is indistinguishable from a one-digit street number,
/// and such numbers carry no field the parser extracts, so both are dropped.
static LEADING_ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d\.?\s+)+").unwrap());

static EMAIL_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\be-?mail\s*:").unwrap());

static PO_BOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bP\.?\s?O\.?\s*Box\b").unwrap());

static EMPTY_PARENS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)").unwrap());

/// A comma with any whitespace before it, plus any commas that follow
/// separated only by whitespace.
static COMMA_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,(?:\s*,)*").unwrap());

static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Transliterate to ASCII: accented letters lose their marks, typographic
/// quotes and dashes become their plain equivalents.
pub fn fold_accents(text: &str) -> String {
    deunicode(text)
}

/// Expand `Dept`, `Surg` and `Univ` (with or without a trailing period).
pub fn expand_literal_abbreviations(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in LITERAL_ABBREVIATIONS.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    out
}

/// Normalize an affiliation string.
///
/// Trims, converts tabs to spaces, expands literal abbreviations, drops a
/// leading ordinal marker, asterisks, semicolons, `E-mail:` labels and
/// P.O. Box markers, then applies the first matching abbreviation rule from
/// the gazetteer. Passes repeat until the text stops changing, which makes
/// `clean(clean(x)) == clean(x)`.
///
/// Every changing pass either removes characters or expands a variant whose
/// canonical form contains no variant (checked when the gazetteer is built),
/// so the loop reaches a fixed point.
pub fn clean(text: &str, gazetteer: &Gazetteer) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = clean_pass(&current, gazetteer);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str, gazetteer: &Gazetteer) -> String {
    let mut out = text.trim().replace('\t', " ");
    out = expand_literal_abbreviations(&out);
    out = LEADING_ORDINAL_RE.replace(&out, "").into_owned();
    out = out.replace('*', " ").replace(';', "");
    out = EMAIL_LABEL_RE.replace_all(&out, "").into_owned();
    out = PO_BOX_RE.replace_all(&out, "").into_owned();
    if let Some(expanded) = gazetteer
        .abbreviation_rules()
        .iter()
        .find_map(|rule| rule.expand(&out))
    {
        out = expanded;
    }
    out.trim().to_string()
}

/// Tidy the separators left behind once the email and zip code have been cut
/// out: stray spaces before commas, repeated commas, empty parentheses and
/// leading or trailing commas.
pub fn tidy_residue(text: &str) -> String {
    let out = EMPTY_PARENS_RE.replace_all(text, "");
    let out = COMMA_RUN_RE.replace_all(&out, ",");
    let out = MULTI_SPACE_RE.replace_all(&out, " ");
    out.trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}
