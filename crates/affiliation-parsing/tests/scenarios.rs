use affiliation_parsing::{
    AffiliationParser, UNITED_STATES, parse_affiliation, parse_email, parse_zipcode,
    split_multiple_affiliations,
};

fn parser() -> AffiliationParser {
    AffiliationParser::bundled().unwrap()
}

#[test]
fn test_us_affiliation_with_email_and_zip() {
    let record = parser().parse(
        "Department of Surgery, University of Rochester, Rochester, NY 14642, jdoe@example.com",
    );
    assert_eq!(record.email, "jdoe@example.com");
    assert_eq!(record.zipcode, "14642");
    assert_eq!(record.us_state, "New York");
    assert_eq!(record.us_city, "ROCHESTER");
    assert_eq!(record.country, UNITED_STATES);
    assert!(record.departments.contains(&"Department of Surgery".to_string()));
    assert!(record.institutions.contains(&"University of Rochester".to_string()));
}

#[test]
fn test_uk_affiliation_has_no_us_fields() {
    let record = parser().parse("Univ. of Cambridge, Cambridge, UK");
    assert_eq!(record.institutions, vec!["University of Cambridge"]);
    assert_eq!(record.country, "united kingdom");
    assert_eq!(record.us_state, "");
    assert_eq!(record.us_city, "");
}

#[test]
fn test_location_only_resolves_city() {
    let record = parser().parse("New York, New York");
    assert!(record.institutions.is_empty());
    assert_eq!(record.location, "New York, New York");
    assert_eq!(record.us_city, "NEW YORK");
    assert_eq!(record.us_state, "New York");
    assert_eq!(record.country, UNITED_STATES);
}

#[test]
fn test_two_institutions_location_from_last() {
    let record = parser().parse(
        "Department of Biology, Harvard University, Cambridge, MA / \
         Department of Chemistry, Stanford University, Stanford, CA",
    );
    assert_eq!(
        record.institutions,
        vec!["Harvard University", "Stanford University"]
    );
    assert_eq!(record.location, "Stanford, CA");
    assert_eq!(record.us_state, "California");
    assert_eq!(record.us_city, "STANFORD");
}

#[test]
fn test_new_york_beats_york() {
    // Uppercase, so the state name does not match and the top-tier scope applies.
    let record = parser().parse("Columbia University, NEW YORK");
    assert_eq!(record.us_city, "NEW YORK");
    assert_eq!(record.country, UNITED_STATES);
    assert_eq!(record.us_state, "");
}

#[test]
fn test_st_louis_with_country_suffix() {
    let record = parser().parse(
        "Department of Medicine, Washington University in St. Louis, St. Louis, MO 63110, USA",
    );
    assert_eq!(record.zipcode, "63110");
    assert_eq!(record.location, "St Louis, MO, USA");
    assert_eq!(record.us_state, "Missouri");
    assert_eq!(record.us_city, "ST LOUIS");
    assert_eq!(record.country, UNITED_STATES);
    assert_eq!(
        record.full_text,
        "Department of Medicine, Washington University in St. Louis, St. Louis, MO, USA"
    );
}

#[test]
fn test_state_scopes_duplicate_city() {
    let record = parser().parse("Mayo Clinic, Rochester, MN 55905");
    assert_eq!(record.institutions, vec!["Mayo Clinic"]);
    assert_eq!(record.us_city, "ROCHESTER");
    assert_eq!(record.us_state, "Minnesota");
}

#[test]
fn test_campus_city_and_nearest_city() {
    let record = parser().parse("University of California, San Diego, La Jolla, CA 92093");
    assert_eq!(
        record.institutions,
        vec!["University of California San Diego"]
    );
    assert_eq!(record.us_city, "LA JOLLA");
    assert_eq!(record.us_state, "California");
}

#[test]
fn test_abbreviation_before_state_name() {
    let record = parser().parse("University of Missouri-Kansas City, Kansas City, MO");
    assert_eq!(
        record.institutions,
        vec!["University of Missouri-Kansas City"]
    );
    assert_eq!(record.us_state, "Missouri");
    assert_eq!(record.us_city, "KANSAS CITY");
}

#[test]
fn test_abbreviation_rule_and_campus() {
    let record = parser().parse("Dept. of EECS, UC Berkeley, Berkeley, CA 94720");
    assert_eq!(
        record.institutions,
        vec!["University of California Berkeley"]
    );
    assert_eq!(record.departments, vec!["Department of EECS"]);
    assert_eq!(record.us_city, "BERKELEY");
}

#[test]
fn test_accented_foreign_affiliation() {
    let record = parser().parse(
        "Département de Physique, Université de Montréal, Montréal, Québec, Canada",
    );
    assert_eq!(record.institutions, vec!["Universite de Montreal"]);
    assert_eq!(record.departments, vec!["Departement de Physique"]);
    assert_eq!(record.country, "canada");
    assert_eq!(record.us_state, "");
    assert_eq!(record.us_city, "");
}

#[test]
fn test_new_south_wales_is_australian() {
    let record = parser().parse(
        "School of Medicine, University of Sydney, Sydney, New South Wales, Australia",
    );
    assert_eq!(record.country, "australia");
    assert_eq!(record.institutions, vec!["University of Sydney"]);
    assert_eq!(record.us_state, "");
    assert_eq!(record.us_city, "");
}

#[test]
fn test_new_england_is_american() {
    let record = parser().parse("Tufts-New England Medical Center, Boston");
    assert_eq!(record.country, UNITED_STATES);
    assert_eq!(record.us_city, "BOSTON");
}

#[test]
fn test_long_byline_numbering_is_dropped() {
    let record = parser().parse("1 2 3 4 5 6 7 8 9 Harvard University");
    assert_eq!(record.institutions, vec!["Harvard University"]);
    assert_eq!(record.zipcode, "");
}

#[test]
fn test_free_functions_use_bundled_data() {
    let record = parse_affiliation("Harvard University, Boston, MA 02115");
    assert_eq!(record.us_city, "BOSTON");
    assert_eq!(record.zipcode, "02115");
    assert_eq!(parse_email("Contact: jane.doe@stanford.edu."), "jane.doe@stanford.edu");
    assert_eq!(parse_zipcode("Bethesda, MD 20892-1234"), "20892-1234");
}

#[test]
fn test_split_multiple_affiliations() {
    let records = split_multiple_affiliations(
        "Department of Surgery, Univ. of Rochester, Rochester, NY 14642; \
         Mayo Clinic, Rochester, MN. jdoe@example.com",
    );
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].us_state, "New York");
    assert_eq!(records[1].us_state, "Minnesota");
    assert!(records.iter().all(|r| r.us_city == "ROCHESTER"));
}

#[test]
fn test_record_serializes_every_field() {
    let record = parser().parse("Harvard University, Boston, MA");
    let json = serde_json::to_value(&record).unwrap();
    for key in [
        "full_text",
        "institutions",
        "departments",
        "email",
        "zipcode",
        "location",
        "country",
        "us_state",
        "us_city",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["us_city"], "BOSTON");
}
