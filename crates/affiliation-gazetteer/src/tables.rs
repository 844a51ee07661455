//! Built-in rule tables.
//!
//! Every table here is ordered and the order is part of its meaning: the
//! first matching entry wins wherever a table is scanned. Tests at the bottom
//! pin the orderings that matter.

/// Lowercase substrings that mark a segment as naming an organization.
pub const INSTITUTION_KEYWORDS: &[&str] = &[
    "university",
    "universit",
    "universidad",
    "universidade",
    "college",
    "institute",
    "institut",
    "hospital",
    "hopital",
    "ospedale",
    "klinik",
    "clinic",
    "medical center",
    "medical centre",
    "health system",
    "health science",
    "academy",
    "foundation",
    "national laboratory",
    "polytechnic",
    "politecnico",
    "ecole",
    "cnrs",
    "inserm",
];

/// Lowercase substrings that mark a segment as naming a sub-unit.
pub const DEPARTMENT_KEYWORDS: &[&str] = &[
    "department",
    "departamento",
    "departement",
    "dept",
    "division",
    "laboratory",
    "laboratories",
    "school of",
    "faculty",
    "center for",
    "centre for",
    "program in",
    "graduate program",
    "section of",
    "research group",
];

/// Lowercase substrings that disqualify a segment as an institution unless
/// it also says "university".
pub const EXCLUSION_KEYWORDS: &[&str] = &[
    "department",
    "dept",
    "division",
    "school of",
    "professor",
    "lecturer",
    "student",
    "fellow",
    "resident",
    "postdoc",
    "researcher",
    "scientist",
    "director",
    "chair",
    "emeritus",
    "candidate",
    "visiting",
];

/// Country definitions as (canonical lowercase name, lowercase variants).
///
/// Variants match case-insensitively as whole words. When a variant also
/// occurs inside another definition's variant ("guinea" in "papua new
/// guinea", "sudan" in "south sudan"), the longer one must be listed first.
/// Regions whose names embed another country's variant ("new south wales",
/// "new england") are listed under their own country ahead of it.
/// "uk" is deliberately absent; it is handled by a separate uppercase-only
/// check so that words like "Milwaukee" never match.
pub const COUNTRIES: &[(&str, &[&str])] = &[
    ("papua new guinea", &["papua new guinea"]),
    ("equatorial guinea", &["equatorial guinea"]),
    ("guinea-bissau", &["guinea-bissau"]),
    ("guinea", &["guinea"]),
    ("south sudan", &["south sudan"]),
    ("sudan", &["sudan"]),
    ("south africa", &["south africa"]),
    ("north korea", &["north korea", "dprk"]),
    ("south korea", &["south korea", "republic of korea", "korea"]),
    ("dominican republic", &["dominican republic"]),
    ("czech republic", &["czech republic", "czechia"]),
    ("democratic republic of the congo", &["democratic republic of the congo", "dr congo"]),
    ("republic of the congo", &["republic of the congo", "congo"]),
    ("united arab emirates", &["united arab emirates", "uae"]),
    ("australia", &["new south wales", "australia"]),
    ("united states of america", &["new england"]),
    ("united kingdom", &[
        "united kingdom",
        "great britain",
        "england",
        "scotland",
        "wales",
        "northern ireland",
    ]),
    ("ireland", &["ireland"]),
    ("new zealand", &["new zealand"]),
    ("saudi arabia", &["saudi arabia"]),
    ("sri lanka", &["sri lanka"]),
    ("hong kong", &["hong kong"]),
    ("taiwan", &["taiwan"]),
    ("china", &["people's republic of china", "peoples republic of china", "p.r. china", "pr china", "china"]),
    ("japan", &["japan"]),
    ("india", &["india"]),
    ("pakistan", &["pakistan"]),
    ("bangladesh", &["bangladesh"]),
    ("nepal", &["nepal"]),
    ("singapore", &["singapore"]),
    ("malaysia", &["malaysia"]),
    ("indonesia", &["indonesia"]),
    ("thailand", &["thailand"]),
    ("vietnam", &["vietnam", "viet nam"]),
    ("philippines", &["philippines"]),
    ("canada", &["canada"]),
    ("mexico", &["mexico"]),
    ("brazil", &["brazil", "brasil"]),
    ("argentina", &["argentina"]),
    ("chile", &["chile"]),
    ("colombia", &["colombia"]),
    ("peru", &["peru"]),
    ("venezuela", &["venezuela"]),
    ("cuba", &["cuba"]),
    ("germany", &["germany", "deutschland"]),
    ("france", &["france"]),
    ("italy", &["italy", "italia"]),
    ("spain", &["spain", "espana"]),
    ("portugal", &["portugal"]),
    ("netherlands", &["the netherlands", "netherlands", "holland"]),
    ("belgium", &["belgium"]),
    ("luxembourg", &["luxembourg"]),
    ("switzerland", &["switzerland"]),
    ("austria", &["austria"]),
    ("denmark", &["denmark"]),
    ("sweden", &["sweden"]),
    ("norway", &["norway"]),
    ("finland", &["finland"]),
    ("iceland", &["iceland"]),
    ("poland", &["poland"]),
    ("hungary", &["hungary"]),
    ("romania", &["romania"]),
    ("bulgaria", &["bulgaria"]),
    ("greece", &["greece"]),
    ("turkey", &["turkey", "turkiye"]),
    ("russia", &["russian federation", "russia"]),
    ("ukraine", &["ukraine"]),
    ("israel", &["israel"]),
    ("iran", &["iran"]),
    ("iraq", &["iraq"]),
    ("jordan", &["jordan"]),
    ("lebanon", &["lebanon"]),
    ("qatar", &["qatar"]),
    ("kuwait", &["kuwait"]),
    ("oman", &["oman"]),
    ("egypt", &["egypt"]),
    ("morocco", &["morocco"]),
    ("tunisia", &["tunisia"]),
    ("algeria", &["algeria"]),
    ("nigeria", &["nigeria"]),
    ("niger", &["niger"]),
    ("ghana", &["ghana"]),
    ("kenya", &["kenya"]),
    ("ethiopia", &["ethiopia"]),
    ("uganda", &["uganda"]),
    ("tanzania", &["tanzania"]),
    ("georgia", &["georgia"]),
    ("united states of america", &[
        "united states of america",
        "united states",
        "u.s.a.",
        "u.s.a",
        "usa",
    ]),
];

/// Abbreviation expansions as (canonical, case-sensitive token variants).
///
/// No canonical form may contain any variant token; the gazetteer builder
/// rejects tables that would keep expanding.
pub const ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("University of California Berkeley", &["UC Berkeley"]),
    ("University of California Los Angeles", &["UCLA"]),
    ("University of California San Francisco", &["UCSF"]),
    ("University of California San Diego", &["UCSD"]),
    ("Massachusetts Institute of Technology", &["MIT"]),
    ("California Institute of Technology", &["Caltech"]),
    ("Carnegie Mellon University", &["CMU"]),
    ("Johns Hopkins University", &["JHU"]),
    ("New York University", &["NYU"]),
    ("State University of New York", &["SUNY"]),
    ("University of Pennsylvania", &["UPenn", "U Penn"]),
    ("University of Southern California", &["USC"]),
    ("University of North Carolina", &["UNC"]),
    ("Louisiana State University", &["LSU"]),
    ("Georgia Institute of Technology", &["Georgia Tech"]),
    ("Virginia Polytechnic Institute and State University", &["Virginia Tech"]),
    ("University College London", &["UCL"]),
    ("Eidgenossische Technische Hochschule Zurich", &["ETH Zurich", "ETHZ"]),
];

/// Institutions with several campuses, and the campus cities (lowercase)
/// used to tell them apart.
pub const MULTI_CAMPUS: &[(&str, &[&str])] = &[
    ("state university of new york", &["buffalo", "albany", "stony brook", "binghamton"]),
    ("university of california", &[
        "berkeley",
        "los angeles",
        "san diego",
        "san francisco",
        "santa barbara",
        "santa cruz",
        "davis",
        "irvine",
        "riverside",
        "merced",
    ]),
    ("university of texas", &["austin", "dallas", "houston", "san antonio", "el paso", "arlington", "tyler"]),
    ("university of wisconsin", &["madison", "milwaukee"]),
    ("university of illinois", &["urbana", "chicago", "springfield"]),
    ("university of massachusetts", &["amherst", "boston", "lowell", "dartmouth", "worcester"]),
    ("university of missouri", &["kansas city", "st louis", "columbia"]),
    ("university of colorado", &["colorado springs", "boulder", "denver", "aurora"]),
    ("university of minnesota", &["minneapolis", "duluth"]),
    ("university of maryland", &["college park", "baltimore"]),
    ("university of michigan", &["ann arbor", "dearborn", "flint"]),
    ("university of north carolina", &["chapel hill", "charlotte", "greensboro", "wilmington"]),
    ("university of nebraska", &["lincoln", "omaha"]),
    ("university of alabama", &["birmingham", "huntsville", "tuscaloosa"]),
    ("indiana university", &["bloomington", "indianapolis"]),
];
