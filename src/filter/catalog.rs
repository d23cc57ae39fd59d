//! Fixed option lists offered by the filter panel.

/// Publishers the panel lists as checkboxes.
pub const PUBLISHERS: [&str; 8] = [
    "Elsevier",
    "Springer",
    "Taylor & Francis",
    "Wiley",
    "Inderscience",
    "World Scientific",
    "Emerald",
    "SAGE",
];

/// Index/database memberships the panel lists as checkboxes.
pub const DATABASES: [&str; 9] = [
    "Scopus",
    "SCI",
    "SCIE",
    "EI",
    "ESCI",
    "UGC",
    "Pubmed/Medline",
    "ABDC",
    "NAAS",
];
