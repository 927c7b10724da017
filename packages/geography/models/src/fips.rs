//! US state FIPS code utilities.
//!
//! Maps between two-digit FIPS codes, two-letter postal abbreviations and
//! full state names for the 50 US states + DC.

/// `(fips, abbreviation, name)` for the 50 states + DC, ordered by FIPS.
pub const STATES: &[(&str, &str, &str)] = &[
    ("01", "AL", "Alabama"),
    ("02", "AK", "Alaska"),
    ("04", "AZ", "Arizona"),
    ("05", "AR", "Arkansas"),
    ("06", "CA", "California"),
    ("08", "CO", "Colorado"),
    ("09", "CT", "Connecticut"),
    ("10", "DE", "Delaware"),
    ("11", "DC", "District of Columbia"),
    ("12", "FL", "Florida"),
    ("13", "GA", "Georgia"),
    ("15", "HI", "Hawaii"),
    ("16", "ID", "Idaho"),
    ("17", "IL", "Illinois"),
    ("18", "IN", "Indiana"),
    ("19", "IA", "Iowa"),
    ("20", "KS", "Kansas"),
    ("21", "KY", "Kentucky"),
    ("22", "LA", "Louisiana"),
    ("23", "ME", "Maine"),
    ("24", "MD", "Maryland"),
    ("25", "MA", "Massachusetts"),
    ("26", "MI", "Michigan"),
    ("27", "MN", "Minnesota"),
    ("28", "MS", "Mississippi"),
    ("29", "MO", "Missouri"),
    ("30", "MT", "Montana"),
    ("31", "NE", "Nebraska"),
    ("32", "NV", "Nevada"),
    ("33", "NH", "New Hampshire"),
    ("34", "NJ", "New Jersey"),
    ("35", "NM", "New Mexico"),
    ("36", "NY", "New York"),
    ("37", "NC", "North Carolina"),
    ("38", "ND", "North Dakota"),
    ("39", "OH", "Ohio"),
    ("40", "OK", "Oklahoma"),
    ("41", "OR", "Oregon"),
    ("42", "PA", "Pennsylvania"),
    ("44", "RI", "Rhode Island"),
    ("45", "SC", "South Carolina"),
    ("46", "SD", "South Dakota"),
    ("47", "TN", "Tennessee"),
    ("48", "TX", "Texas"),
    ("49", "UT", "Utah"),
    ("50", "VT", "Vermont"),
    ("51", "VA", "Virginia"),
    ("53", "WA", "Washington"),
    ("54", "WV", "West Virginia"),
    ("55", "WI", "Wisconsin"),
    ("56", "WY", "Wyoming"),
];

fn by_fips(fips: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    STATES.iter().find(|(code, _, _)| *code == fips)
}

/// Maps a two-digit FIPS code to the two-letter state abbreviation.
///
/// Returns `"??"` for unrecognized codes.
#[must_use]
pub fn state_abbr(fips: &str) -> &'static str {
    by_fips(fips).map_or("??", |(_, abbr, _)| abbr)
}

/// Maps a two-digit FIPS code to the full state name.
///
/// Returns `"Unknown"` for unrecognized codes.
#[must_use]
pub fn state_name(fips: &str) -> &'static str {
    by_fips(fips).map_or("Unknown", |(_, _, name)| name)
}

/// Maps a full state name (case-insensitive, surrounding whitespace
/// ignored) to its two-letter abbreviation.
#[must_use]
pub fn abbr_for_state_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    STATES
        .iter()
        .find(|(_, _, full)| full.eq_ignore_ascii_case(name))
        .map(|(_, abbr, _)| *abbr)
}

/// Normalizes a state given either as a full name or as an abbreviation
/// to its two-letter abbreviation.
#[must_use]
pub fn abbreviate_state(state: &str) -> Option<&'static str> {
    abbr_for_state_name(state).or_else(|| {
        let state = state.trim();
        STATES
            .iter()
            .find(|(_, abbr, _)| abbr.eq_ignore_ascii_case(state))
            .map(|(_, abbr, _)| *abbr)
    })
}

/// The state FIPS prefix of a census geo ID (`"06037101100"` -> `"06"`).
///
/// Returns `None` if the ID is shorter than two characters or does not start
/// with two digits.
#[must_use]
pub fn state_fips_of(geo_id: &str) -> Option<&str> {
    let prefix = geo_id.get(..2)?;
    prefix
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then_some(prefix)
}
