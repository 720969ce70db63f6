//! # Jurisdiction Coding
//!
//! The static district enumeration and district-to-code table used when
//! composing member identifiers. District matching is trimmed and
//! case-insensitive; names outside the table fall back to their first
//! three characters, upper-cased, so registration is never rejected for
//! an unknown district.

/// State prefix carried by every member identifier.
pub const STATE_PREFIX: &str = "KER";

/// The 14 districts of Kerala, in conventional south-to-north order.
pub const KERALA_DISTRICTS: [&str; 14] = [
    "Thiruvananthapuram",
    "Kollam",
    "Pathanamthitta",
    "Alappuzha",
    "Kottayam",
    "Idukki",
    "Ernakulam",
    "Thrissur",
    "Palakkad",
    "Malappuram",
    "Kozhikode",
    "Wayanad",
    "Kannur",
    "Kasaragod",
];

/// District name to 3-letter jurisdiction code.
const DISTRICT_CODES: [(&str, &str); 14] = [
    ("Thiruvananthapuram", "TVM"),
    ("Kollam", "KLM"),
    ("Pathanamthitta", "PTA"),
    ("Alappuzha", "ALP"),
    ("Kottayam", "KTM"),
    ("Idukki", "IDK"),
    ("Ernakulam", "EKM"),
    ("Thrissur", "TSR"),
    ("Palakkad", "PKD"),
    ("Malappuram", "MLP"),
    ("Kozhikode", "KKD"),
    ("Wayanad", "WYD"),
    ("Kannur", "KNR"),
    ("Kasaragod", "KSG"),
];

/// Resolve the 3-letter jurisdiction code for a district name.
///
/// Lookup is trimmed and case-insensitive. Unknown names fall back to the
/// first three characters of the trimmed name, upper-cased (shorter names
/// yield what they have).
pub fn district_code(district: &str) -> String {
    let wanted = district.trim();
    for (name, code) in DISTRICT_CODES {
        if name.eq_ignore_ascii_case(wanted) {
            return code.to_string();
        }
    }
    wanted.chars().take(3).collect::<String>().to_uppercase()
}
