//! Display formatting for country fields.
//!
//! One fixed display locale (English labels, `.` decimal separator).

use crate::api::Country;

pub const NOT_AVAILABLE: &str = "N/A";

/// 1.2 billion / 213.0 million / 4.5 thousand / 999
pub fn format_population(population: u64) -> String {
    let p = population as f64;
    if population >= 1_000_000_000 {
        format!("{:.1} billion", p / 1_000_000_000.0)
    } else if population >= 1_000_000 {
        format!("{:.1} million", p / 1_000_000.0)
    } else if population >= 1_000 {
        format!("{:.1} thousand", p / 1_000.0)
    } else {
        population.to_string()
    }
}

/// Joins items as "a, b and c". Empty input gives `N/A`.
fn join_natural(mut items: Vec<String>) -> String {
    match items.len() {
        0 => NOT_AVAILABLE.to_string(),
        1 => items.remove(0),
        _ => {
            let last = items.pop().unwrap_or_default();
            format!("{} and {}", items.join(", "), last)
        }
    }
}

pub fn format_languages(country: &Country) -> String {
    join_natural(country.language_names().map(str::to_string).collect())
}

/// "Euro (€)" entries joined naturally. A missing symbol leaves empty parens.
pub fn format_currencies(country: &Country) -> String {
    let entries = country
        .currencies
        .iter()
        .flat_map(|map| map.values())
        .map(|c| format!("{} ({})", c.name, c.symbol))
        .collect();
    join_natural(entries)
}

/// Square kilometres with thousands separators, no decimals.
pub fn format_area(area: Option<f64>) -> String {
    match area {
        Some(a) if a >= 0.0 => format!("{} km²", group_thousands(a.round() as u64)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// 213421000 → "213,421,000"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "+33" for single-suffix codes; "+1 (201, 202, ...)" style for shared roots.
pub fn format_calling_code(country: &Country) -> String {
    let Some(root) = country.idd.root.as_deref() else {
        return NOT_AVAILABLE.to_string();
    };
    match country.idd.suffixes.as_slice() {
        [] => root.to_string(),
        [only] => format!("{root}{only}"),
        many => {
            let shown: Vec<&str> = many.iter().take(3).map(String::as_str).collect();
            let more = if many.len() > 3 { ", ..." } else { "" };
            format!("{root} ({}{more})", shown.join(", "))
        }
    }
}

/// "46.00°N, 2.00°E"
pub fn format_coordinates(latlng: &[f64]) -> String {
    match latlng {
        [lat, lng, ..] => {
            let ns = if *lat >= 0.0 { 'N' } else { 'S' };
            let ew = if *lng >= 0.0 { 'E' } else { 'W' };
            format!("{:.2}°{ns}, {:.2}°{ew}", lat.abs(), lng.abs())
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(", ")
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// The four groups of fields shown in the details overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    General,
    Geography,
    Economy,
    Misc,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::General,
        DetailTab::Geography,
        DetailTab::Economy,
        DetailTab::Misc,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DetailTab::General => "General",
            DetailTab::Geography => "Geography",
            DetailTab::Economy => "Economy & codes",
            DetailTab::Misc => "Misc",
        }
    }
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Label/value rows for one details tab.
pub fn details(country: &Country, tab: DetailTab) -> Vec<(&'static str, String)> {
    match tab {
        DetailTab::General => vec![
            ("Official name", country.name.official.clone()),
            ("Capital", format_list(&country.capital)),
            ("Population", format_population(country.population)),
            ("Languages", format_languages(country)),
            ("Currencies", format_currencies(country)),
            ("Also known as", format_list(&country.alt_spellings)),
            ("Status", or_na(country.status.as_deref())),
            ("Independent", or_na(country.independent.map(yes_no))),
            ("UN member", yes_no(country.un_member).to_string()),
        ],
        DetailTab::Geography => vec![
            ("Region", or_na(Some(&country.region))),
            ("Subregion", or_na(country.subregion.as_deref())),
            ("Continents", format_list(&country.continents)),
            ("Area", format_area(country.area)),
            ("Coordinates", format_coordinates(&country.latlng)),
            ("Landlocked", yes_no(country.landlocked).to_string()),
            ("Borders", format_list(&country.borders)),
        ],
        DetailTab::Economy => vec![
            ("Currencies", format_currencies(country)),
            ("Calling code", format_calling_code(country)),
            ("Top-level domain", format_list(&country.tld)),
            ("Code (alpha-2)", or_na(Some(&country.cca2))),
            ("Code (alpha-3)", country.cca3.clone()),
        ],
        DetailTab::Misc => vec![
            ("Time zones", format_list(&country.timezones)),
            ("Drives on", or_na(country.car.side.as_deref())),
            ("Start of week", or_na(country.start_of_week.as_deref())),
            ("Google Maps", or_na(Some(&country.maps.google_maps))),
            ("OpenStreetMap", or_na(Some(&country.maps.open_street_maps))),
        ],
    }
}
