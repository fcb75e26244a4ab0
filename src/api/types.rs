//! REST Countries record types.
//!
//! Field names follow the API's camelCase JSON. Everything except the name and
//! identifier is optional upstream, so absent fields fall back to defaults
//! instead of failing the whole decode.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON object kept as key/value pairs in document order.
///
/// The API keys languages and currencies by code; display order must follow
/// the response, not the codes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            entries.push((k, v));
        }
        Ok(OrderedMap(entries))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    pub alt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    #[serde(default)]
    pub google_maps: String,
    #[serde(default)]
    pub open_street_maps: String,
}

/// International dialing prefix: `root` + one of `suffixes`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Idd {
    pub root: Option<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Car {
    #[serde(default)]
    pub signs: Vec<String>,
    pub side: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CoatOfArms {
    pub png: Option<String>,
    pub svg: Option<String>,
}

/// One nation or territory as returned by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: CountryName,
    pub cca3: String,
    #[serde(default)]
    pub cca2: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: u64,
    /// language code → language name
    #[serde(default)]
    pub languages: Option<OrderedMap<String>>,
    /// currency code → descriptor
    #[serde(default)]
    pub currencies: Option<OrderedMap<Currency>>,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub latlng: Vec<f64>,
    #[serde(default)]
    pub maps: Maps,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub idd: Idd,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub continents: Vec<String>,
    #[serde(default)]
    pub alt_spellings: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub independent: Option<bool>,
    #[serde(default)]
    pub un_member: bool,
    #[serde(default)]
    pub landlocked: bool,
    #[serde(default)]
    pub car: Car,
    #[serde(default)]
    pub start_of_week: Option<String>,
    #[serde(default)]
    pub coat_of_arms: CoatOfArms,
}

impl Country {
    /// Language names in response order.
    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .flat_map(|langs| langs.values().map(String::as_str))
    }

    pub fn first_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }
}
