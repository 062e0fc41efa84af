use serde::{Deserialize, Serialize};

/// One country as returned by `GET /v3.1/name/{name}` (only the fields we show).
///
/// Unknown fields are ignored; optional fields default to empty whether the key is
/// missing or `null`, so a sparse record (e.g. Antarctica has no capital and no
/// currencies) still decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    #[serde(default, deserialize_with = "de_null_default")]
    pub capital: Vec<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub population: u64,
    /// Language code -> language name, in the order the API sent them.
    #[serde(default, deserialize_with = "de_ordered_map", serialize_with = "ser_ordered_map")]
    pub languages: Vec<(String, String)>,
    /// Currency code -> descriptor, in the order the API sent them.
    #[serde(default, deserialize_with = "de_ordered_map", serialize_with = "ser_ordered_map")]
    pub currencies: Vec<(String, Currency)>,
    pub flags: Flags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default, deserialize_with = "de_null_default")]
    pub png: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Country {
    /// Language names in API order.
    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|(_, name)| name.as_str())
    }

    /// Currency names in API order.
    pub fn currency_names(&self) -> impl Iterator<Item = &str> {
        self.currencies.iter().map(|(_, c)| c.name.as_str())
    }
}

/// Serde helper: `null` reads as the type's default, same as a missing key.
fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde helper: read a JSON object into `(key, value)` pairs, keeping document order.
///
/// `serde_json::Map` sorts keys unless `preserve_order` is on; the detail view
/// joins names in the order the API lists them, so we collect entries ourselves.
/// `null` is accepted and yields an empty list.
fn de_ordered_map<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: serde::Deserializer<'de>,
    V: Deserialize<'de>,
{
    use serde::de::{MapAccess, Visitor};
    use std::marker::PhantomData;

    struct OrderedVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a JSON object or null")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((k, v)) = map.next_entry::<String, V>()? {
                out.push((k, v));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(OrderedVisitor(PhantomData))
}

fn ser_ordered_map<S, V>(entries: &[(String, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    V: Serialize,
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (k, v) in entries {
        map.serialize_entry(k, v)?;
    }
    map.end()
}
