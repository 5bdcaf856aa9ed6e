//! Morphological feature maps

use std::collections::BTreeMap;

/// Feature name (lower-cased) to value
pub type Morphology = BTreeMap<String, String>;

/// Parse a Universal Dependencies FEATS string such as `Case=Nom|Number=Sing`.
///
/// Returns `None` for an empty or `_` field. Items without `=` are ignored.
pub fn parse_ud_features(feats: &str) -> Option<Morphology> {
    let feats = feats.trim();
    if feats.is_empty() || feats == "_" {
        return None;
    }

    Some(lowercase_keys(
        feats.split('|').filter_map(|feat| feat.split_once('=')),
    ))
}

/// Build a feature map from name/value pairs, lower-casing the names
pub fn lowercase_keys<I, K, V>(features: I) -> Morphology
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    features
        .into_iter()
        .map(|(name, value)| (name.as_ref().to_lowercase(), value.into()))
        .collect()
}
