//! Updater descriptors.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Tree-shaped partial-update descriptor.
///
/// Leaves are `Set` (replace the value at this path) or `Merge` (shallow-
/// merge an object into the mapping at this path); `Fields` descends one
/// level further into the state tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Updater {
    Set(Value),
    Merge(Map<String, Value>),
    Fields(BTreeMap<String, Updater>),
}

impl Updater {
    pub fn set(value: impl Into<Value>) -> Self {
        Updater::Set(value.into())
    }

    /// Explicitly set the value at this path to JSON `null`. Distinct from
    /// leaving the key untouched: the key stays present, holding `null`.
    pub fn clear() -> Self {
        Updater::Set(Value::Null)
    }

    pub fn merge(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Updater::Merge(entries.into_iter().collect())
    }

    /// Wrap `updater` so it applies one level down, under `key`.
    pub fn field(key: impl Into<String>, updater: Updater) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(key.into(), updater);
        Updater::Fields(fields)
    }

    pub fn fields(entries: impl IntoIterator<Item = (String, Updater)>) -> Self {
        Updater::Fields(entries.into_iter().collect())
    }

    /// Wrap `updater` under a whole path, outermost key first.
    pub fn at<I, S>(path: I, updater: Updater) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        path.into_iter()
            .rev()
            .fold(updater, |inner, key| Updater::field(key, inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn at_nests_outermost_first() {
        let nested = Updater::at(["where", "a", "expr2"], Updater::set("SFO"));
        let expected = Updater::field(
            "where",
            Updater::field("a", Updater::field("expr2", Updater::set("SFO"))),
        );
        assert_eq!(nested, expected);
    }

    #[test]
    fn clear_is_explicit_null() {
        assert_eq!(Updater::clear(), Updater::Set(json!(null)));
    }
}
