use std::cmp::Ordering;

use get_size::GetSize;
use serde::{Deserialize, Serialize};

use crate::error::{TsdbError, TsdbResult};

/// Well-known label name holding the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// Label is a key/value pair of strings.
///
/// The derived ordering compares `name` first, then `value`, which is the per-label
/// step of [`compare_labels`].
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, GetSize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Compares two label sets.
///
/// Labels are compared pairwise by name, then by value. If one set is a prefix of the
/// other, the set with fewer labels comes first. This is the only identity key used by
/// the merge engine, so anything sorting label sets alongside it should use it too.
pub fn compare_labels(a: &[Label], b: &[Label]) -> Ordering {
    let len = a.len().min(b.len());
    for i in 0..len {
        match a[i].name.cmp(&b[i].name) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match a[i].value.cmp(&b[i].value) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

/// Returns a label set sorted by name.
/// The caller has to guarantee that all label names are unique.
pub fn new_labels(mut labels: Vec<Label>) -> Vec<Label> {
    labels.sort_by(|a, b| a.name.cmp(&b.name));
    labels
}

/// Creates a sorted label set from name/value pairs of strings.
pub fn labels_from_strings(ss: &[&str]) -> TsdbResult<Vec<Label>> {
    if ss.len() % 2 != 0 {
        return Err(TsdbError::InvalidLabels(format!(
            "expected name/value pairs, got {} strings",
            ss.len()
        )));
    }
    let labels = ss
        .chunks_exact(2)
        .map(|pair| Label::new(pair[0], pair[1]))
        .collect();
    Ok(new_labels(labels))
}

/// Creates a sorted label set from a map (or any iterator) of name/value pairs.
pub fn labels_from_map<I, K, V>(map: I) -> Vec<Label>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    new_labels(map.into_iter().map(|(k, v)| Label::new(k, v)).collect())
}

/// Returns the value of the label with the given name, if present.
pub fn get_label_value<'a>(labels: &'a [Label], name: &str) -> Option<&'a str> {
    labels
        .iter()
        .find(|label| label.name == name)
        .map(|label| label.value.as_str())
}
