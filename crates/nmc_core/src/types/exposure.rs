//! Engine output types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::XvaKind;

/// Aggregated exposure output for one XVA kind.
///
/// Holds one value per time grid point, produced once by the exposure
/// aggregation stage and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureProfile {
    values: Vec<f64>,
}

impl ExposureProfile {
    /// Wraps a value vector as a profile.
    #[inline]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of time grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the profile holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at grid index `j`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// The underlying values, index 0 first.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Final output of a simulation run: one exposure profile per requested
/// XVA kind.
///
/// Keyed by kind, so iteration order is canonical and independent of
/// task completion order. Serialises trivially to the delimited results
/// table written by the adapter layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    profiles: BTreeMap<XvaKind, ExposureProfile>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the profile for `kind`, replacing any previous entry.
    pub fn insert(&mut self, kind: XvaKind, profile: ExposureProfile) {
        self.profiles.insert(kind, profile);
    }

    /// Profile for `kind`, if present.
    #[inline]
    pub fn get(&self, kind: XvaKind) -> Option<&ExposureProfile> {
        self.profiles.get(&kind)
    }

    /// Kinds present, in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = XvaKind> + '_ {
        self.profiles.keys().copied()
    }

    /// Iterator over `(kind, profile)` entries, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (XvaKind, &ExposureProfile)> + '_ {
        self.profiles.iter().map(|(&kind, profile)| (kind, profile))
    }

    /// Number of profiles held.
    #[inline]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the result set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<(XvaKind, ExposureProfile)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (XvaKind, ExposureProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_accessors() {
        let profile = ExposureProfile::from_values(vec![0.0, 0.5, 0.25]);
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.get(1), Some(0.5));
        assert_eq!(profile.get(3), None);
    }

    #[test]
    fn test_result_set_keyed_by_kind() {
        let mut results = ResultSet::new();
        results.insert(XvaKind::Kva, ExposureProfile::from_values(vec![1.0]));
        results.insert(XvaKind::Cva, ExposureProfile::from_values(vec![2.0]));

        assert_eq!(results.len(), 2);
        let kinds: Vec<XvaKind> = results.kinds().collect();
        assert_eq!(kinds, vec![XvaKind::Cva, XvaKind::Kva]);
        assert_eq!(results.get(XvaKind::Cva).unwrap().values(), &[2.0]);
        assert!(results.get(XvaKind::Dva).is_none());
    }

    #[test]
    fn test_result_set_json_round_trip() {
        let mut results = ResultSet::new();
        results.insert(XvaKind::Cva, ExposureProfile::from_values(vec![0.0, 0.012]));
        results.insert(XvaKind::Fva, ExposureProfile::from_values(vec![0.0, 0.034]));

        let json = serde_json::to_string(&results).unwrap();
        let restored: ResultSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, results);
    }

    #[test]
    fn test_result_set_from_iterator() {
        let results: ResultSet = XvaKind::ALL
            .into_iter()
            .map(|kind| (kind, ExposureProfile::from_values(vec![0.0; 3])))
            .collect();
        assert_eq!(results.len(), 5);
    }
}
