//! XVA kinds and the simulation request.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// The closed set of supported valuation adjustments.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum XvaKind {
    /// Credit Valuation Adjustment.
    Cva,
    /// Debit Valuation Adjustment.
    Dva,
    /// Funding Valuation Adjustment.
    Fva,
    /// Margin Valuation Adjustment.
    Mva,
    /// Capital Valuation Adjustment.
    Kva,
}

impl XvaKind {
    /// All supported kinds, in canonical order.
    pub const ALL: [XvaKind; 5] = [
        XvaKind::Cva,
        XvaKind::Dva,
        XvaKind::Fva,
        XvaKind::Mva,
        XvaKind::Kva,
    ];

    /// Canonical index in `[0, 5)`, matching the order of [`Self::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            XvaKind::Cva => 0,
            XvaKind::Dva => 1,
            XvaKind::Fva => 2,
            XvaKind::Mva => 3,
            XvaKind::Kva => 4,
        }
    }

    /// Upper-case token as used on the command line and in result headers.
    pub fn token(self) -> &'static str {
        match self {
            XvaKind::Cva => "CVA",
            XvaKind::Dva => "DVA",
            XvaKind::Fva => "FVA",
            XvaKind::Mva => "MVA",
            XvaKind::Kva => "KVA",
        }
    }
}

impl fmt::Display for XvaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for XvaKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CVA" => Ok(XvaKind::Cva),
            "DVA" => Ok(XvaKind::Dva),
            "FVA" => Ok(XvaKind::Fva),
            "MVA" => Ok(XvaKind::Mva),
            "KVA" => Ok(XvaKind::Kva),
            other => Err(EngineError::InvalidRequest(format!(
                "unknown XVA kind: {other}"
            ))),
        }
    }
}

/// Immutable simulation request: one non-negative rate parameter per
/// requested XVA kind, keys unique.
///
/// The rate is the kind's strike/spread proxy `K` used in the exposure
/// clamps (see the engine's exposure aggregation).
///
/// # Examples
///
/// ```
/// use nmc_core::{XvaKind, XvaRequest};
///
/// let request = XvaRequest::parse("CVA=0.0,FVA=0.05").unwrap();
/// assert_eq!(request.len(), 2);
/// assert_eq!(request.rate(XvaKind::Fva), Some(0.05));
///
/// // Unknown kinds fail fast.
/// assert!(XvaRequest::parse("XYZ=0.1").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XvaRequest {
    entries: BTreeMap<XvaKind, f64>,
}

impl XvaRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a kind with its rate parameter.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] if the rate is negative or
    /// non-finite, or if the kind was already requested.
    pub fn insert(&mut self, kind: XvaKind, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(EngineError::InvalidRequest(format!(
                "rate for {kind} must be a finite non-negative number, got {rate}"
            )));
        }
        if self.entries.contains_key(&kind) {
            return Err(EngineError::InvalidRequest(format!(
                "duplicate XVA kind: {kind}"
            )));
        }
        self.entries.insert(kind, rate);
        Ok(())
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, kind: XvaKind, rate: f64) -> Result<Self> {
        self.insert(kind, rate)?;
        Ok(self)
    }

    /// Parses a comma-separated kind list, e.g. `"CVA=0.0,DVA=0.1"`.
    ///
    /// A bare token (`"CVA"`) is accepted with a rate of 0.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] on unknown kind tokens,
    /// malformed or negative rates, and duplicate kinds.
    pub fn parse(input: &str) -> Result<Self> {
        let mut request = Self::new();
        for token in input.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(EngineError::InvalidRequest(
                    "empty XVA kind token".to_string(),
                ));
            }
            let (kind_str, rate) = match token.split_once('=') {
                Some((kind_str, rate_str)) => {
                    let rate = rate_str.trim().parse::<f64>().map_err(|_| {
                        EngineError::InvalidRequest(format!(
                            "malformed rate value: {rate_str}"
                        ))
                    })?;
                    (kind_str.trim(), rate)
                }
                None => (token, 0.0),
            };
            request.insert(kind_str.parse()?, rate)?;
        }
        Ok(request)
    }

    /// Rate parameter for `kind`, if requested.
    #[inline]
    pub fn rate(&self, kind: XvaKind) -> Option<f64> {
        self.entries.get(&kind).copied()
    }

    /// Requested kinds, in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = XvaKind> + '_ {
        self.entries.keys().copied()
    }

    /// Iterator over `(kind, rate)` entries, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (XvaKind, f64)> + '_ {
        self.entries.iter().map(|(&kind, &rate)| (kind, rate))
    }

    /// Number of requested kinds.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no kind was requested.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in XvaKind::ALL {
            assert_eq!(kind.token().parse::<XvaKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_unknown_token() {
        let err = "XYZ".parse::<XvaKind>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_parse_with_rates() {
        let request = XvaRequest::parse("CVA=0.0,DVA=0.1,KVA=0.25").unwrap();
        assert_eq!(request.len(), 3);
        assert_eq!(request.rate(XvaKind::Cva), Some(0.0));
        assert_eq!(request.rate(XvaKind::Dva), Some(0.1));
        assert_eq!(request.rate(XvaKind::Kva), Some(0.25));
        assert_eq!(request.rate(XvaKind::Fva), None);
    }

    #[test]
    fn test_parse_bare_token_defaults_to_zero_rate() {
        let request = XvaRequest::parse("FVA").unwrap();
        assert_eq!(request.rate(XvaKind::Fva), Some(0.0));
    }

    #[test]
    fn test_parse_unknown_kind_fails() {
        assert!(XvaRequest::parse("XYZ=0.1").is_err());
        assert!(XvaRequest::parse("CVA=0.0,XYZ=0.1").is_err());
    }

    #[test]
    fn test_parse_malformed_rate_fails() {
        let err = XvaRequest::parse("CVA=abc").unwrap_err();
        assert!(err.to_string().contains("malformed rate"));
    }

    #[test]
    fn test_insert_rejects_negative_rate() {
        let mut request = XvaRequest::new();
        assert!(request.insert(XvaKind::Cva, -0.1).is_err());
        assert!(request.insert(XvaKind::Cva, f64::NAN).is_err());
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut request = XvaRequest::new();
        request.insert(XvaKind::Cva, 0.1).unwrap();
        let err = request.insert(XvaKind::Cva, 0.2).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_kinds_in_canonical_order() {
        let request = XvaRequest::parse("KVA=0.1,CVA=0.2,FVA=0.3").unwrap();
        let kinds: Vec<XvaKind> = request.kinds().collect();
        assert_eq!(kinds, vec![XvaKind::Cva, XvaKind::Fva, XvaKind::Kva]);
    }
}
