use super::threshold::RoiCurve;
use crate::domain::SweepRange;
use crate::error::CalcError;
use serde::Serialize;

/// One sample of the RoI-vs-price-change curve, all in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub price_change_pct: f64,
    pub roi_pct: f64,
    /// RoI of holding the collateral instead of looping.
    pub hold_roi_pct: f64,
    pub rational_to_repay: bool,
}

impl SweepPoint {
    pub fn outperforms_hold(&self) -> bool {
        self.roi_pct > self.hold_roi_pct
    }
}

/// Lazy, evenly spaced evaluation of an `RoiCurve` over a price-change range.
///
/// Both endpoints are included. Restart by calling `sweep` again.
#[derive(Debug, Clone)]
pub struct Sweep<'a> {
    curve: &'a RoiCurve,
    range: SweepRange,
    samples: usize,
    next: usize,
}

pub fn sweep<'a>(
    curve: &'a RoiCurve,
    range: SweepRange,
    samples: usize,
) -> Result<Sweep<'a>, CalcError> {
    range.validate()?;
    if samples < 2 {
        return Err(CalcError::invalid(
            "sweepSamples",
            format!("must be >= 2, got {}", samples),
        ));
    }
    Ok(Sweep {
        curve,
        range,
        samples,
        next: 0,
    })
}

impl Sweep<'_> {
    fn point(&self, index: usize) -> SweepPoint {
        let step = index as f64 / (self.samples - 1) as f64;
        let span = self.range.max_pct - self.range.min_pct;
        let price_change_pct = self.range.min_pct + span * step;
        let multiplier = 1.0 + price_change_pct / 100.0;
        let close = self.curve.close_at(multiplier, false);
        let roi = self.curve.roi_of(&close);

        SweepPoint {
            price_change_pct,
            roi_pct: roi * 100.0,
            hold_roi_pct: price_change_pct,
            rational_to_repay: close.rational_to_repay,
        }
    }
}

impl Iterator for Sweep<'_> {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<SweepPoint> {
        if self.next >= self.samples {
            return None;
        }
        let point = self.point(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sweep<'_> {}
