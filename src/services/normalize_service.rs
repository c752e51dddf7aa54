use serde_json::Value;
use tracing::debug;

use crate::api::orfr::RawPriceRecord;
use crate::models::PricePoint;

/// Return the value only if it is a JSON number with a finite `f64` reading.
/// Numeric strings are not coerced.
pub fn finite_number(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// Map one raw record to a price point, `None` when `mid` is not a finite number
pub fn normalize_record(record: &RawPriceRecord) -> Option<PricePoint> {
    let mid = finite_number(record.mid.as_ref())?;
    let date = record
        .date
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(PricePoint {
        ask: finite_number(record.ask.as_ref()),
        bid: finite_number(record.bid.as_ref()),
        performance: finite_number(record.performance.as_ref()),
        ..PricePoint::new(date, mid)
    })
}

/// Normalize a fetched batch, preserving feed order and dropping invalid records
pub fn normalize_batch(records: &[RawPriceRecord]) -> Vec<PricePoint> {
    let points: Vec<PricePoint> = records.iter().filter_map(normalize_record).collect();

    let dropped = records.len() - points.len();
    if dropped > 0 {
        debug!("Dropped {} record(s) without a numeric mid", dropped);
    }

    points
}
