use crate::models::{ChartEntry, PricePoint, RollingWindow};

/// Entries kept on the price chart across polling cycles
pub const CHART_CAPACITY: usize = 10;
/// Rows shown in the history table, taken from the latest batch only
pub const TABLE_ROWS: usize = 5;

/// Empty chart series with the standard capacity
pub fn new_chart_window() -> RollingWindow<ChartEntry> {
    RollingWindow::new(CHART_CAPACITY)
}

/// Append every point of the batch to the chart series, oldest entries evicted past capacity
pub fn append_chart_series(
    mut window: RollingWindow<ChartEntry>,
    batch: &[PricePoint],
) -> RollingWindow<ChartEntry> {
    window.extend(batch.iter().map(|p| ChartEntry {
        label: p.date.clone(),
        value: p.mid,
    }));
    window
}

/// Last `TABLE_ROWS` points of the batch, most recent first
pub fn table_snapshot(batch: &[PricePoint]) -> Vec<PricePoint> {
    let start = batch.len().saturating_sub(TABLE_ROWS);
    batch[start..].iter().rev().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(range: std::ops::Range<u32>) -> Vec<PricePoint> {
        range
            .map(|i| PricePoint::new(&format!("2025-06-02T{:02}:00:00+00:00", i), i as f64))
            .collect()
    }

    fn values(window: &RollingWindow<ChartEntry>) -> Vec<f64> {
        window.iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_chart_series_accumulates_across_batches() {
        let window = append_chart_series(new_chart_window(), &points(0..3));
        let window = append_chart_series(window, &points(3..6));
        assert_eq!(values(&window), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(window.front().unwrap().label, "2025-06-02T00:00:00+00:00");
    }

    #[test]
    fn test_chart_series_capped_fifo() {
        let mut window = new_chart_window();
        for cycle in 0..4 {
            window = append_chart_series(window, &points(cycle * 4..cycle * 4 + 4));
            assert!(window.len() <= CHART_CAPACITY);
        }
        assert_eq!(window.len(), CHART_CAPACITY);
        assert_eq!(values(&window), (6..16).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_large_batch_keeps_tail() {
        let window = append_chart_series(new_chart_window(), &points(0..15));
        assert_eq!(values(&window), (5..15).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_table_snapshot_most_recent_first() {
        let table = table_snapshot(&points(0..8));
        let mids: Vec<f64> = table.iter().map(|p| p.mid).collect();
        assert_eq!(mids, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_table_snapshot_short_batch() {
        let table = table_snapshot(&points(0..2));
        let mids: Vec<f64> = table.iter().map(|p| p.mid).collect();
        assert_eq!(mids, vec![1.0, 0.0]);
        assert!(table_snapshot(&[]).is_empty());
    }
}
