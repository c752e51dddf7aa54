use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::api::orfr::{ApiError, RawPriceRecord, SpotPriceClient};
use crate::config::Config;
use crate::models::{ChartEntry, PerformanceClass, PricePoint, RollingWindow};
use crate::services::poll_service::Cycle;
use crate::services::{chart_service, normalize_service, price_service, window_service};
use crate::utils::format::{
    format_current_price, format_date, format_optional, format_performance, PLACEHOLDER,
};
use crate::utils::Table;

/// What one fetch cycle did to the dashboard
#[derive(Debug)]
pub enum CycleOutcome {
    /// State replaced from a batch of `points` valid quotes
    Updated { points: usize },
    /// Feed returned nothing usable, state left as is
    Empty,
    /// Fetch failed, state left as is
    Failed(ApiError),
}

/// Everything the dashboard displays, carried from one cycle to the next
pub struct Dashboard {
    chart: RollingWindow<ChartEntry>,
    table: Vec<PricePoint>,
    current: Option<PricePoint>,
    last_update: Option<DateTime<Utc>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            chart: window_service::new_chart_window(),
            table: Vec::new(),
            current: None,
            last_update: None,
        }
    }

    pub fn chart(&self) -> &RollingWindow<ChartEntry> {
        &self.chart
    }

    pub fn table(&self) -> &[PricePoint] {
        &self.table
    }

    pub fn current(&self) -> Option<&PricePoint> {
        self.current.as_ref()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Apply the result of a fetch; failures leave every view untouched
    pub fn apply_fetch_result(
        &mut self,
        result: Result<Vec<RawPriceRecord>, ApiError>,
        now: DateTime<Utc>,
    ) -> CycleOutcome {
        match result {
            Ok(records) => self.apply_batch(&records, now),
            Err(e) => CycleOutcome::Failed(e),
        }
    }

    /// Normalize a batch and refresh the current price, chart and table from it
    pub fn apply_batch(&mut self, records: &[RawPriceRecord], now: DateTime<Utc>) -> CycleOutcome {
        let points = normalize_service::normalize_batch(records);
        if points.is_empty() {
            return CycleOutcome::Empty;
        }

        self.current = price_service::select_current_price(&points, now).cloned();

        let chart = std::mem::replace(&mut self.chart, window_service::new_chart_window());
        self.chart = window_service::append_chart_series(chart, &points);

        self.table = window_service::table_snapshot(&points);
        self.last_update = Some(now);

        CycleOutcome::Updated { points: points.len() }
    }

    /// Current price card followed by the history table
    pub fn render_text(&self, ansi: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Prix courant (mid) : {}\n",
            format_current_price(self.current())
        ));
        if let Some(point) = self.current() {
            output.push_str(&format!("Cotation du {}\n", format_date(point)));
        }
        if let Some(updated) = self.last_update() {
            output.push_str(&format!("Mis à jour à {} UTC\n", updated.format("%H:%M:%S")));
        }
        output.push('\n');

        let mut table = Table::new(vec!["Date (UTC)", "Ask", "Mid", "Bid", "Performance"]);
        for point in &self.table {
            let date = format_date(point);
            let ask = format_optional(point.ask);
            let mid = format_optional(Some(point.mid));
            let bid = format_optional(point.bid);
            let perf = format_performance(point.performance);
            let class = PerformanceClass::classify(point.performance);

            table.add_colored_row(vec![
                (date.as_str(), None),
                (ask.as_str(), None),
                (mid.as_str(), None),
                (bid.as_str(), None),
                (perf.as_str(), Some(class.color())),
            ]);
        }

        if ansi {
            output.push_str(&table.render_ansi());
        } else {
            output.push_str(&table.render());
        }
        if table.is_empty() {
            output.push_str(PLACEHOLDER);
            output.push('\n');
        }

        output
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch one batch and update the dashboard. Errors end the cycle, never the caller.
pub async fn run_cycle(client: &SpotPriceClient, dashboard: &mut Dashboard, config: &Config) -> CycleOutcome {
    let result = client.get_spot_prices().await;
    let outcome = dashboard.apply_fetch_result(result, Utc::now());

    match &outcome {
        CycleOutcome::Updated { points } => {
            info!(
                "Dashboard updated from {} quote(s), chart holds {}/{}, table shows {} row(s)",
                points,
                dashboard.chart().len(),
                dashboard.chart().capacity(),
                dashboard.table().len()
            );
            if let (Some(first), Some(last)) = (dashboard.chart().front(), dashboard.chart().back()) {
                debug!("Chart spans {} .. {}", first.label, last.label);
            }
            if let Some(current) = dashboard.current() {
                debug!(
                    "Current price {} from {} ({})",
                    current.mid,
                    current.date,
                    PerformanceClass::classify(current.performance).as_str()
                );
            }
            println!("{}", dashboard.render_text(true));

            match chart_service::render_chart(
                dashboard.chart(),
                &config.chart_path,
                config.chart_width,
                config.chart_height,
            ) {
                Ok(()) => debug!("Chart written to {}", config.chart_path),
                Err(e) => warn!("Chart not rendered: {}", e),
            }
        }
        CycleOutcome::Empty => {
            debug!("Spot price feed returned no usable items, keeping previous state");
        }
        CycleOutcome::Failed(e) => {
            error!("Could not fetch spot prices through the proxy: {}", e);
        }
    }

    outcome
}

/// Live dashboard driven by the polling loop
pub struct DashboardPoller {
    client: SpotPriceClient,
    dashboard: Dashboard,
    config: Config,
}

impl DashboardPoller {
    pub fn new(client: SpotPriceClient, config: Config) -> Self {
        Self {
            client,
            dashboard: Dashboard::new(),
            config,
        }
    }
}

impl Cycle for DashboardPoller {
    async fn run(&mut self) {
        run_cycle(&self.client, &mut self.dashboard, &self.config).await;
    }
}
