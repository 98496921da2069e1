//! `--counter`: online counter totals per period.

use fritz_api::counter::{CounterData, Period};
use fritz_api::FritzClient;

use crate::error::CliError;

pub async fn handle(client: &mut FritzClient, periods: &[Period]) -> Result<Vec<String>, CliError> {
    let data = client.net_counter().await?;
    render(&data, periods)
}

fn label(period: Period) -> &'static str {
    match period {
        Period::Today => "Today",
        Period::Yesterday => "Yesterday",
        Period::ThisWeek => "This week",
        Period::ThisMonth => "This month",
        Period::LastMonth => "Last month",
    }
}

pub fn render(data: &CounterData, periods: &[Period]) -> Result<Vec<String>, CliError> {
    periods
        .iter()
        .map(|&period| {
            let counters = data.period(period).ok_or_else(|| CliError::PageFormat {
                message: format!("counter page has no '{}' entry", period.key()),
            })?;
            let t = counters.traffic();
            Ok(format!(
                "{}: total {} MB, outgoing {} MB, incoming {} MB",
                label(period),
                t.total,
                t.outgoing,
                t.incoming
            ))
        })
        .collect()
}
