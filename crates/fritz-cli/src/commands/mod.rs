//! Command dispatch: runs the enabled reports in their fixed order, once or
//! in a loop.

pub mod add_mac;
pub mod counter;
pub mod devices;
pub mod overview;

use std::time::Duration;

use fritz_api::FritzClient;
use fritz_api::counter::Period;

use crate::cli::{CommandFlags, PeriodArg};
use crate::error::CliError;
use crate::output;

/// One read-only report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Overview,
    Devices,
    Counter(Vec<Period>),
}

impl Report {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Devices => "devices",
            Self::Counter(_) => "counter",
        }
    }

    async fn run(&self, client: &mut FritzClient) -> Result<Vec<String>, CliError> {
        match self {
            Self::Overview => overview::handle(client).await,
            Self::Devices => devices::handle(client).await,
            Self::Counter(periods) => counter::handle(client, periods).await,
        }
    }
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Today => Self::Today,
            PeriodArg::Yesterday => Self::Yesterday,
            PeriodArg::ThisWeek => Self::ThisWeek,
            PeriodArg::ThisMonth => Self::ThisMonth,
            PeriodArg::LastMonth => Self::LastMonth,
        }
    }
}

/// Enabled reports in execution order: overview, devices, counter.
pub fn selected_reports(flags: &CommandFlags) -> Vec<Report> {
    let mut reports = Vec::new();
    if flags.overview {
        reports.push(Report::Overview);
    }
    if flags.devices {
        reports.push(Report::Devices);
    }
    if flags.counter {
        let mut periods: Vec<Period> = Vec::new();
        for period in flags.period.iter().copied().map(Period::from) {
            if !periods.contains(&period) {
                periods.push(period);
            }
        }
        reports.push(Report::Counter(periods));
    }
    reports
}

/// Run every report framed by `> name <` and a blank line.
async fn run_once(client: &mut FritzClient, reports: &[Report]) -> Result<(), CliError> {
    for report in reports {
        output::print_lines(&[output::section_header(report.name())]);
        let lines = report.run(client).await?;
        output::print_lines(&lines);
        output::print_lines(&[String::new()]);
    }
    Ok(())
}

/// Run the reports once, or forever with `sleep` between iterations.
///
/// A failing report ends the run, also inside the loop.
pub async fn run(
    client: &mut FritzClient,
    reports: &[Report],
    sleep: Option<Duration>,
) -> Result<(), CliError> {
    let Some(interval) = sleep else {
        return run_once(client, reports).await;
    };

    let mut iteration: u64 = 0;
    loop {
        iteration += 1;
        tracing::debug!(iteration, "report iteration");
        run_once(client, reports).await?;
        tracing::debug!(secs = interval.as_secs(), "sleeping");
        tokio::time::sleep(interval).await;
    }
}
