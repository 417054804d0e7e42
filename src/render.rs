use analytics::display::{format_signed, format_units, StatsDisplay};
use analytics::{AnalystDetail, DashboardReport, DateRange, StatsBundle};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::PlayRecord;

const DATE_FORMAT: &str = "%b %d, %Y";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn range_line(range: Option<&DateRange>) -> String {
    match range {
        Some(r) => format!(
            "{} - {}",
            r.start.format(DATE_FORMAT),
            r.end.format(DATE_FORMAT)
        ),
        None => "no plays recorded".to_string(),
    }
}

fn metrics_table(stats: &StatsBundle) -> Table {
    let shown = StatsDisplay::from(stats);
    let mut table = new_table(vec![
        "Total Plays", "Wins", "Losses", "Pushes", "Win Rate", "ROI", "Net Units",
    ]);
    table.add_row(vec![
        shown.total,
        shown.wins,
        shown.losses,
        shown.pushes,
        shown.win_rate,
        shown.roi,
        shown.net_units,
    ]);
    table
}

fn plays_table(plays: &[PlayRecord]) -> Table {
    let mut table = new_table(vec![
        "Date", "Play", "Odds", "Analyst", "Result", "Units Risked", "Units Won",
    ]);
    for play in plays {
        table.add_row(vec![
            play.date.format(DATE_FORMAT).to_string(),
            play.play.clone(),
            play.odds.clone(),
            play.member.clone(),
            play.result.to_string(),
            format_units(play.units_out),
            format_units(play.units_in),
        ]);
    }
    table
}

/// Renders the overview: overall metrics, cohort, analyst ranking, recent plays.
pub fn render_report(report: &DashboardReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Window: {}\n\n", range_line(report.range.as_ref())));

    out.push_str("Overall Statistics\n");
    out.push_str(&format!("{}\n\n", metrics_table(&report.overall)));

    out.push_str(&format!(
        "Top {} Analysts (all-time net units): {}\n",
        report.cohort.members.len(),
        report.cohort.members.join(", ")
    ));
    out.push_str(&format!("{}\n\n", metrics_table(&report.cohort.stats)));

    out.push_str("Analyst Statistics\n");
    let mut analysts = new_table(vec![
        "Analyst", "Total Plays", "Wins", "Losses", "Pushes", "Win Rate", "Units Risked",
        "Units Won", "Net Units", "ROI",
    ]);
    for row in &report.analysts {
        let shown = StatsDisplay::from(&row.stats);
        analysts.add_row(vec![
            row.member.clone(),
            shown.total,
            shown.wins,
            shown.losses,
            shown.pushes,
            shown.win_rate,
            shown.units_risked,
            shown.units_won,
            shown.net_units,
            shown.roi,
        ]);
    }
    out.push_str(&format!("{analysts}\n\n"));

    out.push_str("Recent Plays\n");
    out.push_str(&plays_table(&report.recent_plays).to_string());

    out
}

/// Renders one analyst's summary and play list.
pub fn render_analyst(detail: &AnalystDetail) -> String {
    let shown = StatsDisplay::from(&detail.stats);
    let mut out = String::new();

    out.push_str(&format!("Window: {}\n\n", range_line(detail.range.as_ref())));

    let mut summary = new_table(vec!["Analyst", "Total Plays", "Win Rate", "Net Units", "ROI"]);
    summary.add_row(vec![
        detail.member.clone(),
        shown.total,
        shown.win_rate,
        shown.net_units,
        shown.roi,
    ]);
    out.push_str(&format!("{summary}\n\n"));

    out.push_str(&format!("All Plays by {}\n", detail.member));
    let mut plays = new_table(vec![
        "Date", "Play", "Odds", "Result", "Units Risked", "Units Won", "Net",
    ]);
    for line in &detail.plays {
        plays.add_row(vec![
            line.record.date.format(DATE_FORMAT).to_string(),
            line.record.play.clone(),
            line.record.odds.clone(),
            line.record.result.to_string(),
            format_units(line.record.units_out),
            format_units(line.record.units_in),
            format_signed(line.net_units),
        ]);
    }
    out.push_str(&plays.to_string());

    out
}
