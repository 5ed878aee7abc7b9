//! Plain-text rendering for command output

use std::fmt::Write;

use application::HealthReport;
use domain::air_quality::{AirQualityReport, Breakpoint, BreakpointTable, Pollutant};
use domain::entities::WeatherCard;

/// Multi-line summary of an AQI report
pub fn report(report: &AirQualityReport) -> String {
    let aqi = report.aqi();
    let mut out = format!("AQI {aqi} ({})\n", aqi.category());

    match report.dominant_pollutant() {
        Some(pollutant) => {
            let _ = writeln!(out, "Dominant pollutant: {}", pollutant.display_name());
        },
        None => out.push_str("Dominant pollutant: none\n"),
    }

    for sub in report.sub_indices() {
        let unit = sub.pollutant.classification_unit();
        let _ = writeln!(
            out,
            "  {:<6} {:>9.2} µg/m³ -> {:>9.4} {:<6} AQI {:>3}",
            sub.pollutant.display_name(),
            sub.concentration,
            sub.normalized,
            unit.symbol(),
            sub.aqi,
        );
    }

    if !report.unclassifiable().is_empty() {
        let names: Vec<_> = report
            .unclassifiable()
            .iter()
            .map(|p| p.display_name())
            .collect();
        let _ = writeln!(out, "Unclassifiable: {}", names.join(", "));
    }

    out
}

fn bound(value: f64) -> String {
    if value.is_infinite() {
        "∞".to_string()
    } else {
        format!("{value}")
    }
}

fn row(breakpoint: &Breakpoint) -> String {
    format!(
        "  {:>8} - {:<8} {:>3} - {:<3}",
        bound(breakpoint.c_low),
        bound(breakpoint.c_high),
        breakpoint.i_low,
        breakpoint.i_high,
    )
}

/// Breakpoint listing for one pollutant or the whole table
pub fn breakpoints(table: &BreakpointTable, only: Option<Pollutant>) -> String {
    let mut out = String::new();

    for (pollutant, rows) in table.iter() {
        if only.is_some_and(|p| p != pollutant) {
            continue;
        }
        let _ = writeln!(
            out,
            "{} ({})",
            pollutant.display_name(),
            pollutant.classification_unit().symbol()
        );
        for breakpoint in rows {
            out.push_str(&row(breakpoint));
            out.push('\n');
        }
    }

    out
}

/// Weather card block, with the city's wall clock when known
pub fn card(card: &WeatherCard, local_time: Option<&str>) -> String {
    let mut out = match local_time {
        Some(time) => format!("{} ({time})\n", card.name),
        None => format!("{}\n", card.name),
    };

    let dominant = card
        .dominant_pollutant
        .map(|p| format!(", {}", p.display_name()))
        .unwrap_or_default();
    let _ = writeln!(out, "  Feels like {}°  UV {}", card.temperature, card.uv);
    let _ = writeln!(out, "  AQI {} ({}{dominant})", card.aqi, card.aqi.category());
    let _ = writeln!(
        out,
        "  Next hour {}  UV {}",
        card.next_temperature_label(),
        card.next_uv_label()
    );
    if !card.icon.is_empty() {
        let _ = writeln!(out, "  Icon {}", card.icon);
    }

    out
}

/// One line per provider, then the overall verdict
pub fn health(report: &HealthReport) -> String {
    let mut out = String::new();
    for (name, status) in &report.services {
        let state = if status.healthy { "ok" } else { "down" };
        let _ = write!(out, "{name:<12} {state}");
        if let Some(ms) = status.response_time_ms {
            let _ = write!(out, " ({ms} ms)");
        }
        if let Some(error) = &status.error {
            let _ = write!(out, ": {error}");
        }
        out.push('\n');
    }
    let overall = if report.healthy { "healthy" } else { "degraded" };
    let _ = writeln!(out, "Overall: {overall}");
    out
}
