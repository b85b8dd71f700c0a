//! Plain-text rendering of the dashboard views.

use std::fmt::Write as _;

use incident_map_analytics::dashboard::DashboardPage;
use incident_map_analytics::format::{format_count, format_smart_percent};
use incident_map_analytics_models::AggregatedStat;
use incident_map_geography_models::{FIT_PADDING_PX, MAX_FIT_ZOOM, StateFilter, Viewport};
use incident_map_incident_models::RaceCode;

/// Renders the race distribution as an aligned table.
#[must_use]
pub fn stats_table(stats: &[AggregatedStat], state: &StateFilter) -> String {
    let total: u64 = stats.iter().map(|s| s.count).sum();
    let mut out = format!(
        "Race distribution: {} ({} incidents)\n",
        state.display_name(),
        format_count(total)
    );

    if stats.is_empty() {
        out.push_str("  no incidents\n");
        return out;
    }

    for stat in stats {
        let color = RaceCode::all()
            .iter()
            .find(|code| code.label() == stat.label)
            .map_or(RaceCode::Unknown.color(), |code| code.color());
        writeln!(
            out,
            "  {:<16} {:>8} {:>7}%  {color}",
            stat.label,
            format_count(stat.count),
            format_smart_percent(stat.percentage),
        )
        .unwrap();
    }

    out
}

/// Renders one table page with a `page/count` footer.
#[must_use]
pub fn page_table(page: &DashboardPage, total_results: usize) -> String {
    let mut out = format!(
        "{:<28} {:<20} {:<5} {:<16} {:<16} {}\n",
        "NAME", "CITY", "STATE", "RACE", "ARMED", "BODY CAM"
    );
    out.push_str(&"-".repeat(96));
    out.push('\n');

    if page.items.is_empty() {
        out.push_str("No incidents found.\n");
    }

    for record in &page.items {
        writeln!(
            out,
            "{:<28} {:<20} {:<5} {:<16} {:<16} {}",
            truncate(record.display_name(), 28),
            truncate(record.display_city(), 20),
            record.state.as_deref().unwrap_or("-"),
            record.race_code().label(),
            truncate(record.display_armed(), 16),
            record.body_camera_label(),
        )
        .unwrap();
    }

    write!(
        out,
        "\nPage {}/{} ({} results)",
        page.window.page_index,
        page.window.display_page_count(),
        format_count(total_results as u64),
    )
    .unwrap();

    out
}

/// Renders the map viewport.
#[must_use]
pub fn viewport_summary(viewport: &Viewport) -> String {
    match viewport {
        Viewport::Bounds(bbox) => {
            let center = bbox.center();
            format!(
                "Fit bounds: south {:.4}, west {:.4}, north {:.4}, east {:.4} \
                 centered on {:.4}, {:.4} (padding {FIT_PADDING_PX}px, max zoom {MAX_FIT_ZOOM})",
                bbox.south, bbox.west, bbox.north, bbox.east, center.lat, center.lng
            )
        }
        Viewport::Fallback { center, zoom } => format!(
            "No valid coordinates: centering on {:.1}, {:.1} at zoom {zoom}",
            center.lat, center.lng
        ),
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
