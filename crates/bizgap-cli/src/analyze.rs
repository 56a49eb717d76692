use std::fmt::Write as _;

use anyhow::Context as _;
use bizgap_core::{AnalysisReport, Coordinate};

use crate::{cli_radius, Context};

/// Where to analyze: explicit coordinates or a place name to geocode.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Target {
    Point(Coordinate),
    Place(String),
}

impl Target {
    pub(crate) fn from_args(
        lat: Option<f64>,
        lon: Option<f64>,
        place: Option<String>,
    ) -> anyhow::Result<Self> {
        match (lat, lon, place) {
            (Some(lat), Some(lon), None) => Ok(Self::Point(Coordinate::new(lat, lon)?)),
            (None, None, Some(place)) if !place.trim().is_empty() => Ok(Self::Place(place)),
            _ => anyhow::bail!("provide either --lat and --lon, or a non-empty --place"),
        }
    }
}

pub(crate) async fn run(
    ctx: &Context,
    target: Target,
    radius: u32,
    json: bool,
) -> anyhow::Result<()> {
    let radius = cli_radius(radius)?;

    let (center, label) = match target {
        Target::Point(center) => (center, center.to_string()),
        Target::Place(place) => {
            let best = ctx
                .nominatim
                .search(&place, 1)
                .await
                .context("geocoding lookup failed")?
                .into_iter()
                .next()
                .with_context(|| format!("no places match '{place}'"))?;
            (best.coordinate()?, best.display_name)
        }
    };

    tracing::info!(%center, radius = radius.metres(), "fetching businesses");
    let data = ctx
        .overpass
        .elements_around(center, radius)
        .await
        .context("failed to fetch business data")?;
    let report = AnalysisReport::build(&data.elements, &ctx.thresholds);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&label, radius.metres(), &report));
    }
    Ok(())
}

/// Human-readable report: headline totals, top categories, then suggestions.
pub(crate) fn render_report(label: &str, radius_m: u32, report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis for {label} ({radius_m}m radius)");

    if report.is_empty() {
        let _ = writeln!(out, "No businesses found in this area.");
        return out;
    }

    let _ = writeln!(
        out,
        "Found {} businesses across {} categories",
        report.total_businesses, report.total_categories
    );

    let _ = writeln!(out, "\nTop categories:");
    for total in &report.top_categories {
        let _ = writeln!(out, "  {:<24} {:>5}", total.category, total.count);
    }

    let _ = writeln!(out, "\nOpportunities:");
    for s in &report.suggestions {
        let _ = writeln!(out, "  {:<24} {:>5}  {}", s.category, s.count, s.suggestion);
    }
    out
}
