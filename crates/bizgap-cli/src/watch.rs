//! Continuous analysis of location picks read line by line.
//!
//! Each pick starts a request immediately, without waiting for earlier ones.
//! Results are displayed only when they are newer than the last one shown;
//! anything that completes after a later pick has already been shown is
//! dropped.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context as _;
use bizgap_core::{AnalysisReport, Coordinate, ResponseSequencer, SearchRadius, Ticket};
use bizgap_osm::OsmError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::analyze::render_report;
use crate::{cli_radius, Context};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Pick {
    pub center: Coordinate,
    pub radius: SearchRadius,
}

/// Parses `lat,lon` or `lat,lon,radius` (commas and/or whitespace).
pub(crate) fn parse_pick(line: &str, default_radius: SearchRadius) -> anyhow::Result<Pick> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    let (lat, lon, radius) = match fields.as_slice() {
        [lat, lon] => (lat, lon, None),
        [lat, lon, radius] => (lat, lon, Some(radius)),
        _ => anyhow::bail!("expected 'lat,lon' or 'lat,lon,radius'"),
    };

    let lat: f64 = lat.parse().with_context(|| format!("invalid latitude '{lat}'"))?;
    let lon: f64 = lon.parse().with_context(|| format!("invalid longitude '{lon}'"))?;
    let radius = match radius {
        Some(r) => cli_radius(r.parse().with_context(|| format!("invalid radius '{r}'"))?)?,
        None => default_radius,
    };

    Ok(Pick {
        center: Coordinate::new(lat, lon)?,
        radius,
    })
}

#[derive(Debug, Default)]
pub(crate) struct WatchSummary {
    /// Tickets whose results were displayed, in display order.
    pub displayed: Vec<Ticket>,
    pub discarded: usize,
    pub rejected_lines: usize,
}

pub(crate) async fn run_stdin(ctx: &Context, radius: u32) -> anyhow::Result<()> {
    let default_radius = cli_radius(radius)?;
    let overpass = Arc::clone(&ctx.overpass);
    let thresholds = Arc::clone(&ctx.thresholds);

    let analyze = move |center: Coordinate, radius: SearchRadius| {
        let overpass = Arc::clone(&overpass);
        let thresholds = Arc::clone(&thresholds);
        async move {
            let data = overpass.elements_around(center, radius).await?;
            Ok::<_, OsmError>(AnalysisReport::build(&data.elements, &thresholds))
        }
    };

    let summary = run(
        BufReader::new(tokio::io::stdin()),
        default_radius,
        analyze,
        |pick, result| match result {
            Ok(report) => print!(
                "{}",
                render_report(&pick.center.to_string(), pick.radius.metres(), report)
            ),
            Err(e) => eprintln!("Failed to fetch business data for {}: {e}", pick.center),
        },
    )
    .await?;

    tracing::info!(
        displayed = summary.displayed.len(),
        discarded = summary.discarded,
        rejected_lines = summary.rejected_lines,
        "watch finished"
    );
    Ok(())
}

/// Drives the read → request → display loop until `input` ends and every
/// in-flight request has settled.
pub(crate) async fn run<R, F, Fut, D>(
    input: R,
    default_radius: SearchRadius,
    analyze: F,
    mut display: D,
) -> anyhow::Result<WatchSummary>
where
    R: AsyncBufRead + Unpin,
    F: Fn(Coordinate, SearchRadius) -> Fut,
    Fut: Future<Output = Result<AnalysisReport, OsmError>> + Send + 'static,
    D: FnMut(&Pick, &Result<AnalysisReport, OsmError>),
{
    let sequencer = ResponseSequencer::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<(Ticket, Pick, Result<AnalysisReport, OsmError>)>();
    let mut tx = Some(tx);
    let mut lines = input.lines();
    let mut summary = WatchSummary::default();

    loop {
        tokio::select! {
            line = lines.next_line(), if tx.is_some() => {
                let Some(line) = line? else {
                    // Input closed; let the channel close once in-flight requests finish.
                    tx = None;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_pick(&line, default_radius) {
                    Ok(pick) => {
                        let ticket = sequencer.issue();
                        tracing::debug!(ticket = ticket.get(), center = %pick.center, "request started");
                        let request = analyze(pick.center, pick.radius);
                        if let Some(tx) = tx.clone() {
                            tokio::spawn(async move {
                                // The receiver only goes away when the loop has ended.
                                let _ = tx.send((ticket, pick, request.await));
                            });
                        }
                    }
                    Err(e) => {
                        summary.rejected_lines += 1;
                        tracing::warn!(line = %line, error = %e, "ignoring unparseable location");
                    }
                }
            }
            Some((ticket, pick, result)) = rx.recv() => {
                if sequencer.accept(ticket) {
                    display(&pick, &result);
                    summary.displayed.push(ticket);
                } else {
                    tracing::debug!(ticket = ticket.get(), "discarding stale response");
                    summary.discarded += 1;
                }
            }
            else => break,
        }
    }

    Ok(summary)
}
