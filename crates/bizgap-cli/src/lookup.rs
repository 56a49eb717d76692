use bizgap_core::{build_overpass_query, Coordinate};

use crate::{cli_radius, Context};

pub(crate) fn print_query(lat: f64, lon: f64, radius: u32) -> anyhow::Result<()> {
    let center = Coordinate::new(lat, lon)?;
    let radius = cli_radius(radius)?;
    print!("{}", build_overpass_query(center, radius));
    Ok(())
}

pub(crate) async fn geocode(ctx: &Context, query: &str, limit: Option<u32>) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(ctx.geocode_limit).max(1);
    let candidates = ctx.nominatim.search(query, limit).await?;

    if candidates.is_empty() {
        println!("No places match '{query}'.");
        return Ok(());
    }

    for candidate in &candidates {
        println!(
            "{:>12}  {:>11}, {:>12}  {}",
            candidate.place_id, candidate.lat, candidate.lon, candidate.display_name
        );
    }
    Ok(())
}
