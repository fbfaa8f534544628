//! Distance attachment and the textual result listing.

use crate::distance::{haversine_km, round_km};
use crate::location::types::Coordinate;
use crate::places::PlaceResult;
use serde::Serialize;

const GENERIC_SPECIALTY: &str = "doctors";
const FOLLOW_UP_PROMPT: &str = "Do you want directions, phone number, or another specialty?";

/// A place paired with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub place: PlaceResult,
    pub distance_km: f64,
}

/// Attach the origin distance to each place, keeping the upstream order.
/// Ranking stays whatever the search API decided; nothing is re-sorted
/// by distance or rating here.
pub fn attach_distances(places: Vec<PlaceResult>, origin: Coordinate) -> Vec<RankedResult> {
    places
        .into_iter()
        .map(|place| {
            let distance_km = round_km(haversine_km(origin, place.coordinate));
            RankedResult { place, distance_km }
        })
        .collect()
}

/// Render the numbered listing with header and trailing follow-up prompt.
pub fn render_listing(results: &[RankedResult], specialty: Option<&str>, label: &str) -> String {
    let what = specialty
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(GENERIC_SPECIALTY);

    let mut lines = Vec::with_capacity(results.len() + 4);
    lines.push(format!("Here are the top {} near {}:", what, label));
    lines.push(String::new());

    for (i, entry) in results.iter().enumerate() {
        lines.push(format!(
            "{}. {} \u{2022} {} {} \u{2022} {:.1} km \u{2022} {}",
            i + 1,
            entry.place.name,
            rating_text(entry.place.rating),
            entry.place.reviews,
            entry.distance_km,
            open_text(entry.place.open_now),
        ));
    }

    lines.push(String::new());
    lines.push(FOLLOW_UP_PROMPT.to_string());
    lines.join("\n")
}

fn rating_text(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{:.1}", r),
        None => "No rating".to_string(),
    }
}

fn open_text(open_now: Option<bool>) -> &'static str {
    match open_now {
        Some(true) => "open",
        Some(false) => "closed",
        None => "hours unknown",
    }
}
