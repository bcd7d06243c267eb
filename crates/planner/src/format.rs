//! Display strings for the read models.

use shared::protocol::{RowCategory, TimeRange};

pub fn time_range(range: &TimeRange) -> String {
    format!(
        "{} - {}",
        range.start.format("%H:%M"),
        range.end.format("%H:%M")
    )
}

pub fn duration(minutes: u32) -> String {
    format!("{minutes} min")
}

pub fn category(category: &RowCategory) -> String {
    match category {
        RowCategory::Restaurant => "Restaurant".to_string(),
        RowCategory::Attraction(place) => place.to_string(),
    }
}

/// `945` -> `"15h 45m"`
pub fn hours_and_minutes(total_minutes: u32) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

/// `5` -> `"5h ago"`, `48` -> `"2d ago"`
pub fn posted_ago(hours: u32) -> String {
    if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}
