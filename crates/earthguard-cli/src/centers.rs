use std::fmt::Write as _;

use clap::Args;
use earthguard_core::{directions_url, AppConfig, Coordinates, Directory, DirectoryQuery, FacilityRecord, SortKey};

#[derive(Debug, Args)]
pub struct CentersArgs {
    /// Waste category tag, or "all"
    #[arg(long, default_value = "all")]
    pub category: String,
    /// Case-insensitive text matched against name, address and materials
    #[arg(long, default_value = "")]
    pub search: String,
    /// distance, rating or name
    #[arg(long, default_value = "distance")]
    pub sort: SortKey,
    /// Your latitude; distances are recomputed when given with --lng
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    /// Your longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,
    /// Print a Google Maps directions link under each center
    #[arg(long)]
    pub directions: bool,
}

impl CentersArgs {
    fn origin(&self) -> anyhow::Result<Option<Coordinates>> {
        let origin = self
            .lat
            .zip(self.lng)
            .map(|(lat, lng)| Coordinates::new(lat, lng))
            .transpose()?;
        Ok(origin)
    }
}

/// Print the directory query result as a table.
///
/// # Errors
///
/// Returns an error if the position is out of range or the facility
/// directory cannot be loaded.
pub(crate) fn run_centers(config: &AppConfig, args: &CentersArgs) -> anyhow::Result<()> {
    let origin = args.origin()?;
    let directory = Directory::from_config(config)?.relocated(origin);
    let query = DirectoryQuery::new(args.category.as_str(), args.search.as_str(), args.sort);
    let results = directory.query(&query);

    print!("{}", render_centers(&results, args.directions));
    Ok(())
}

pub(crate) fn render_centers(centers: &[&FacilityRecord], directions: bool) -> String {
    if centers.is_empty() {
        return "no recycling centers match your filters; try a different category or search\n"
            .to_string();
    }

    let mut out = format!(
        "{:<34}{:>8}{:>10}  CATEGORIES\n",
        "NAME", "RATING", "DISTANCE"
    );
    for center in centers {
        let categories: Vec<&str> = center
            .accepted_categories
            .iter()
            .map(|c| c.display_name())
            .collect();
        let _ = writeln!(
            out,
            "{:<34}{:>8}{:>10}  {}",
            center.name,
            format!("{:.1} ({})", center.rating, center.review_count),
            format!("{:.1} km", center.distance_km),
            categories.join(", ")
        );
        if directions {
            let _ = writeln!(out, "    {}", directions_url(center));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use earthguard_core::builtin_facilities;

    use super::*;

    fn args_at(lat: f64, lng: f64) -> CentersArgs {
        CentersArgs {
            category: "all".to_string(),
            search: String::new(),
            sort: SortKey::Distance,
            lat: Some(lat),
            lng: Some(lng),
            directions: false,
        }
    }

    #[test]
    fn origin_rejects_invalid_position() {
        assert!(args_at(19.99, 73.75).origin().unwrap().is_some());

        let err = args_at(1000.0, 5000.0).origin().unwrap_err();
        assert!(err.to_string().contains("invalid position"));
        assert!(args_at(f64::NAN, 0.0).origin().is_err());
    }

    #[test]
    fn empty_result_prints_explicit_state() {
        let out = render_centers(&[], false);
        assert!(out.starts_with("no recycling centers match"));
    }

    #[test]
    fn table_lists_centers_in_given_order_with_directions() {
        let records = builtin_facilities().unwrap();
        let directory = Directory::new(records);
        let results = directory.query(&DirectoryQuery::new("electronics", "", SortKey::Rating));

        let out = render_centers(&results, true);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("TechRecycle Hub"));
        assert!(lines[2].trim_start().starts_with("https://www.google.com/maps/dir/"));
        assert!(lines[3].starts_with("Green Valley Recycling Center"));
    }
}
