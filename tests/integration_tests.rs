use std::path::PathBuf;

use bikeshare_explorer::error::ExplorerError;
use bikeshare_explorer::filters::FilterSpec;
use bikeshare_explorer::loader::load_trips;
use bikeshare_explorer::pager::RawDataPager;
use bikeshare_explorer::report::render_report;
use bikeshare_explorer::stats::TripStats;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn spec(city: &str, month: &str, day: &str) -> FilterSpec {
    FilterSpec::from_args(city, month, day).expect("valid filter spec")
}

#[test]
fn test_load_chicago_unfiltered() {
    let table = load_trips(fixture_dir(), &spec("chicago", "all", "all")).unwrap();
    assert_eq!(table.len(), 12);
    assert!(table.has_gender);
    assert!(table.has_birth_year);
}

#[test]
fn test_month_filter_keeps_only_matching_rows() {
    let table = load_trips(fixture_dir(), &spec("chicago", "june", "all")).unwrap();
    assert_eq!(table.len(), 7);
    assert!(table.trips.iter().all(|t| t.month() == 6));
}

#[test]
fn test_day_filter_keeps_only_matching_rows() {
    let table = load_trips(fixture_dir(), &spec("chicago", "all", "monday")).unwrap();
    assert_eq!(table.len(), 4);
    assert!(table.trips.iter().all(|t| t.weekday_index() == 0));
}

#[test]
fn test_combined_month_and_day_filter() {
    let table = load_trips(fixture_dir(), &spec("chicago", "june", "monday")).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table
        .trips
        .iter()
        .all(|t| t.month() == 6 && t.weekday_index() == 0));
}

#[test]
fn test_no_op_filter_load_is_idempotent() {
    let s = spec("chicago", "all", "all");
    let first = load_trips(fixture_dir(), &s).unwrap();
    let second = load_trips(fixture_dir(), &s).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_chicago_end_to_end_report() {
    let table = load_trips(fixture_dir(), &spec("chicago", "all", "all")).unwrap();
    let stats = TripStats::from_table(&table);

    assert_eq!(stats.times.popular_month, Some(6));
    assert_eq!(stats.times.popular_weekday, Some(4)); // Friday
    assert!(stats.times.popular_hour.unwrap() <= 23);
    assert_eq!(stats.times.popular_hour, Some(15));

    assert_eq!(
        stats.stations.popular_start_station.as_deref(),
        Some("Clinton St & Washington Blvd")
    );
    assert_eq!(
        stats.stations.popular_end_station.as_deref(),
        Some("Canal St & Adams St")
    );
    assert_eq!(
        stats.stations.popular_trip.as_deref(),
        Some("Clinton St & Washington Blvd -> Canal St & Adams St")
    );

    assert_eq!(stats.duration.total_secs, 6246.0);
    assert_eq!(stats.duration.mean_secs, Some(520.5));

    assert_eq!(
        stats.users.user_type_counts,
        vec![
            ("Subscriber".to_string(), 8),
            ("Customer".to_string(), 3),
            ("Dependent".to_string(), 1),
        ]
    );
    assert_eq!(
        stats.users.gender_counts,
        vec![("Male".to_string(), 7), ("Female".to_string(), 4)]
    );

    let by = stats.users.birth_year.unwrap();
    assert_eq!(by.earliest, 1959);
    assert_eq!(by.most_recent, 2000);
    assert_eq!(by.most_common, 1992);
}

#[test]
fn test_chicago_report_text() {
    let table = load_trips(fixture_dir(), &spec("chicago", "all", "all")).unwrap();
    let text = render_report(&TripStats::from_table(&table));

    assert!(text.contains("Most common month: June"));
    assert!(text.contains("Most common day of week: Friday"));
    assert!(text.contains("Most common hour of day: 15"));
    assert!(text.contains(
        "Most common trip from start to end stations: \
         Clinton St & Washington Blvd -> Canal St & Adams St"
    ));
    assert!(text.contains("Total travel time: 6246"));
    assert!(!text.contains("not available"));
}

#[test]
fn test_washington_reports_unavailable_fields() {
    let table = load_trips(fixture_dir(), &spec("washington", "all", "all")).unwrap();
    assert_eq!(table.len(), 10);
    assert!(!table.has_gender);
    assert!(!table.has_birth_year);

    let stats = TripStats::from_table(&table);
    let text = render_report(&stats);
    assert!(text.contains("※ Gender column is not available"));
    assert!(text.contains("※ Birth Year column is not available"));
    assert!(!text.contains("Earliest birth year"));
    assert!(stats.users.gender_counts.is_empty());
}

#[test]
fn test_new_york_loads_with_optional_columns() {
    let table = load_trips(fixture_dir(), &spec("new york", "all", "all")).unwrap();
    assert_eq!(table.len(), 3);
    assert!(table.has_gender);
    // Blank optional cells are absent values, not errors.
    assert_eq!(table.trips[2].gender, None);
    assert_eq!(table.trips[2].birth_year, None);
}

#[test]
fn test_empty_filter_result_degrades_to_no_data() {
    // No chicago fixture trips in February.
    let table = load_trips(fixture_dir(), &spec("chicago", "february", "all")).unwrap();
    assert!(table.is_empty());

    let text = render_report(&TripStats::from_table(&table));
    assert_eq!(text.matches("No data for this filter.").count(), 4);
}

#[test]
fn test_report_output_is_deterministic() {
    let table = load_trips(fixture_dir(), &spec("chicago", "all", "all")).unwrap();
    let first = render_report(&TripStats::from_table(&table));
    let second = render_report(&TripStats::from_table(&table));
    assert_eq!(first, second);
}

#[test]
fn test_pagination_over_twelve_and_ten_rows() {
    let twelve = load_trips(fixture_dir(), &spec("chicago", "all", "all")).unwrap();
    let mut pager = RawDataPager::new(&twelve);
    assert_eq!(pager.next_page().unwrap().len(), 5);
    assert_eq!(pager.next_page().unwrap().len(), 5);
    assert_eq!(pager.next_page().unwrap().len(), 2);
    assert!(pager.next_page().is_none());

    let ten = load_trips(fixture_dir(), &spec("washington", "all", "all")).unwrap();
    let mut pager = RawDataPager::new(&ten);
    assert_eq!(pager.next_page().unwrap().len(), 5);
    assert_eq!(pager.next_page().unwrap().len(), 5);
    assert!(pager.next_page().is_none());
}

#[test]
fn test_missing_source_file_is_a_data_source_error() {
    let missing_dir = fixture_dir().join("does_not_exist");
    let err = load_trips(missing_dir, &spec("chicago", "all", "all")).unwrap_err();
    assert!(matches!(err, ExplorerError::DataSource { .. }));
}

#[test]
fn test_invalid_filter_is_rejected_before_any_io() {
    let err = FilterSpec::from_args("springfield", "all", "all").unwrap_err();
    assert!(matches!(err, ExplorerError::InvalidFilter { .. }));
}
