use stations_csv::{export, render_csv, StationsByDistrict};
use std::collections::HashSet;

fn sample() -> (Vec<String>, StationsByDistrict) {
    let districts = ["Jaffna", "Anuradhapura", "Badulla", "Colombo", "Trincomalee"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut stations = StationsByDistrict::new();
    stations.insert(
        "Colombo".into(),
        vec![
            "Fort".into(),
            "Maradana".into(),
            "Wellawatte, South".into(),
            "Wellawatte; South".into(),
            "fort".into(),
            "Fort".into(),
        ],
    );
    stations.insert(
        "Badulla".into(),
        vec!["Ella".into(), "Demodara".into(), "Badulla".into()],
    );
    stations.insert("Jaffna".into(), vec![]);
    stations.insert("Anuradhapura".into(), vec!["Mihintale".into()]);
    (districts, stations)
}

fn data_lines(csv: &str) -> Vec<(&str, &str)> {
    csv.lines()
        .skip(1)
        .map(|line| line.split_once(',').unwrap())
        .collect()
}

#[test]
fn test_first_line_is_header() {
    let (districts, stations) = sample();
    let csv = render_csv(&export(&districts, &stations)).unwrap();
    assert_eq!(csv.lines().next(), Some("District,Station"));
}

#[test]
fn test_every_exported_district_lists_itself() {
    let (districts, stations) = sample();
    let csv = render_csv(&export(&districts, &stations)).unwrap();

    for district in ["Anuradhapura", "Badulla", "Colombo", "Jaffna"] {
        let expected = format!("{},{}", district, district);
        assert!(csv.lines().any(|line| line == expected), "missing {}", expected);
    }
    // listed but no station entry
    assert!(!csv.contains("Trincomalee"));
}

#[test]
fn test_columns_are_non_decreasing() {
    let (districts, stations) = sample();
    let csv = render_csv(&export(&districts, &stations)).unwrap();
    let lines = data_lines(&csv);

    for pair in lines.windows(2) {
        let (d1, s1) = pair[0];
        let (d2, s2) = pair[1];
        assert!(d1 <= d2);
        if d1 == d2 {
            assert!(s1 <= s2);
        }
    }
}

#[test]
fn test_no_duplicate_stations_per_district() {
    let (districts, stations) = sample();
    let csv = render_csv(&export(&districts, &stations)).unwrap();
    let lines = data_lines(&csv);

    let unique: HashSet<(&str, &str)> = lines.iter().copied().collect();
    assert_eq!(unique.len(), lines.len());
    assert!(lines.contains(&("Colombo", "Wellawatte; South")));
    assert!(lines.contains(&("Colombo", "fort")));
}

#[test]
fn test_every_line_has_two_columns_and_no_blank_lines() {
    let (districts, stations) = sample();
    let csv = render_csv(&export(&districts, &stations)).unwrap();

    assert!(csv.ends_with('\n'));
    assert!(!csv.contains("\n\n"));
    assert!(!csv.contains('\r'));
    assert!(csv.lines().all(|line| line.matches(',').count() == 1));
}
