//! End-to-end tests running each pipeline on files in a temp directory

use std::fs;
use std::path::{Path, PathBuf};

use badgegen::{
    filter_state_parks, generate_county_badges, generate_state_park_badges, run_all, Config,
    DuplicatePolicy, PipelineError, PipelineKind, Predicate, StateParkBadgeOptions,
};
use regex::Regex;
use tempfile::TempDir;

const ALL_PARKS: &str = "\
id,name,locationDesc,active,acres
1,Ohiopyle State Park,US-PA,1,20500
2,Yellowstone,US-WY,1,2219791
3,Cuyahoga Valley State Park,US-OH,0,32572
4,Acadia National Park,US-ME,1,49075
5,Hawk's Nest State Park,US-WV,1,270
6,\"Harpers Ferry, Lower Town State Park\",US-WV,1,3
7,Letchworth state park,US-NY,1,14427
";

const COUNTIES: &str = "\
county,county_ascii,county_full,county_fips,state_id,state_name
Autauga,Autauga,Autauga County,01001,AL,Alabama
Prince George's,Prince Georges,Prince George's County,24033,MD,Maryland
St. Mary's,St. Marys,St. Mary's County,24037,MD,Maryland
";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_filter_state_parks_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(temp_dir.path(), "all_parks.csv", ALL_PARKS);
    let output = temp_dir.path().join("active_state_parks.csv");

    let summary = filter_state_parks(&input, &output, &Predicate::active_state_park()).unwrap();
    assert_eq!(summary.pipeline, PipelineKind::StateParks);
    assert_eq!(summary.records_read, 7);
    assert_eq!(summary.records_written, 3);
    assert_eq!(
        summary.to_string(),
        format!("Found 3 active state parks and saved to {}", output.display())
    );

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.split("\r\n").collect();
    assert_eq!(lines[0], "id,name,locationDesc,active,acres");
    assert_eq!(lines[1], "1,Ohiopyle State Park,US-PA,1,20500");
    assert_eq!(lines[2], "5,Hawk's Nest State Park,US-WV,1,270");
    assert_eq!(lines[3], "6,\"Harpers Ferry, Lower Town State Park\",US-WV,1,3");
    assert_eq!(lines[4], "");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_state_park_badges_from_filtered_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(
        temp_dir.path(),
        "active_state_parks.csv",
        "id,name,locationDesc,active\r\n\
1,Ohiopyle State Park,US-PA,1\r\n\
2,Yellowstone,US-WY,1\r\n\
5,Hawk's Nest State Park,US-WV,1\r\n",
    );
    let output = temp_dir.path().join("insert_state_park_badges.sql");

    let summary = generate_state_park_badges(
        &input,
        &output,
        &StateParkBadgeOptions::default(),
        DuplicatePolicy::Warn,
    )
    .unwrap();
    assert_eq!(summary.records_written, 3);
    assert_eq!(summary.duplicate_ids, 0);

    let sql = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = sql.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "INSERT INTO badges (id, title, description, icon_svg, points) VALUES \
('yellowstone_wy_state_park', 'Yellowstone State Park', \
'completed 2 trails and visited Yellowstone State Park', 'state_park.svg', 0);"
    );
    assert!(lines[2].contains("'Hawk''s Nest State Park'"));
    assert!(lines[2].contains("'completed 2 trails and visited Hawk''s Nest State Park'"));

    let id_pattern = Regex::new(r"VALUES \('([^']*)'").unwrap();
    let shape = Regex::new(r"^[a-z0-9_]+_[a-z]{2}_state_park$").unwrap();
    for line in &lines {
        let id = &id_pattern.captures(line).unwrap()[1];
        assert!(shape.is_match(id), "unexpected id {}", id);
    }
}

#[test]
fn test_county_badges_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(temp_dir.path(), "uscounties.csv", COUNTIES);
    let output = temp_dir.path().join("insert_counties.sql");

    let summary = generate_county_badges(&input, &output, DuplicatePolicy::Warn).unwrap();
    assert_eq!(summary.records_written, 3);

    let sql = fs::read_to_string(&output).unwrap();
    let expected = "INSERT INTO badges (id, title, description, icon_svg) VALUES\n\
('autauga_county_al', 'Autauga County, Alabama', 'Complete 3 trails in Autauga County, Alabama', NULL),\n\
('prince_georges_county_md', 'Prince George''s County, Maryland', 'Complete 3 trails in Prince George''s County, Maryland', NULL),\n\
('st_marys_county_md', 'St. Mary''s County, Maryland', 'Complete 3 trails in St. Mary''s County, Maryland', NULL);\n";
    assert_eq!(sql, expected);
}

#[test]
fn test_reruns_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let parks = write_file(temp_dir.path(), "all_parks.csv", ALL_PARKS);
    let counties = write_file(temp_dir.path(), "uscounties.csv", COUNTIES);
    let filtered = temp_dir.path().join("active.csv");
    let park_sql = temp_dir.path().join("parks.sql");
    let county_sql = temp_dir.path().join("counties.sql");

    let mut runs = Vec::new();
    for _ in 0..2 {
        filter_state_parks(&parks, &filtered, &Predicate::default()).unwrap();
        generate_state_park_badges(
            &filtered,
            &park_sql,
            &StateParkBadgeOptions::default(),
            DuplicatePolicy::Ignore,
        )
        .unwrap();
        generate_county_badges(&counties, &county_sql, DuplicatePolicy::Ignore).unwrap();

        runs.push((
            fs::read(&filtered).unwrap(),
            fs::read(&park_sql).unwrap(),
            fs::read(&county_sql).unwrap(),
        ));
    }

    assert_eq!(runs[0], runs[1]);
}

#[test]
fn test_missing_input_creates_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("missing.csv");
    let output = temp_dir.path().join("out.sql");

    let result = generate_county_badges(&input, &output, DuplicatePolicy::Warn);
    assert!(matches!(result, Err(PipelineError::Io { ref path, .. }) if path == &input));
    assert!(!output.exists());
}

#[test]
fn test_missing_column_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(temp_dir.path(), "uscounties.csv", "county_full,state_name\nAutauga County,Alabama\n");
    let output = temp_dir.path().join("out.sql");

    let result = generate_county_badges(&input, &output, DuplicatePolicy::Warn);
    assert!(matches!(
        result,
        Err(PipelineError::MissingField { ref field, line: 2 }) if field == "state_id"
    ));
}

#[test]
fn test_run_all_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let scripts = temp_dir.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    write_file(&scripts, "all_parks.csv", ALL_PARKS);
    write_file(&scripts, "uscounties.csv", COUNTIES);

    let config_path = write_file(
        temp_dir.path(),
        "badgegen.yaml",
        &format!(
            "scripts_dir: {}\nstate_park_badges:\n  icon: park.svg\n  points: 10\n",
            scripts.display()
        ),
    );
    let config = Config::from_file(&config_path).unwrap();

    let mut reported = Vec::new();
    let summaries = run_all(&config, |s| reported.push(s.pipeline)).unwrap();
    let kinds: Vec<PipelineKind> = summaries.iter().map(|s| s.pipeline).collect();
    assert_eq!(kinds, reported);
    assert_eq!(
        kinds,
        vec![
            PipelineKind::StateParks,
            PipelineKind::StateParkBadges,
            PipelineKind::CountyBadges
        ]
    );
    assert_eq!(summaries[1].records_written, 3);

    let park_sql = fs::read_to_string(scripts.join("insert_state_park_badges.sql")).unwrap();
    assert!(park_sql.contains("'ohiopyle_pa_state_park'"));
    assert!(park_sql.contains("'park.svg', 10);"));
    assert!(scripts.join("insert_counties.sql").exists());
}

#[test]
fn test_run_all_reads_renamed_filter_output() {
    let temp_dir = TempDir::new().unwrap();
    let scripts = temp_dir.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    write_file(&scripts, "all_parks.csv", ALL_PARKS);
    write_file(&scripts, "uscounties.csv", COUNTIES);

    // No active_state_parks.csv exists, so the badges must come from parks_filtered.csv
    let config_path = write_file(
        temp_dir.path(),
        "badgegen.yaml",
        &format!(
            "scripts_dir: {}\nstate_parks:\n  output: parks_filtered.csv\n",
            scripts.display()
        ),
    );
    let config = Config::from_file(&config_path).unwrap();

    let summaries = run_all(&config, |_| {}).unwrap();
    assert_eq!(summaries[1].input, scripts.join("parks_filtered.csv"));
    assert_eq!(summaries[1].records_written, 3);
    assert!(!scripts.join("active_state_parks.csv").exists());

    let park_sql = fs::read_to_string(scripts.join("insert_state_park_badges.sql")).unwrap();
    assert!(park_sql.contains("'ohiopyle_pa_state_park'"));
}

#[test]
fn test_run_all_reports_finished_pipelines_before_failure() {
    let temp_dir = TempDir::new().unwrap();
    let scripts = temp_dir.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    write_file(&scripts, "all_parks.csv", ALL_PARKS);

    let config_path = write_file(
        temp_dir.path(),
        "badgegen.yaml",
        &format!("scripts_dir: {}\n", scripts.display()),
    );
    let config = Config::from_file(&config_path).unwrap();

    // uscounties.csv is missing, so the county pipeline fails last
    let mut reported = Vec::new();
    let result = run_all(&config, |s| reported.push(s.to_string()));

    assert!(matches!(result, Err(PipelineError::Io { .. })));
    assert_eq!(reported.len(), 2);
    assert!(reported[0].starts_with("Found 3 active state parks and saved to"));
    assert!(reported[1].starts_with("SQL script generated safely with 3 active state parks"));
}
