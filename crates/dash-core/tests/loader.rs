// File: crates/dash-core/tests/loader.rs
// Purpose: Directory loader over a temp dataset, including failure modes.

use std::fs;
use std::path::PathBuf;

use dash_core::data::{self, load_dir, LoadError};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dash-core-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_fixture(dir: &PathBuf) {
    fs::write(
        dir.join(data::STATE_SHAPES_FILE),
        r#"[{"id":"Texas","outline":[[0,0],[1,0],[1,1]]},{"id":"Ohio","outline":[[2,2],[3,2],[3,3]]}]"#,
    )
    .unwrap();
    fs::write(
        dir.join(data::STATE_DEATHS_FILE),
        r#"[{"id":"Ohio","years":[{"year":"2014","death_rate":"24.6","deaths":2744,"population":11594163}]},
            {"id":"Texas","years":[{"year":2014,"death_rate":9.7}]}]"#,
    )
    .unwrap();
    fs::write(
        dir.join(data::STATE_INCOME_FILE),
        r#"[{"id":"Ohio","years":[{"year":2014,"median_income":"49308"}]},
            {"id":"Texas","years":[{"year":2014,"median_income":53035}]}]"#,
    )
    .unwrap();
    fs::write(
        dir.join(data::STATE_UNEMPLOYMENT_FILE),
        r#"[{"id":"Ohio","years":[{"year":2014,"unemployment":5.7}]},
            {"id":"Texas","years":[{"year":2014,"unemployment":5.1}]}]"#,
    )
    .unwrap();
    fs::write(
        dir.join(data::DRUG_HIERARCHY_FILE),
        r#"{"name":"drugs","years":[2003,2004],"children":[
            {"name":"Opioids","children":[{"name":"Heroin","size":[10,20]}]},
            {"name":"Stimulants","children":[{"name":"Cocaine","size":[5,4]}]}]}"#,
    )
    .unwrap();
    fs::write(dir.join(data::DRUG_SERIES_FILE), "date,Heroin,Cocaine\n2004,20,\n2003-01-01,10,5\n").unwrap();
}

#[test]
fn loads_a_complete_directory() {
    let dir = temp_dir("ok");
    write_fixture(&dir);
    let ds = load_dir(&dir).expect("fixture loads");

    assert_eq!(ds.state_count(), 2);
    assert_eq!(ds.shapes[0].id, "Ohio");
    assert_eq!(ds.deaths[0].years[0].year, 2014);
    assert_eq!(ds.deaths[0].years[0].death_rate, 24.6);
    assert_eq!(ds.deaths[1].years[0].population, 0.0);
    assert_eq!(ds.income[0].years[0].median_income, 49308.0);
    assert_eq!(ds.tree.series_len(), 2);

    assert_eq!(ds.drugs.substances, vec!["Heroin", "Cocaine"]);
    assert_eq!(data::row_year(&ds.drugs.rows[0]), 2003);
    assert_eq!(ds.drugs.rows[1].values, vec![20.0, 0.0]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn misaligned_states_are_rejected() {
    let dir = temp_dir("misaligned");
    write_fixture(&dir);
    fs::write(
        dir.join(data::STATE_UNEMPLOYMENT_FILE),
        r#"[{"id":"Texas","years":[]},{"id":"Ohio","years":[]}]"#,
    )
    .unwrap();
    let err = load_dir(&dir).unwrap_err();
    assert!(matches!(err, LoadError::Misaligned { index: 0, .. }), "{err}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_and_bad_values_fail_the_load() {
    let dir = temp_dir("bad");
    write_fixture(&dir);
    fs::remove_file(dir.join(data::DRUG_SERIES_FILE)).unwrap();
    assert!(matches!(load_dir(&dir), Err(LoadError::Csv { .. })));

    write_fixture(&dir);
    fs::write(dir.join(data::STATE_INCOME_FILE), r#"[{"id":"Ohio","years":[{"year":2014,"median_income":"n/a"}]}]"#)
        .unwrap();
    assert!(matches!(load_dir(&dir), Err(LoadError::Number { .. })));

    write_fixture(&dir);
    fs::write(dir.join(data::DRUG_SERIES_FILE), "date,Heroin\nlast year,1\n").unwrap();
    assert!(matches!(load_dir(&dir), Err(LoadError::Date { .. })));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn dates_accept_iso_or_bare_year() {
    assert_eq!(data::parse_date("2010").map(|d| d.to_string()), Some("2010-01-01".into()));
    assert_eq!(data::parse_date(" 2011-06-30 ").map(|d| d.to_string()), Some("2011-06-30".into()));
    assert!(data::parse_date("June").is_none());
}
