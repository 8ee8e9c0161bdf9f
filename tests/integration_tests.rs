use std::fs;
use std::path::{Path, PathBuf};

use survey_aggregator::aggregator::aggregate::aggregate_table;
use survey_aggregator::aggregator::loader::load_combined;
use survey_aggregator::aggregator::pipeline::run;
use survey_aggregator::aggregator::scores::Category;
use survey_aggregator::config::{AggregatorConfig, ColumnNames};
use survey_aggregator::error::AggregateError;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/surveys")
}

fn config(input_dir: &Path, output_path: &Path) -> AggregatorConfig {
    AggregatorConfig {
        input_dir: input_dir.to_path_buf(),
        output_path: output_path.to_path_buf(),
        columns: ColumnNames::default(),
    }
}

fn read_output(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).expect("output is readable");
    let header = rdr.headers().unwrap().iter().map(String::from).collect();
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

fn cell<'a>(header: &[String], row: &'a [String], column: &str) -> &'a str {
    let idx = header
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("column {column} missing from {header:?}"));
    &row[idx]
}

#[test]
fn test_full_pipeline() {
    let out = tempfile::tempdir().unwrap();
    let output_path = out.path().join("processed_data.csv");

    let summary = run(&config(&fixture_dir(), &output_path)).expect("pipeline runs");

    assert_eq!(summary.files, 2);
    assert_eq!(summary.rows_read, 10);
    assert_eq!(summary.rows_discarded, 4);
    assert_eq!(summary.items, 3);
    assert_eq!(summary.unmapped_importance, 1);

    let (header, rows) = read_output(&output_path);
    assert_eq!(header[0], "#");
    assert_eq!(header[1], "Tip");
    for dropped in ["Importance", "Difficulty of Inference", "Applicable To", "Comments"] {
        assert!(!header.iter().any(|h| h == dropped), "{dropped} should be pruned");
    }
    assert_eq!(
        &header[header.len() - 3..],
        &["Average Importance", "Average Difficulty", "Average Applicability"]
    );

    let ids: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let item1 = &rows[0];
    assert_eq!(cell(&header, item1, "Tip"), "Pin your toolchain");
    assert_eq!(cell(&header, item1, "Important"), "1");
    assert_eq!(cell(&header, item1, "Very important"), "1");
    assert_eq!(cell(&header, item1, "Extremely important"), "0");
    assert_eq!(cell(&header, item1, "Average Importance"), "2.5");
    assert_eq!(cell(&header, item1, "Average Difficulty"), "1.5");
    assert_eq!(cell(&header, item1, "Average Applicability"), "1.25");

    // the typo gets its own count column but no score
    let item2 = &rows[1];
    assert_eq!(cell(&header, item2, "Importnat"), "1");
    assert_eq!(cell(&header, item2, "Important"), "1");
    assert_eq!(cell(&header, item2, "Average Importance"), "2.0");

    // blank difficulty on the second response only
    let item3 = &rows[2];
    assert_eq!(cell(&header, item3, "Average Importance"), "2.5");
    assert_eq!(cell(&header, item3, "Average Difficulty"), "3.0");
    assert_eq!(cell(&header, item3, "Advanced"), "2");
}

#[test]
fn test_two_file_scenario() {
    let input = tempfile::tempdir().unwrap();
    let headers = "#,Importance,Difficulty of Inference,Applicable To,Comments\n";
    fs::write(
        input.path().join("first.csv"),
        format!("{headers}1,Important,,,\n2,Important,,,\n"),
    )
    .unwrap();
    fs::write(
        input.path().join("second.csv"),
        format!("{headers}1,Very important,,,\n"),
    )
    .unwrap();

    let (_, table) = load_combined(input.path()).unwrap();
    let aggregate = aggregate_table(table, &ColumnNames::default()).unwrap();

    let item1 = aggregate.item("1").unwrap();
    assert_eq!(item1.count(Category::Importance, "Important"), 1);
    assert_eq!(item1.count(Category::Importance, "Very important"), 1);
    assert_eq!(item1.average(Category::Importance), Some(2.5));

    let item2 = aggregate.item("2").unwrap();
    assert_eq!(item2.count(Category::Importance, "Important"), 1);
    assert_eq!(item2.count(Category::Importance, "Very important"), 0);
    assert_eq!(item2.average(Category::Importance), Some(2.0));
    assert_eq!(item2.average(Category::Difficulty), None);
}

#[test]
fn test_section_rows_never_become_items() {
    let (_, table) = load_combined(&fixture_dir()).unwrap();
    let aggregate = aggregate_table(table, &ColumnNames::default()).unwrap();

    assert!(aggregate.item("Section A: Tooling").is_none());
    for item in aggregate.items() {
        assert!(item.item().as_str().bytes().all(|b| b.is_ascii_digit()));
    }
}

#[test]
fn test_vote_totals_match_response_rows() {
    let (_, table) = load_combined(&fixture_dir()).unwrap();
    let aggregate = aggregate_table(table, &ColumnNames::default()).unwrap();

    let item1 = aggregate.item("1").unwrap();
    for category in Category::ALL {
        assert_eq!(item1.total_votes(category), 2);
    }
    assert_eq!(aggregate.item("3").unwrap().total_votes(Category::Difficulty), 1);
}

#[test]
fn test_rerun_is_byte_identical() {
    let out = tempfile::tempdir().unwrap();
    let first = out.path().join("first.csv");
    let second = out.path().join("second.csv");

    run(&config(&fixture_dir(), &first)).unwrap();
    run(&config(&fixture_dir(), &second)).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_localized_column_names() {
    let input = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("encuesta.csv"),
        "#,Consejo,Importancia,Dificultad de Deducción,Aplicable a,Comentarios\n\
         Sección 1,,,,,\n\
         7,Usa clippy,Very important,Easy to infer,Both,bien\n",
    )
    .unwrap();
    let columns_file = input.path().join("columns.json");
    fs::write(
        &columns_file,
        r#"{"importance": "Importancia", "difficulty": "Dificultad de Deducción",
            "applicability": "Aplicable a", "comments": "Comentarios"}"#,
    )
    .unwrap();

    let out = tempfile::tempdir().unwrap();
    let output_path = out.path().join("datos_procesados.csv");
    let mut cfg = config(input.path(), &output_path);
    cfg.columns = ColumnNames::load(&columns_file).unwrap();

    run(&cfg).unwrap();

    let (header, rows) = read_output(&output_path);
    assert_eq!(header[..2], ["#", "Consejo"]);
    assert!(!header.iter().any(|h| h == "Comentarios"));
    assert_eq!(rows.len(), 1);
    assert_eq!(cell(&header, &rows[0], "Average Applicability"), "1.5");
}

#[test]
fn test_missing_input_dir_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let output_path = out.path().join("processed_data.csv");

    let err = run(&config(Path::new("/no/such/surveys"), &output_path)).unwrap_err();

    assert!(matches!(err, AggregateError::InputDirMissing(_)));
    assert!(!output_path.exists());
}

#[test]
fn test_missing_id_column_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("bad.csv"),
        "Item,Importance,Difficulty of Inference,Applicable To\n1,Important,,\n",
    )
    .unwrap();
    let out = tempfile::tempdir().unwrap();
    let output_path = out.path().join("processed_data.csv");

    let err = run(&config(input.path(), &output_path)).unwrap_err();

    assert!(matches!(err, AggregateError::MissingColumn(ref c) if c == "#"));
    assert!(!output_path.exists());
}

#[test]
fn test_empty_survey_file_aborts_run() {
    let input = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("a.csv"),
        "#,Importance,Difficulty of Inference,Applicable To\n1,Important,,\n",
    )
    .unwrap();
    fs::write(input.path().join("b.csv"), "").unwrap();
    let out = tempfile::tempdir().unwrap();
    let output_path = out.path().join("processed_data.csv");

    let err = run(&config(input.path(), &output_path)).unwrap_err();

    assert!(matches!(err, AggregateError::EmptyFile(_)));
    assert!(!output_path.exists());
}

#[test]
fn test_trailing_blank_headers_are_passed_through() {
    let input = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("export.csv"),
        "#,Importance,Difficulty of Inference,Applicable To,,\n\
         1,Important,,,first,second\n",
    )
    .unwrap();
    let out = tempfile::tempdir().unwrap();
    let output_path = out.path().join("processed_data.csv");

    run(&config(input.path(), &output_path)).unwrap();

    let (header, rows) = read_output(&output_path);
    assert_eq!(header[..3], ["#", "Unnamed: 4", "Unnamed: 5"]);
    assert_eq!(cell(&header, &rows[0], "Unnamed: 4"), "first");
    assert_eq!(cell(&header, &rows[0], "Unnamed: 5"), "second");
    assert_eq!(cell(&header, &rows[0], "Important"), "1");
}
