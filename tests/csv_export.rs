use invoice_extract::pipeline::{ExtractionOptions, extract_csv_to_path};
use invoice_extract::types::COLUMNS;

#[test]
fn pipeline_writes_the_nine_column_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output.csv");

    let table = extract_csv_to_path(
        "tests/fixtures/invoices.json",
        "tests/fixtures/expired_invoices.txt",
        &out,
        &ExtractionOptions::default(),
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    assert_eq!(
        rdr.headers().unwrap().iter().collect::<Vec<_>>(),
        COLUMNS.to_vec()
    );

    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), table.row_count());

    // First row by (invoice_id, invoiceitem_id) order: invoice 5 item 6.
    let first = &records[0];
    assert_eq!(&first[0], "5");
    assert_eq!(&first[1], "2023-02-10 00:00:00");
    assert_eq!(&first[2], "6");
    assert_eq!(&first[3], "inspection");
    assert_eq!(&first[4], "Service");
    assert_eq!(&first[5], "60");
    assert_eq!(&first[6], "60");
    assert_eq!(&first[7], "0.6");
    assert_eq!(&first[8], "false");

    // The reference invoice rows render types and flags as labels.
    let material = &records[1];
    assert_eq!(&material[0], "7");
    assert_eq!(&material[3], "");
    assert_eq!(&material[4], "Material");
    assert_eq!(&material[7], "0.8");
    assert_eq!(&material[8], "true");
}

#[test]
fn no_artifact_is_written_when_loading_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output.csv");

    let result = extract_csv_to_path(
        "tests/fixtures/does_not_exist.json",
        "tests/fixtures/expired_invoices.txt",
        &out,
        &ExtractionOptions::default(),
    );

    assert!(result.is_err());
    assert!(!out.exists());
}
