#![cfg(feature = "io-csv")]

use rowcast::io::csv::{format_value, write_csv_to};
use rowcast::testing::*;
use rowcast::*;
use std::fs;

#[test]
fn people_scenario() -> anyhow::Result<()> {
    let csv = to_csv(&sample_people())?;
    assert_eq!(csv, "1,\"A\"\n2,\"\"\n");
    Ok(())
}

#[test]
fn orders_use_the_fixed_dialect() -> anyhow::Result<()> {
    let csv = to_csv(&sample_orders())?;
    assert_csv_lines(
        &csv,
        &[
            r#"1001,"Acme \"Rockets\" Ltd",3,19.5,"true","A","""#,
            r#"1002,"Globex","",5,"false",7,"rush""#,
            r#"1003,"Initech",12,0.25,"true","B","""#,
        ],
    );
    Ok(())
}

#[test]
fn empty_input_writes_nothing() -> anyhow::Result<()> {
    assert_eq!(to_csv(&Vec::<Person>::new())?, "");
    Ok(())
}

#[test]
fn text_is_quoted_even_when_numeric() {
    assert_eq!(format_value(&Value::from("42")), r#""42""#);
    assert_eq!(format_value(&Value::from("")), r#""""#);
    assert_eq!(format_value(&Value::from("a,b")), r#""a,b""#);
}

#[test]
fn quotes_are_backslash_escaped_not_doubled() {
    assert_eq!(
        format_value(&Value::from(r#"He said "hi""#)),
        r#""He said \"hi\"""#
    );
}

#[test]
fn non_text_values_are_bare_only_when_numeric() {
    assert_eq!(format_value(&Value::I8(-3)), "-3");
    assert_eq!(format_value(&Value::U64(u64::MAX)), u64::MAX.to_string());
    assert_eq!(format_value(&Value::F32(2.5)), "2.5");
    assert_eq!(format_value(&Value::Char('9')), "9");
    assert_eq!(format_value(&Value::Char('x')), r#""x""#);
    assert_eq!(format_value(&Value::Bool(false)), r#""false""#);
    assert_eq!(format_value(&Value::Bytes(vec![0xab, 0x01])), r#""ab01""#);
    assert_eq!(format_value(&Value::Bytes(vec![0x12])), "12");
}

#[test]
fn nulls_are_an_empty_quoted_field() {
    assert_eq!(format_value(&Value::Null), r#""""#);
}

#[test]
fn headers_are_quoted_attribute_names() -> anyhow::Result<()> {
    let csv = to_csv_with(&sample_people(), &CsvOptions::default().with_headers(true))?;
    assert_csv_lines(&csv, &[r#""Id","Name""#, r#"1,"A""#, r#"2,"""#]);
    Ok(())
}

#[test]
fn delimiter_and_terminator_are_configurable() -> anyhow::Result<()> {
    let opts = CsvOptions::default()
        .with_delimiter(b';')
        .with_terminator(LineTerminator::CrLf);
    let csv = to_csv_with(&sample_people(), &opts)?;
    assert_eq!(csv, "1;\"A\"\r\n2;\"\"\r\n");
    Ok(())
}

#[test]
fn options_deserialize_with_defaults() -> anyhow::Result<()> {
    let opts: CsvOptions = serde_json::from_str(r#"{"has_headers": true}"#)?;
    assert_eq!(opts, CsvOptions::default().with_headers(true));
    assert_eq!(opts.delimiter, b',');
    assert_eq!(opts.terminator, LineTerminator::Lf);
    Ok(())
}

#[test]
fn failing_attribute_stops_the_writer() {
    let items = vec![Measurement {
        label: "zero".into(),
        numerator: 3,
        denominator: 0,
    }];
    let err = to_csv(&items).unwrap_err();
    assert!(matches!(
        err,
        Error::Mapping(MappingError::AttributeRead { index: 0, .. })
    ));
}

#[test]
fn write_to_any_writer_with_a_private_cache() -> anyhow::Result<()> {
    let cache = DescriptorCache::new();
    let mut buf = Vec::new();
    let written = write_csv_to(&cache, &mut buf, &sample_orders(), &CsvOptions::default())?;
    assert_eq!(written, 3);
    assert_eq!(String::from_utf8(buf)?.lines().count(), 3);
    assert!(cache.contains::<Order>());
    Ok(())
}

#[test]
fn write_file_creates_parent_directories() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("exports").join("daily").join("orders.csv");

    let written = write_csv_file(&path, &sample_orders(), &CsvOptions::default())?;
    assert_eq!(written, 3);

    let contents = fs::read_to_string(&path)?;
    assert_eq!(contents, to_csv(&sample_orders())?);
    Ok(())
}

#[test]
fn write_file_reports_the_path_on_failure() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let err = write_csv_file(dir.path(), &sample_people(), &CsvOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains(&dir.path().display().to_string()));
    Ok(())
}

#[test]
fn records_without_attributes_are_empty_lines() -> anyhow::Result<()> {
    assert_eq!(to_csv(&vec![Opaque, Opaque])?, "\n\n");

    let opts = CsvOptions::default()
        .with_headers(true)
        .with_terminator(LineTerminator::CrLf);
    assert_eq!(to_csv_with(&[Opaque], &opts)?, "\r\n\r\n");
    Ok(())
}
