use rowcast::testing::*;
use rowcast::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Dimensions {
    width: u16,
    height: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Shipment {
    id: u32,
    carrier: String,
    weight: f64,
    fragile: bool,
    note: String,
    size: Dimensions,
}

fn shipment() -> Shipment {
    Shipment {
        id: 7,
        carrier: "Fast & <Friendly>".into(),
        weight: 12.75,
        fragile: true,
        note: String::new(),
        size: Dimensions {
            width: 40,
            height: 25,
        },
    }
}

#[cfg(feature = "io-binary")]
mod binary {
    use super::*;

    #[test]
    fn orders_round_trip_through_bytes() -> anyhow::Result<()> {
        let orders = sample_orders();
        let bytes = to_binary(&orders)?;
        let back: Vec<Order> = from_binary(&bytes)?;
        assert_eq!(back, orders);
        Ok(())
    }

    #[test]
    fn base64_form_is_plain_text() -> anyhow::Result<()> {
        let text = to_base64(&shipment())?;
        assert!(
            text.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
        );
        let back: Shipment = from_base64(&text)?;
        assert_eq!(back, shipment());

        let padded = format!("  {text}\n");
        let back: Shipment = from_base64(&padded)?;
        assert_eq!(back, shipment());
        Ok(())
    }

    #[test]
    fn truncated_bytes_are_a_format_error() -> anyhow::Result<()> {
        let bytes = to_binary(&shipment())?;
        let err = from_binary::<Shipment>(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, FormatError::Binary(_)));
        Ok(())
    }

    #[test]
    fn invalid_base64_is_reported_as_such() {
        let err = from_base64::<Shipment>("not*base64!").unwrap_err();
        assert!(matches!(err, FormatError::Base64(_)));

        let err = from_base64::<Shipment>("").unwrap_err();
        assert!(matches!(err, FormatError::Binary(_)));
    }

    #[test]
    fn codec_trait_round_trip() -> anyhow::Result<()> {
        let people = sample_people();
        assert_eq!(BinaryCodec.roundtrip(&people)?, people);
        Ok(())
    }
}

#[cfg(feature = "io-xml")]
mod xml {
    use super::*;
    use rowcast::io::xml::to_xml_with_root;

    #[test]
    fn struct_round_trips_through_xml() -> anyhow::Result<()> {
        let xml = to_xml(&shipment())?;
        assert!(xml.starts_with("<Shipment>"));
        assert!(!xml.starts_with("<?xml"));
        let back: Shipment = from_xml(&xml)?;
        assert_eq!(back, shipment());
        Ok(())
    }

    #[test]
    fn empty_elements_are_expanded() -> anyhow::Result<()> {
        let xml = to_xml(&shipment())?;
        assert!(xml.contains("<note></note>"));
        assert!(!xml.contains("<note/>"));
        Ok(())
    }

    #[test]
    fn markup_in_text_is_escaped() -> anyhow::Result<()> {
        let xml = to_xml(&shipment())?;
        assert!(!xml.contains("<Friendly>"));
        assert!(xml.contains("&amp;"));
        Ok(())
    }

    #[test]
    fn explicit_root_element() -> anyhow::Result<()> {
        let xml = to_xml_with_root(&shipment(), "Parcel")?;
        assert!(xml.starts_with("<Parcel>"));
        assert!(xml.ends_with("</Parcel>"));
        let back: Shipment = from_xml(&xml)?;
        assert_eq!(back, shipment());
        Ok(())
    }

    #[test]
    fn malformed_xml_is_a_format_error() {
        let err = from_xml::<Shipment>("<Shipment><id>7</id>").unwrap_err();
        assert!(matches!(err, FormatError::Xml(_)));
    }

    #[test]
    fn codec_trait_round_trip() -> anyhow::Result<()> {
        assert_eq!(XmlCodec.roundtrip(&shipment())?, shipment());
        Ok(())
    }
}

#[test]
fn json_round_trip() -> anyhow::Result<()> {
    let json = to_json(&shipment())?;
    assert!(json.contains(r#""carrier":"Fast & <Friendly>""#));
    let back: Shipment = from_json(&json)?;
    assert_eq!(back, shipment());
    Ok(())
}

#[test]
fn json_rejects_values_without_a_representation() {
    let mut grid = HashMap::new();
    grid.insert((0, 1), "a");
    let err = to_json(&grid).unwrap_err();
    assert!(matches!(err, FormatError::Json(_)));

    let err = from_json::<Shipment>("{\"id\": 7").unwrap_err();
    assert!(matches!(err, FormatError::Json(_)));
}

#[test]
fn deep_clone_is_independent_of_the_source() -> anyhow::Result<()> {
    let original = sample_orders();
    let mut copy = deep_clone(&original)?;
    assert_eq!(copy, original);

    copy[0].customer.push_str(" (renamed)");
    copy.pop();
    assert_eq!(original, sample_orders());
    assert_ne!(copy[0].customer, original[0].customer);
    Ok(())
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    #[serde(skip)]
    token: Option<String>,
}

#[test]
fn deep_clone_drops_what_serde_skips() -> anyhow::Result<()> {
    let session = Session {
        user: "ada".into(),
        token: Some("secret".into()),
    };
    let copy = deep_clone(&session)?;
    assert_eq!(copy.user, "ada");
    assert_eq!(copy.token, None);
    Ok(())
}

#[test]
fn table_round_trips_through_json() -> anyhow::Result<()> {
    let table = to_table(&sample_orders())?;
    assert_eq!(JsonCodec.roundtrip(&table)?, table);
    Ok(())
}

#[test]
fn table_documents_are_checked_against_their_columns() {
    let columns = r#"[{"name":"Id","value_type":"I32"},{"name":"Name","value_type":"Text"}]"#;

    let short = format!(r#"{{"columns":{columns},"rows":[[{{"Text":"x"}}]]}}"#);
    let err = from_json::<Table>(&short).unwrap_err();
    assert!(matches!(err, FormatError::Json(_)));
    assert!(err.to_string().contains("row has 1 cells"));

    let mistyped = format!(r#"{{"columns":{columns},"rows":[[{{"I64":1}},"Null"]]}}"#);
    let err = from_json::<Table>(&mistyped).unwrap_err();
    assert!(err.to_string().contains("column Id expects I32"));
}

#[test]
fn valid_table_documents_still_decode() -> anyhow::Result<()> {
    let doc = r#"{"columns":[{"name":"Id","value_type":"I32"},{"name":"Name","value_type":"Text"}],
        "rows":[[{"I32":1},{"Text":"A"}],[{"I32":2},"Null"]]}"#;
    let table: Table = from_json(doc)?;
    assert_eq!(table, to_table(&sample_people())?);
    let names: Vec<&Value> = table.column_values("Name").unwrap().collect();
    assert_eq!(names, vec![&Value::from("A"), &Value::Null]);
    Ok(())
}
