//! Record types and datasets for tests and examples.

use crate::record;
use crate::record::{Attribute, Record};
use serde::{Deserialize, Serialize};

/// Two-attribute record with a nullable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub id: i32,
    pub name: Option<String>,
}

record!(Person {
    "Id" => id,
    "Name" => name,
});

/// `[{Id: 1, Name: "A"}, {Id: 2, Name: null}]`.
#[must_use]
pub fn sample_people() -> Vec<Person> {
    vec![
        Person {
            id: 1,
            name: Some("A".to_string()),
        },
        Person { id: 2, name: None },
    ]
}

/// A record covering most scalar types, stored in the `Orders` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    pub customer: String,
    pub quantity: Option<i16>,
    pub unit_price: f64,
    pub paid: bool,
    pub grade: char,
    pub note: Option<String>,
}

record!(Order as "Orders" {
    "OrderId" => order_id,
    "Customer" => customer,
    "Quantity" => quantity,
    "UnitPrice" => unit_price,
    "Paid" => paid,
    "Grade" => grade,
    "Note" => note,
});

/// Three orders with a mix of present and missing optional values.
#[must_use]
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            order_id: 1001,
            customer: "Acme \"Rockets\" Ltd".to_string(),
            quantity: Some(3),
            unit_price: 19.5,
            paid: true,
            grade: 'A',
            note: None,
        },
        Order {
            order_id: 1002,
            customer: "Globex".to_string(),
            quantity: None,
            unit_price: 5.0,
            paid: false,
            grade: '7',
            note: Some("rush".to_string()),
        },
        Order {
            order_id: 1003,
            customer: "Initech".to_string(),
            quantity: Some(12),
            unit_price: 0.25,
            paid: true,
            grade: 'B',
            note: Some(String::new()),
        },
    ]
}

/// A record whose `Ratio` attribute is computed and fails when `denominator`
/// is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub label: String,
    pub numerator: i64,
    pub denominator: i64,
}

impl Record for Measurement {
    fn attributes() -> Vec<Attribute<Self>> {
        vec![
            Attribute::field("Label", |m: &Self| &m.label),
            Attribute::computed("Ratio", |m: &Self| {
                if m.denominator == 0 {
                    Err(format!("{} has a zero denominator", m.label))
                } else {
                    Ok(m.numerator as f64 / m.denominator as f64)
                }
            }),
        ]
    }
}

/// A record type that exposes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Opaque;

impl Record for Opaque {
    fn attributes() -> Vec<Attribute<Self>> {
        Vec::new()
    }
}
