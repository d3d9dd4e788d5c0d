use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};
use model::{
    DataType, Entity, EntityType, EntityView, EnumMember, EnumType, Field, Value, ValueType,
};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending = 0,
    Active = 1,
    Closed = 2,
}

impl Status {
    pub fn enum_type() -> EnumType {
        EnumType::new(
            "Status",
            vec![
                EnumMember::new("Pending", 0),
                EnumMember::new("Active", 1),
                EnumMember::new("Closed", 2),
            ],
        )
    }
}

#[derive(Debug, Clone)]
pub struct Address {
    pub city: String,
    pub zip: Option<String>,
}

impl EntityView for Address {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        Some(match name {
            "city" => Field::value(self.city.as_str()),
            "zip" => Field::value(self.zip.clone()),
            _ => return None,
        })
    }
}

impl Entity for Address {
    fn entity_type() -> EntityType {
        EntityType::new("Address")
            .with_field("city", ValueType::scalar(DataType::String))
            .with_field("zip", ValueType::nullable(DataType::String))
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub total: BigDecimal,
    pub lines: Vec<i64>,
}

impl EntityView for Order {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        Some(match name {
            "id" => Field::value(self.id),
            "total" => Field::value(self.total.clone()),
            "lines" => Field::scalars(self.lines.iter().copied()),
            _ => return None,
        })
    }
}

impl Entity for Order {
    fn entity_type() -> EntityType {
        EntityType::new("Order")
            .with_field("id", ValueType::scalar(DataType::Guid))
            .with_field("total", ValueType::scalar(DataType::Decimal))
            .with_field("lines", ValueType::list(ValueType::scalar(DataType::Integer)))
    }
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: Uuid,
    pub number: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: i64,
    pub rank: Option<i64>,
    pub score: f64,
    pub balance: BigDecimal,
    pub active: bool,
    pub joined: DateTime<Utc>,
    pub status: Status,
    pub tags: Vec<String>,
    pub address: Option<Address>,
    pub orders: Vec<Order>,
}

impl EntityView for Person {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        Some(match name {
            "id" => Field::value(self.id),
            "number" => Field::value(self.number),
            "name" => Field::value(self.name.as_str()),
            "email" => Field::value(self.email.clone()),
            "age" => Field::value(self.age),
            "rank" => Field::value(self.rank),
            "score" => Field::value(self.score),
            "balance" => Field::value(self.balance.clone()),
            "active" => Field::value(self.active),
            "joined" => Field::value(self.joined),
            "status" => Field::value(Value::Enum(self.status as i64)),
            "tags" => Field::scalars(self.tags.iter().map(String::as_str)),
            "address" => Field::optional_entity(self.address.as_ref()),
            "orders" => Field::entities(&self.orders),
            _ => return None,
        })
    }
}

impl Entity for Person {
    fn entity_type() -> EntityType {
        EntityType::new("Person")
            .with_field("id", ValueType::scalar(DataType::Guid))
            .with_field("number", ValueType::scalar(DataType::Integer))
            .with_field("name", ValueType::scalar(DataType::String))
            .with_field("email", ValueType::nullable(DataType::String))
            .with_field("age", ValueType::scalar(DataType::Integer))
            .with_field("rank", ValueType::nullable(DataType::Integer))
            .with_field("score", ValueType::scalar(DataType::Double))
            .with_field("balance", ValueType::scalar(DataType::Decimal))
            .with_field("active", ValueType::scalar(DataType::Boolean))
            .with_field("joined", ValueType::scalar(DataType::DateTime))
            .with_field("status", ValueType::enumeration(Status::enum_type()))
            .with_field("tags", ValueType::list(ValueType::scalar(DataType::String)))
            .with_field("address", ValueType::entity(Address::entity_type()))
            .with_field("orders", ValueType::list(ValueType::entity(Order::entity_type())))
    }
}

impl Person {
    pub fn new(number: i64, name: &str, age: i64) -> Self {
        Person {
            id: Uuid::new_v4(),
            number,
            name: name.to_string(),
            email: None,
            age,
            rank: None,
            score: 0.0,
            balance: BigDecimal::from(0),
            active: true,
            joined: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            status: Status::Active,
            tags: Vec::new(),
            address: None,
            orders: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_address(mut self, city: &str) -> Self {
        self.address = Some(Address {
            city: city.to_string(),
            zip: None,
        });
        self
    }

    pub fn with_order(mut self, total: &str, lines: &[i64]) -> Self {
        self.orders.push(Order {
            id: Uuid::new_v4(),
            total: BigDecimal::from_str(total).unwrap(),
            lines: lines.to_vec(),
        });
        self
    }
}

/// A small population covering empty collections, missing nested entities
/// and null members.
pub fn people() -> Vec<Person> {
    let mut ada = Person::new(1, "Ada", 36)
        .with_tags(&["a", "b"])
        .with_email("ada@example.com")
        .with_address("London")
        .with_order("120.50", &[1, 2])
        .with_order("10", &[3]);
    ada.rank = Some(1);
    ada.score = 9.5;
    ada.balance = BigDecimal::from_str("1500.25").unwrap();
    ada.joined = Utc.with_ymd_and_hms(2019, 5, 17, 9, 30, 0).unwrap();

    let mut bob = Person::new(2, "Bob", 17).with_tags(&["b"]).with_address("Paris");
    bob.score = 4.0;
    bob.status = Status::Pending;

    let mut cy = Person::new(3, "Cyabby", 25).with_tags(&["a", "c"]);
    cy.active = false;
    cy.status = Status::Closed;
    cy.joined = Utc.with_ymd_and_hms(2023, 11, 2, 18, 0, 0).unwrap();

    let dee = Person::new(4, "Dee", 18).with_order("5.00", &[]);

    vec![ada, bob, cy, dee]
}
