use crate::{
    model::EntityModel,
    path::{Record, Related},
    source::{MemorySource, MemoryStore},
    value::Value,
};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// TestRecord
///
/// Hand-built record graph for extraction and predicate tests that do not
/// need a store. Relations map to `None` when unset.
///

#[derive(Clone, Debug, Default)]
pub struct TestRecord {
    pub display: String,
    pub fields: BTreeMap<String, Value>,
    pub relations: BTreeMap<String, Option<Box<Self>>>,
}

impl TestRecord {
    pub fn new(display: &str) -> Self {
        Self {
            display: display.to_string(),
            ..Self::default()
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_related(mut self, name: &str, related: Option<Self>) -> Self {
        self.relations
            .insert(name.to_string(), related.map(Box::new));
        self
    }
}

impl fmt::Display for TestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Record for TestRecord {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn related(&self, name: &str) -> Option<Related<'_>> {
        self.relations.get(name).map(|related| match related {
            Some(record) => Related::Present(&**record),
            None => Related::Absent,
        })
    }
}

///
/// Company fixture
///
/// department(id, name, manager -> employee)
/// employee(id, name, grade, department -> department)
///
/// Engineering (1) and Sales (2) each have staff; Legal (3) has none and no
/// manager. Carol has no department.
///

pub fn company_store() -> Arc<MemoryStore> {
    let mut store = MemoryStore::new();

    store
        .register(
            EntityModel::new("department", "id")
                .field("name")
                .relation("manager", "employee"),
        )
        .unwrap();
    store
        .register(
            EntityModel::new("employee", "id")
                .field("name")
                .field("grade")
                .relation("department", "department"),
        )
        .unwrap();

    for (id, name, manager) in [
        (1_u64, "Engineering", Some(10_u64)),
        (2, "Sales", Some(12)),
        (3, "Legal", None),
    ] {
        store
            .insert(
                "department",
                [
                    ("id", Value::Uint(id)),
                    ("name", Value::from(name)),
                    ("manager", Value::from(manager)),
                ],
            )
            .unwrap();
    }

    for (id, name, grade, department) in [
        (10_u64, "Alice", 3_i64, Some(1_u64)),
        (11, "Bob", 2, Some(1)),
        (12, "Dana", 3, Some(2)),
        (13, "Carol", 1, None),
        (14, "Erin", 2, Some(2)),
    ] {
        store
            .insert_displayed(
                "employee",
                name,
                [
                    ("id", Value::Uint(id)),
                    ("name", Value::from(name)),
                    ("grade", Value::Int(grade)),
                    ("department", Value::from(department)),
                ],
            )
            .unwrap();
    }

    Arc::new(store)
}

pub fn employees() -> MemorySource {
    MemorySource::new(company_store(), "employee").unwrap()
}

pub fn departments() -> MemorySource {
    MemorySource::new(company_store(), "department").unwrap()
}
