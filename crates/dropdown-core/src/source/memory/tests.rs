use super::*;
use crate::{
    path::{Record, resolve},
    query::{FieldRef, Query},
    source::Source,
    test_fixtures::{company_store, departments, employees},
};

fn names(rows: &[MemoryRow]) -> Vec<String> {
    rows.iter().map(ToString::to_string).collect()
}

#[test]
fn insert_rejects_unknown_entity_and_field() {
    let mut store = MemoryStore::new();
    store.register(EntityModel::new("tag", "id").field("name")).unwrap();

    assert_eq!(
        store.insert("label", [("id", 1)]),
        Err(MemoryError::UnknownEntity {
            entity: "label".to_string()
        })
    );
    assert_eq!(
        store.insert("tag", [("id", Value::Int(1)), ("colour", Value::from("red"))]),
        Err(MemoryError::UnknownField {
            entity: "tag".to_string(),
            field: "colour".to_string()
        })
    );
}

#[test]
fn insert_requires_unique_primary_key() {
    let mut store = MemoryStore::new();
    store.register(EntityModel::new("tag", "id").field("name")).unwrap();

    store.insert("tag", [("pk", 1)]).unwrap();

    assert_eq!(
        store.insert("tag", [("id", 1)]),
        Err(MemoryError::DuplicateKey {
            entity: "tag".to_string(),
            key: Value::Int(1)
        })
    );
    assert_eq!(
        store.insert("tag", [("name", "orphan")]),
        Err(MemoryError::MissingPrimaryKey {
            entity: "tag".to_string()
        })
    );
    assert_eq!(store.len("tag"), 1);
}

#[test]
fn register_rejects_duplicate_entity() {
    let mut store = MemoryStore::new();
    store.register(EntityModel::new("tag", "id")).unwrap();

    assert_eq!(
        store.register(EntityModel::new("tag", "id")),
        Err(MemoryError::DuplicateEntity {
            entity: "tag".to_string()
        })
    );
}

#[test]
fn source_requires_registered_entity() {
    let store = company_store();

    assert!(store.source("employee").is_ok());
    assert_eq!(
        store.source("project").unwrap_err(),
        MemoryError::UnknownEntity {
            entity: "project".to_string()
        }
    );
}

#[test]
fn rows_follow_relations_lazily() {
    let rows = employees().fetch(&Query::all()).unwrap();
    let alice = &rows[0];

    let name = resolve("department.manager.name").unwrap();
    assert_eq!(name.extract(alice), Ok(Value::from("Alice")));
    assert_eq!(alice.attribute("pk"), Some(Value::Uint(10)));
    assert_eq!(alice.attribute("department"), Some(Value::Uint(1)));
    assert_eq!(alice.attribute("salary"), None);
    assert!(alice.related("name").is_none());
}

#[test]
fn eager_joins_match_lazy_access() {
    let source = employees();
    let path = resolve("department.manager.name").unwrap();

    let lazy = source.fetch(&Query::all()).unwrap();
    let eager = source
        .fetch(&Query::all().select_related(["department__manager"]))
        .unwrap();

    let read = |rows: &[MemoryRow]| -> Vec<_> { rows.iter().map(|r| path.extract(r)).collect() };
    assert_eq!(read(&lazy), read(&eager));
}

#[test]
fn display_falls_back_to_entity_and_key() {
    let rows = departments().fetch(&Query::all()).unwrap();

    assert_eq!(rows[0].to_string(), "department object (1)");
    assert_eq!(rows[0].entity(), "department");
    assert_eq!(rows[0].key(), Value::Uint(1));
}

#[test]
fn filter_then_order_ascending_and_descending() {
    let source = employees();
    let engineering = FieldRef::new("department.name").eq("Engineering");

    let asc = source
        .fetch(&Query::all().filter(engineering.clone()).order_by("name"))
        .unwrap();
    let desc = source
        .fetch(&Query::all().filter(engineering).order_by_desc("name"))
        .unwrap();

    assert_eq!(names(&asc), ["Alice", "Bob"]);
    assert_eq!(names(&desc), ["Bob", "Alice"]);
}

#[test]
fn ordering_ties_keep_insertion_order() {
    let rows = employees()
        .fetch(&Query::all().order_by("grade"))
        .unwrap();

    assert_eq!(names(&rows), ["Carol", "Bob", "Erin", "Alice", "Dana"]);
}

#[test]
fn unset_relation_orders_as_null_first() {
    let rows = employees()
        .fetch(&Query::all().order_by("department__name").order_by("name"))
        .unwrap();

    assert_eq!(names(&rows), ["Carol", "Alice", "Bob", "Dana", "Erin"]);
}

#[test]
fn count_ignores_paging() {
    let source = employees();
    let query = Query::all().order_by("pk").offset(1).limit(2);

    assert_eq!(names(&source.fetch(&query).unwrap()), ["Bob", "Dana"]);
    assert_eq!(source.count(&query).unwrap(), 5);
}

#[test]
fn distinct_over_narrowed_fields_collapses_fan_out() {
    let source = employees();
    let query = Query::all()
        .filter(FieldRef::new("department").is_not_null())
        .only(["department__name"])
        .order_by("department__name")
        .distinct();

    let rows = source.fetch(&query).unwrap();
    let path = resolve("department.name").unwrap();
    let departments: Vec<_> = rows.iter().map(|r| path.extract(r).unwrap()).collect();

    assert_eq!(
        departments,
        [Value::from("Engineering"), Value::from("Sales")]
    );
    assert_eq!(source.count(&query).unwrap(), 2);
}

#[test]
fn distinct_without_narrowing_keeps_distinct_records() {
    let source = employees();

    assert_eq!(source.count(&Query::all().distinct()).unwrap(), 5);
}

#[test]
fn unknown_paths_fail_validation() {
    let source = employees();

    assert_eq!(
        source.fetch(&Query::all().order_by("salary")).unwrap_err(),
        MemoryError::UnknownField {
            entity: "employee".to_string(),
            field: "salary".to_string()
        }
    );
    assert_eq!(
        source
            .fetch(&Query::all().only(["department__budget"]))
            .unwrap_err(),
        MemoryError::UnknownField {
            entity: "department".to_string(),
            field: "budget".to_string()
        }
    );
    assert_eq!(
        source
            .count(&Query::all().filter(FieldRef::new("team.name").eq("x")))
            .unwrap_err(),
        MemoryError::UnknownField {
            entity: "employee".to_string(),
            field: "team".to_string()
        }
    );
}

#[test]
fn malformed_filter_path_is_reported_verbatim() {
    let err = employees()
        .fetch(&Query::all().filter(FieldRef::new("department..name").eq("Sales")))
        .unwrap_err();

    assert_eq!(
        err,
        MemoryError::UnknownField {
            entity: "employee".to_string(),
            field: "department..name".to_string()
        }
    );
}

#[test]
fn joins_must_traverse_relations() {
    let source = employees();

    assert_eq!(
        source
            .fetch(&Query::all().select_related(["name"]))
            .unwrap_err(),
        MemoryError::NotARelation {
            entity: "employee".to_string(),
            field: "name".to_string()
        }
    );
}
