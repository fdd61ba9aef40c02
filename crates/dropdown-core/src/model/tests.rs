use super::*;

fn employee() -> EntityModel {
    EntityModel::new("employee", "id")
        .field("name")
        .relation("department", "department")
}

#[test]
fn primary_key_is_the_first_field() {
    let model = employee();

    assert_eq!(model.fields[0].name, "id");
    assert_eq!(model.fields.len(), 3);
}

#[test]
fn pk_alias_resolves_to_primary_key() {
    let model = employee();

    assert_eq!(model.canonical_name("pk"), "id");
    assert_eq!(model.get_field("pk").map(|f| f.name.as_str()), Some("id"));
    assert_eq!(model.canonical_name("name"), "name");
}

#[test]
fn relation_target_only_for_relations() {
    let model = employee();

    assert_eq!(model.relation_target("department"), Some("department"));
    assert_eq!(model.relation_target("name"), None);
    assert_eq!(model.relation_target("missing"), None);
    assert!(model.get_field("department").unwrap().is_relation());
}
