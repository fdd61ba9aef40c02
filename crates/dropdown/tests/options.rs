use dropdown::{
    MissingRelation, OptionError,
    core::{
        model::EntityModel,
        source::{MemoryError, MemorySource, MemoryStore},
    },
    prelude::*,
};
use std::sync::Arc;

// author(id, name) <- book(id, title, year, author)
fn library() -> Arc<MemoryStore> {
    let mut store = MemoryStore::new();

    store
        .register(EntityModel::new("author", "id").field("name"))
        .unwrap();
    store
        .register(
            EntityModel::new("book", "id")
                .field("title")
                .field("year")
                .relation("author", "author"),
        )
        .unwrap();

    for (id, name) in [(1_u64, "Le Guin"), (2, "Banks")] {
        store
            .insert("author", [("id", Value::Uint(id)), ("name", Value::from(name))])
            .unwrap();
    }
    for (id, title, year, author) in [
        (100_u64, "The Dispossessed", 1974_i64, Some(1_u64)),
        (101, "Consider Phlebas", 1987, Some(2)),
        (102, "The Left Hand of Darkness", 1969, Some(1)),
        (103, "Use of Weapons", 1990, Some(2)),
        (104, "Anonymous Pamphlet", 1901, None),
    ] {
        store
            .insert_displayed(
                "book",
                title,
                [
                    ("id", Value::Uint(id)),
                    ("title", Value::from(title)),
                    ("year", Value::Int(year)),
                    ("author", Value::from(author)),
                ],
            )
            .unwrap();
    }

    Arc::new(store)
}

fn books() -> MemorySource {
    library().source("book").unwrap()
}

fn labels(options: &Options) -> Vec<&str> {
    options.items.iter().map(OptionItem::label).collect()
}

#[test]
fn books_by_title_with_limit() {
    let config = DropdownConfig::new(2);

    let options = from_source(&books(), &config, Some("title"), "pk", None, false, &[]).unwrap();

    assert_eq!(options.total, 5);
    assert_eq!(labels(&options), ["Anonymous Pamphlet", "Consider Phlebas"]);
    assert_eq!(options.items[1].value(), &Value::Uint(101));
}

#[test]
fn authors_reached_through_books_appear_once() {
    let config = DropdownConfig::default();

    let options = OptionBuilder::new(&books(), &config)
        .label("author.name")
        .value("author.pk")
        .filter(FieldRef::new("author").is_not_null())
        .build()
        .unwrap();

    assert_eq!(
        options.items,
        [
            OptionItem::new("Banks", Value::Uint(2)),
            OptionItem::new("Le Guin", Value::Uint(1)),
        ]
    );
}

#[test]
fn context_and_json_shape() {
    let config = DropdownConfig::default().with_missing_relation(MissingRelation::Null);

    let options = from_source(
        &books(),
        &config,
        None,
        "pk",
        Some(FieldRef::new("year").lt(1975)),
        true,
        &["author.name", "year"],
    )
    .unwrap();

    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        serde_json::json!({
            "items": [
                {
                    "label": "The Dispossessed",
                    "value": 100,
                    "context": {"author.name": "Le Guin", "year": 1974}
                },
                {
                    "label": "The Left Hand of Darkness",
                    "value": 102,
                    "context": {"author.name": "Le Guin", "year": 1969}
                },
                {
                    "label": "Anonymous Pamphlet",
                    "value": 104,
                    "context": {"author.name": null, "year": 1901}
                }
            ],
            "total": 3
        })
    );
}

#[test]
fn unknown_field_surfaces_source_error() {
    let config = DropdownConfig::default();

    let err = from_source(&books(), &config, Some("author.email"), "pk", None, true, &[])
        .unwrap_err();

    assert!(matches!(
        err,
        OptionError::Source(MemoryError::UnknownField { ref entity, ref field })
            if entity == "author" && field == "email"
    ));
}

#[derive(Clone, Copy)]
enum Format {
    Hardcover,
    Paperback,
    Ebook,
}

impl ChoiceEnum for Format {
    const ALL: &'static [Self] = &[Self::Hardcover, Self::Paperback, Self::Ebook];

    fn label(&self) -> &str {
        match self {
            Self::Hardcover => "Hardcover",
            Self::Paperback => "Paperback",
            Self::Ebook => "E-book",
        }
    }

    fn value(&self) -> Value {
        Value::from(match self {
            Self::Hardcover => "hc",
            Self::Paperback => "pb",
            Self::Ebook => "eb",
        })
    }
}

#[test]
fn static_choices() {
    let from_pairs = from_choices([("Paperback", "pb"), ("E-book", "eb"), ("Hardcover", "hc")]);

    assert_eq!(from_pairs, from_enum::<Format>());
    assert_eq!(
        from_pairs.iter().map(OptionItem::label).collect::<Vec<_>>(),
        ["E-book", "Hardcover", "Paperback"]
    );
}
