use crate::{option::OptionItem, value::Value};

///
/// ChoiceEnum
///
/// A closed set of choices known at compile time, such as a status enum.
///

pub trait ChoiceEnum: Sized + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn label(&self) -> &str;

    fn value(&self) -> Value;
}

/// Convert `(label, value)` pairs into items sorted by label.
///
/// The sort is stable, so equal labels keep their input order.
#[must_use]
pub fn from_choices<I, L, V>(entries: I) -> Vec<OptionItem>
where
    I: IntoIterator<Item = (L, V)>,
    L: Into<String>,
    V: Into<Value>,
{
    let mut items: Vec<OptionItem> = entries
        .into_iter()
        .map(|(label, value)| OptionItem::new(label, value))
        .collect();
    items.sort_by(|a, b| a.label().cmp(b.label()));

    items
}

/// Items for every variant of `E`, sorted by label.
#[must_use]
pub fn from_enum<E: ChoiceEnum>() -> Vec<OptionItem> {
    from_choices(E::ALL.iter().map(|choice| (choice.label(), choice.value())))
}
