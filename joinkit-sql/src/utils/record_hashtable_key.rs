use joinkit_types::types::{Field, Record};

/// Values of `key_indexes` in `record`, nulls included. Used for grouping.
pub fn get_record_key_fields(record: &Record, key_indexes: &[usize]) -> Vec<Field> {
    key_indexes
        .iter()
        .map(|i| record.values.get(*i).cloned().unwrap_or(Field::Null))
        .collect()
}

/// Join key of `record`, or `None` when any key value is null: a null key never matches.
pub fn get_join_key_fields(record: &Record, key_indexes: &[usize]) -> Option<Vec<Field>> {
    key_indexes
        .iter()
        .map(|i| record.values.get(*i).filter(|field| !field.is_null()).cloned())
        .collect()
}
