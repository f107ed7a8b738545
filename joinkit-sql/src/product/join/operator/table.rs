use std::collections::HashMap;

use ahash::RandomState;
use joinkit_types::types::{Field, Record};

use crate::utils::record_hashtable_key::get_join_key_fields;

pub type JoinKey = Vec<Field>;

/// Row positions of one join input, indexed by join key.
///
/// Positions are stored in ascending order so a lookup yields matches in input order.
#[derive(Debug, Clone)]
pub struct JoinTable {
    map: HashMap<JoinKey, Vec<usize>, RandomState>,
}

impl JoinTable {
    pub fn new(join_key_indexes: &[usize], records: &[Record]) -> Self {
        let mut map: HashMap<JoinKey, Vec<usize>, RandomState> = HashMap::default();
        for (position, record) in records.iter().enumerate() {
            if let Some(join_key) = get_join_key_fields(record, join_key_indexes) {
                map.entry(join_key).or_default().push(position);
            }
        }
        Self { map }
    }

    pub fn get_matching_records(&self, join_key: &JoinKey) -> &[usize] {
        self.map
            .get(join_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_positions_keep_input_order() {
        let records = vec![
            Record::new(vec![Field::Int(1), Field::from("a")]),
            Record::new(vec![Field::Int(2), Field::from("b")]),
            Record::new(vec![Field::Int(1), Field::from("c")]),
            Record::new(vec![Field::Null, Field::from("d")]),
        ];
        let table = JoinTable::new(&[0], &records);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get_matching_records(&vec![Field::Int(1)]), &[0, 2]);
        assert_eq!(table.get_matching_records(&vec![Field::Int(2)]), &[1]);
        assert!(table.get_matching_records(&vec![Field::Int(3)]).is_empty());
        assert!(table.get_matching_records(&vec![Field::Null]).is_empty());
    }
}
