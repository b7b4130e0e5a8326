use std::collections::HashMap;

use crate::record::{FlowRecord, FlowType};

/// Provenance key of an elementary flow group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub compartment: String,
    pub subcompartment: String,
    pub flow_type: FlowType,
}

impl GroupKey {
    pub fn of(record: &FlowRecord) -> Self {
        Self {
            compartment: record.compartment.clone(),
            subcompartment: record.subcompartment.clone(),
            flow_type: record.flow_type,
        }
    }
}

/// Accumulator for one group.
///
/// `element_totals` is indexed like `ReferenceData::elements()` and is filled
/// by the composition calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowGroup<'a> {
    pub key: GroupKey,
    pub members: Vec<&'a FlowRecord>,
    pub total_amount: f64,
    pub element_totals: Vec<f64>,
}

impl<'a> FlowGroup<'a> {
    fn new(key: GroupKey, element_count: usize) -> Self {
        Self {
            key,
            members: Vec::new(),
            total_amount: 0.0,
            element_totals: vec![0.0; element_count],
        }
    }

    fn push(&mut self, record: &'a FlowRecord) {
        self.total_amount += record.amount;
        self.members.push(record);
    }
}

/// Partition by (compartment, subcompartment, flow type).
///
/// Groups come out in order of first occurrence of their key.
pub fn group_by_provenance(records: &[FlowRecord], element_count: usize) -> Vec<FlowGroup<'_>> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<FlowGroup<'_>> = Vec::new();

    for record in records {
        let key = GroupKey::of(record);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                groups.push(FlowGroup::new(key.clone(), element_count));
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].push(record);
    }

    groups
}

/// Intermediate flows are not pooled: every row is its own group.
pub fn group_per_row(records: &[FlowRecord], element_count: usize) -> Vec<FlowGroup<'_>> {
    records
        .iter()
        .map(|record| {
            let mut group = FlowGroup::new(GroupKey::of(record), element_count);
            group.push(record);
            group
        })
        .collect()
}
