//! Mutation Observation
//!
//! MutationObserver bookkeeping. The document pushes every mutation of a
//! connected node through `ObserverRegistry::notify` together with the
//! target's inclusive ancestor chain; each observer decides whether one of
//! its observations covers it.

use crate::NodeId;

/// Observer handle returned by `Document::observe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

/// Mutation observer options
#[derive(Debug, Clone, Default)]
pub struct MutationObserverInit {
    pub child_list: bool,
    pub attributes: bool,
    pub character_data: bool,
    pub subtree: bool,
    pub attribute_filter: Option<Vec<String>>,
}

impl MutationObserverInit {
    /// Everything under the target: child list, attributes and character data
    pub fn everything() -> Self {
        Self {
            child_list: true,
            attributes: true,
            character_data: true,
            subtree: true,
            attribute_filter: None,
        }
    }
}

/// Mutation record
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub mutation_type: MutationType,
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub attribute_name: Option<String>,
    pub old_value: Option<String>,
}

impl MutationRecord {
    pub(crate) fn child_list(target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        Self {
            mutation_type: MutationType::ChildList,
            target,
            added_nodes: added,
            removed_nodes: removed,
            attribute_name: None,
            old_value: None,
        }
    }

    pub(crate) fn attribute(target: NodeId, name: &str, old_value: Option<String>) -> Self {
        Self {
            mutation_type: MutationType::Attributes,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: Some(name.to_string()),
            old_value,
        }
    }

    pub(crate) fn character_data(target: NodeId, old_value: String) -> Self {
        Self {
            mutation_type: MutationType::CharacterData,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: None,
            old_value: Some(old_value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    Attributes,
    CharacterData,
    ChildList,
}

#[derive(Debug)]
struct MutationObserver {
    id: ObserverId,
    observations: Vec<(NodeId, MutationObserverInit)>,
    records: Vec<MutationRecord>,
}

impl MutationObserver {
    fn wants(&self, record: &MutationRecord, path: &[NodeId]) -> bool {
        self.observations.iter().any(|(target, options)| {
            let covers_target = *target == record.target
                || (options.subtree && path.contains(target));
            if !covers_target {
                return false;
            }

            match record.mutation_type {
                MutationType::ChildList => options.child_list,
                MutationType::CharacterData => options.character_data,
                MutationType::Attributes => {
                    options.attributes
                        && match (&options.attribute_filter, &record.attribute_name) {
                            (Some(filter), Some(name)) => filter.iter().any(|f| f == name),
                            _ => true,
                        }
                }
            }
        })
    }
}

/// All observers of one document
#[derive(Debug, Default)]
pub(crate) struct ObserverRegistry {
    observers: Vec<MutationObserver>,
    next_id: u32,
}

impl ObserverRegistry {
    pub(crate) fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn observe(&mut self, target: NodeId, options: MutationObserverInit) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push(MutationObserver {
            id,
            observations: vec![(target, options)],
            records: Vec::new(),
        });
        id
    }

    pub(crate) fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    pub(crate) fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.observers.iter_mut()
            .find(|o| o.id == id)
            .map(|o| std::mem::take(&mut o.records))
            .unwrap_or_default()
    }

    pub(crate) fn has_records(&self, id: ObserverId) -> bool {
        self.observers.iter().any(|o| o.id == id && !o.records.is_empty())
    }

    /// Queue `record` for every interested observer. `path` is the target's
    /// inclusive ancestor chain.
    pub(crate) fn notify(&mut self, record: MutationRecord, path: &[NodeId]) {
        for observer in &mut self.observers {
            if observer.wants(&record, path) {
                observer.records.push(record.clone());
            }
        }
    }
}
