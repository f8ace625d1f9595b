//! Lifecycle Registrar
//!
//! One registration service per component kind. A running service observes
//! the document body and turns mutation records into construction
//! candidates: marked roots that were inserted, marked descendants of
//! inserted subtrees, and elements whose marker attribute changed.

use crate::component::ComponentDefinition;
use crate::MARKER_ATTR;
use hookwork_dom::{Document, MutationObserverInit, MutationRecord, MutationType, NodeId, ObserverId};

/// Discovery for one component kind
#[derive(Debug)]
pub struct RegistrationService {
    definition: ComponentDefinition,
    observer: Option<ObserverId>,
}

impl RegistrationService {
    pub fn new(definition: ComponentDefinition) -> Self {
        Self { definition, observer: None }
    }

    pub fn kind(&self) -> &'static str {
        self.definition.kind
    }

    pub fn definition(&self) -> &ComponentDefinition {
        &self.definition
    }

    pub fn is_running(&self) -> bool {
        self.observer.is_some()
    }

    /// Begin observing the body (or the whole document without one).
    /// Returns false if already running.
    pub(crate) fn start(&mut self, document: &mut Document) -> bool {
        if self.observer.is_some() {
            return false;
        }
        let target = if document.body().is_valid() { document.body() } else { document.root() };
        self.observer = Some(document.observe(target, MutationObserverInit::everything()));
        tracing::info!("{} registration started on {:?}", self.kind(), target);
        true
    }

    /// Stop observing; pending records are dropped
    pub(crate) fn stop(&mut self, document: &mut Document) -> bool {
        match self.observer.take() {
            Some(observer) => {
                document.disconnect(observer);
                tracing::info!("{} registration stopped", self.kind());
                true
            }
            None => false,
        }
    }

    /// Take the records queued for this service
    pub(crate) fn take_records(&self, document: &mut Document) -> Vec<MutationRecord> {
        match self.observer {
            Some(observer) => document.take_records(observer),
            None => Vec::new(),
        }
    }

    /// Check if `node` carries this kind's marker
    pub fn is_marked(&self, document: &Document, node: NodeId) -> bool {
        document.attribute(node, MARKER_ATTR) == Some(self.kind())
    }

    /// Every marked element in the document, in document order
    pub fn scan(&self, document: &Document) -> Vec<NodeId> {
        document.elements_with_attribute(document.root(), MARKER_ATTR)
            .into_iter()
            .filter(|&node| self.is_marked(document, node))
            .collect()
    }

    /// Construction candidates from a batch of records, deduplicated and
    /// in document order. Only connected, still-marked elements remain.
    pub fn candidates(&self, document: &Document, records: &[MutationRecord]) -> Vec<NodeId> {
        let mut found = Vec::new();
        for record in records {
            match record.mutation_type {
                MutationType::ChildList => {
                    for &added in &record.added_nodes {
                        found.push(added);
                        found.extend(document.elements_with_attribute(added, MARKER_ATTR));
                    }
                }
                MutationType::Attributes => {
                    if record.attribute_name.as_deref() == Some(MARKER_ATTR) {
                        found.push(record.target);
                    }
                }
                MutationType::CharacterData => {}
            }
        }

        document.sort_document_order(&mut found);
        found.retain(|&node| document.is_connected(node) && self.is_marked(document, node));
        found
    }

    /// Check if a batch removed anything
    pub fn has_removals(records: &[MutationRecord]) -> bool {
        records.iter().any(|r| !r.removed_nodes.is_empty())
    }
}
