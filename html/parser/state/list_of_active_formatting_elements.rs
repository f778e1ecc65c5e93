/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::ops;

use dom::node::Node;
use infra::structure::tree::TreeNode;

// --------- //
// Structure //
// --------- //

/// La liste des éléments de mise en forme actifs : des éléments
/// fermés hors ordre, encore candidats à la reconstruction, séparés
/// par des marqueurs de portée. Un élément présent ici n'est pas
/// nécessairement sur la pile des éléments ouverts. Les marqueurs
/// n'apparaissent jamais dans l'arbre produit.
#[derive(Default)]
pub(crate) struct ListOfActiveFormattingElements {
    entries: Vec<Entry>,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(PartialEq)]
pub(crate) enum Entry {
    Marker,
    Element(TreeNode<Node>),
}

// -------------- //
// Implémentation //
// -------------- //

impl ListOfActiveFormattingElements {
    pub(crate) fn insert_marker_at_end(&mut self) {
        self.entries.push(Entry::Marker);
    }

    /// Vide la liste jusqu'au dernier marqueur inclus.
    pub(crate) fn clear_up_to_the_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry.is_marker() {
                break;
            }
        }
    }

    pub(crate) fn contains_element(
        &self,
        element: &TreeNode<Node>,
    ) -> bool {
        self.position_of(element).is_some()
    }

    pub(crate) fn position_of(
        &self,
        element: &TreeNode<Node>,
    ) -> Option<usize> {
        self.entries.iter().position(|entry| {
            matches!(entry, Entry::Element(node) if node == element)
        })
    }

    pub(crate) fn remove_element(&mut self, element: &TreeNode<Node>) {
        if let Some(idx) = self.position_of(element) {
            self.entries.remove(idx);
        }
    }

    /// Dernier élément (le plus récemment ajouté) portant la balise
    /// donnée, sans remonter au-delà du dernier marqueur.
    pub(crate) fn last_element_before_marker(
        &self,
        tag_name: &str,
    ) -> Option<(usize, TreeNode<Node>)> {
        for (idx, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                | Entry::Marker => return None,
                | Entry::Element(node) => {
                    if node.element_ref().local_name() == tag_name {
                        return Some((idx, node.to_owned()));
                    }
                }
            }
        }
        None
    }

    /// Pousse un élément de mise en forme, en appliquant la clause de
    /// l'arche de Noé : si trois entrées depuis le dernier marqueur
    /// portent déjà la même balise, le même espace de noms et la même
    /// liste d'attributs, la plus ancienne d'entre elles est retirée.
    pub(crate) fn push_formatting_element(
        &mut self,
        element: TreeNode<Node>,
    ) {
        let mut matching = Vec::new();

        for (idx, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                | Entry::Marker => break,
                | Entry::Element(existing) => {
                    let new = element.element_ref();
                    let old = existing.element_ref();
                    if old.local_name() == new.local_name()
                        && old.namespace() == new.namespace()
                        && old.has_identical_attributes(new)
                    {
                        matching.push(idx);
                    }
                }
            }
        }

        if matching.len() >= 3 {
            // Le parcours est remontant : la dernière position
            // collectée est la plus ancienne.
            self.entries.remove(*matching.last().unwrap());
        }

        self.entries.push(Entry::Element(element));
    }
}

impl Entry {
    pub(crate) const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }

    pub(crate) const fn element(&self) -> Option<&TreeNode<Node>> {
        match self {
            | Entry::Marker => None,
            | Entry::Element(node) => Some(node),
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl ops::Deref for ListOfActiveFormattingElements {
    type Target = Vec<Entry>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl ops::DerefMut for ListOfActiveFormattingElements {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entries
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use dom::node::ElementNode;
    use html_elements::{Attribute, Element};
    use infra::namespace::Namespace;

    use super::*;

    fn bold(id: &str) -> TreeNode<Node> {
        let element = Element::new("b", Namespace::HTML);
        element.append_attribute(Attribute::new("id", id));
        ElementNode::new(element).into()
    }

    #[test]
    fn test_noahs_ark_clause() {
        let mut list = ListOfActiveFormattingElements::default();
        let first = bold("x");

        list.push_formatting_element(first.clone());
        list.push_formatting_element(bold("x"));
        list.push_formatting_element(bold("x"));
        assert_eq!(list.len(), 3);

        // La quatrième entrée identique évince la plus ancienne.
        list.push_formatting_element(bold("x"));
        assert_eq!(list.len(), 3);
        assert!(!list.contains_element(&first));

        // Une entrée aux attributs différents n'évince rien.
        list.push_formatting_element(bold("y"));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_noahs_ark_stops_at_marker() {
        let mut list = ListOfActiveFormattingElements::default();
        list.push_formatting_element(bold("x"));
        list.push_formatting_element(bold("x"));
        list.push_formatting_element(bold("x"));
        list.insert_marker_at_end();

        list.push_formatting_element(bold("x"));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_last_element_before_marker() {
        let mut list = ListOfActiveFormattingElements::default();
        let early = bold("early");
        list.push_formatting_element(early.clone());
        list.insert_marker_at_end();

        assert!(list.last_element_before_marker("b").is_none());

        let late = bold("late");
        list.push_formatting_element(late.clone());
        let (idx, found) =
            list.last_element_before_marker("b").unwrap();
        assert_eq!(idx, 2);
        assert_eq!(found, late);
    }

    #[test]
    fn test_clear_up_to_the_last_marker() {
        let mut list = ListOfActiveFormattingElements::default();
        list.push_formatting_element(bold("kept"));
        list.insert_marker_at_end();
        list.push_formatting_element(bold("dropped"));
        list.push_formatting_element(bold("dropped"));

        list.clear_up_to_the_last_marker();
        assert_eq!(list.len(), 1);
        assert!(!list[0].is_marker());
    }
}
