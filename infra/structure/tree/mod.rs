/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod node;
mod weak;

use core::ops;
use std::rc::Rc;

pub use self::weak::TreeNodeWeak;
use self::node::Node;

// --------- //
// Structure //
// --------- //

/// Poignée partagée vers un noeud d'un arbre ordonné fini.
///
/// Cloner une poignée ne clone pas le noeud : plusieurs structures (la
/// pile des éléments ouverts, la liste des éléments de mise en forme
/// actifs) peuvent désigner le même noeud pendant que l'arbre le
/// possède. L'égalité entre poignées est une égalité d'identité.
#[derive(Debug)]
pub struct TreeNode<T> {
    node_ref: Rc<Node<T>>,
}

// -------------- //
// Implémentation //
// -------------- //

impl<T> TreeNode<T> {
    pub fn new(data: T) -> Self {
        Self {
            node_ref: Rc::new(Node::new(data)),
        }
    }

    fn new_node(rc: Rc<Node<T>>) -> Self {
        Self { node_ref: rc }
    }

    pub(crate) fn downgrade(&self) -> std::rc::Weak<Node<T>> {
        Rc::downgrade(&self.node_ref)
    }

    /// Un objet qui participe à un arbre a un parent, qui est soit null
    /// soit un objet.
    pub fn parent_node(&self) -> Option<Self> {
        self.node_ref
            .parent
            .borrow()
            .as_ref()
            .and_then(TreeNodeWeak::upgrade)
    }

    pub fn first_child(&self) -> Option<Self> {
        self.node_ref.first_child.borrow().clone()
    }

    pub fn last_child(&self) -> Option<Self> {
        self.node_ref.last_child.borrow().clone()
    }

    pub fn previous_sibling(&self) -> Option<Self> {
        self.node_ref
            .prev_sibling
            .borrow()
            .as_ref()
            .and_then(TreeNodeWeak::upgrade)
    }

    pub fn next_sibling(&self) -> Option<Self> {
        self.node_ref.next_sibling.borrow().clone()
    }

    /// Enfants du noeud, dans l'ordre de l'arbre.
    pub fn children(&self) -> Vec<Self> {
        let mut children = Vec::new();
        let mut maybe_child = self.first_child();
        while let Some(child) = maybe_child {
            maybe_child = child.next_sibling();
            children.push(child);
        }
        children
    }

    pub fn has_children(&self) -> bool {
        self.first_child().is_some()
    }

    /// Ajoute un noeud comme dernier enfant. Le noeud est d'abord
    /// détaché de son parent actuel : un noeud n'appartient jamais à
    /// deux parents à la fois.
    pub fn append_child(&self, node: impl Into<Self>) {
        let child: Self = node.into();

        child.detach();

        let maybe_last = self.last_child();
        if let Some(last) = maybe_last {
            last.node_ref
                .next_sibling
                .borrow_mut()
                .replace(child.clone());
            child
                .node_ref
                .prev_sibling
                .borrow_mut()
                .replace(TreeNodeWeak::from(&last));
        } else {
            self.node_ref
                .first_child
                .borrow_mut()
                .replace(child.clone());
        }

        child
            .node_ref
            .parent
            .borrow_mut()
            .replace(TreeNodeWeak::from(self));
        self.node_ref.last_child.borrow_mut().replace(child);
    }

    /// Insère un noeud juste avant `maybe_child` dans les enfants de
    /// `self`. Sans enfant de référence, l'insertion se fait en fin de
    /// liste. Comme [Self::append_child], le noeud est d'abord détaché.
    pub fn insert_before(
        &self,
        node: impl Into<Self>,
        maybe_child: Option<&Self>,
    ) {
        let node: Self = node.into();

        let child = match maybe_child {
            | Some(child) => child,
            | None => {
                self.append_child(node);
                return;
            }
        };

        debug_assert!(child
            .parent_node()
            .as_ref()
            .is_some_and(|parent| parent == self));

        node.detach();

        match child.previous_sibling() {
            | Some(prev) => {
                prev.node_ref
                    .next_sibling
                    .borrow_mut()
                    .replace(node.clone());
                node.node_ref
                    .prev_sibling
                    .borrow_mut()
                    .replace(TreeNodeWeak::from(&prev));
            }
            | None => {
                self.node_ref
                    .first_child
                    .borrow_mut()
                    .replace(node.clone());
            }
        }

        node.node_ref
            .next_sibling
            .borrow_mut()
            .replace(child.clone());
        child
            .node_ref
            .prev_sibling
            .borrow_mut()
            .replace(TreeNodeWeak::from(&node));
        node.node_ref
            .parent
            .borrow_mut()
            .replace(TreeNodeWeak::from(self));
    }

    /// Retire le noeud de son parent, en recousant les liens de
    /// fratrie. Sans effet si le noeud n'a pas de parent.
    pub fn detach(&self) {
        let maybe_parent = self.parent_node();
        let maybe_prev = self.previous_sibling();
        let maybe_next = self.next_sibling();

        if let Some(parent) = maybe_parent.as_ref() {
            if maybe_prev.is_none() {
                *parent.node_ref.first_child.borrow_mut() =
                    maybe_next.clone();
            }
            if maybe_next.is_none() {
                *parent.node_ref.last_child.borrow_mut() =
                    maybe_prev.clone();
            }
        }

        if let Some(prev) = maybe_prev.as_ref() {
            *prev.node_ref.next_sibling.borrow_mut() =
                maybe_next.clone();
        }
        if let Some(next) = maybe_next.as_ref() {
            *next.node_ref.prev_sibling.borrow_mut() =
                maybe_prev.as_ref().map(TreeNodeWeak::from);
        }

        *self.node_ref.parent.borrow_mut() = None;
        *self.node_ref.prev_sibling.borrow_mut() = None;
        *self.node_ref.next_sibling.borrow_mut() = None;
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<T> From<Rc<Node<T>>> for TreeNode<T> {
    fn from(rc: Rc<Node<T>>) -> Self {
        Self::new_node(rc)
    }
}

impl<T> Clone for TreeNode<T> {
    fn clone(&self) -> Self {
        Self::new_node(self.node_ref.clone())
    }
}

impl<T> PartialEq for TreeNode<T> {
    /// Égalité d'identité : deux poignées sont égales si elles
    /// désignent le même noeud, indépendamment des données.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node_ref, &other.node_ref)
    }
}

impl<T> Eq for TreeNode<T> {}

impl<T> ops::Deref for TreeNode<T> {
    type Target = Node<T>;

    fn deref(&self) -> &Self::Target {
        &self.node_ref
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(data: &str) -> TreeNode<String> {
        TreeNode::new(data.to_owned())
    }

    fn child_data(parent: &TreeNode<String>) -> Vec<String> {
        parent
            .children()
            .iter()
            .map(|child| (***child).clone())
            .collect()
    }

    #[test]
    fn test_append_child_preserves_order() {
        let parent = leaf("parent");
        parent.append_child(leaf("a"));
        parent.append_child(leaf("b"));
        parent.append_child(leaf("c"));
        assert_eq!(child_data(&parent), ["a", "b", "c"]);
    }

    #[test]
    fn test_append_child_moves_node() {
        let first = leaf("first");
        let second = leaf("second");
        let node = leaf("node");

        first.append_child(node.clone());
        second.append_child(node.clone());

        assert!(!first.has_children());
        assert_eq!(child_data(&second), ["node"]);
        assert_eq!(node.parent_node().unwrap(), second);
    }

    #[test]
    fn test_insert_before() {
        let parent = leaf("parent");
        let b = leaf("b");
        parent.append_child(leaf("a"));
        parent.append_child(b.clone());

        parent.insert_before(leaf("x"), Some(&b));
        parent.insert_before(leaf("z"), None);

        assert_eq!(child_data(&parent), ["a", "x", "b", "z"]);
    }

    #[test]
    fn test_insert_before_first_child() {
        let parent = leaf("parent");
        let a = leaf("a");
        parent.append_child(a.clone());
        parent.insert_before(leaf("x"), Some(&a));

        assert_eq!(child_data(&parent), ["x", "a"]);
        assert_eq!(parent.first_child().unwrap(), parent.children()[0]);
    }

    #[test]
    fn test_detach_middle_child() {
        let parent = leaf("parent");
        let b = leaf("b");
        parent.append_child(leaf("a"));
        parent.append_child(b.clone());
        parent.append_child(leaf("c"));

        b.detach();

        assert_eq!(child_data(&parent), ["a", "c"]);
        assert!(b.parent_node().is_none());
        assert!(b.previous_sibling().is_none());
        assert!(b.next_sibling().is_none());
    }

    #[test]
    fn test_identity_equality() {
        let a = leaf("same");
        let b = leaf("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
