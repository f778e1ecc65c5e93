/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::rc::Weak;

use super::{node::Node, TreeNode};

// --------- //
// Structure //
// --------- //

/// Référence faible vers un noeud de l'arbre. Les liens remontants
/// (parent, frère précédent) sont faibles afin que la propriété des
/// noeuds reste strictement descendante : un parent possède ses
/// enfants, jamais l'inverse.
#[derive(Debug)]
pub struct TreeNodeWeak<T> {
    node_ref: Weak<Node<T>>,
}

// -------------- //
// Implémentation //
// -------------- //

impl<T> TreeNodeWeak<T> {
    pub fn upgrade(&self) -> Option<TreeNode<T>> {
        self.node_ref.upgrade().map(TreeNode::from)
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<T> Clone for TreeNodeWeak<T> {
    fn clone(&self) -> Self {
        Self {
            node_ref: self.node_ref.clone(),
        }
    }
}

impl<T> From<&TreeNode<T>> for TreeNodeWeak<T> {
    fn from(node: &TreeNode<T>) -> Self {
        Self {
            node_ref: node.downgrade(),
        }
    }
}
