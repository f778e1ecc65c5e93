/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;

use html_elements::Element;
use infra::structure::tree::TreeNode;

use super::{Node, NodeData, NodeType};

// --------- //
// Structure //
// --------- //

pub struct ElementNode {
    tree: TreeNode<Node>,
}

// -------------- //
// Implémentation //
// -------------- //

impl ElementNode {
    pub fn new(element: Element) -> Self {
        Self {
            tree: TreeNode::new(Node::new(
                NodeData::Element(element),
                NodeType::ELEMENT_NODE,
            )),
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl From<ElementNode> for TreeNode<Node> {
    fn from(element: ElementNode) -> Self {
        element.tree
    }
}

impl ops::Deref for ElementNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}
