/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;

use infra::structure::tree::TreeNode;

use super::{CharacterData, Node, NodeData, NodeType};

// --------- //
// Structure //
// --------- //

pub struct TextNode {
    tree: TreeNode<Node>,
}

// -------------- //
// Implémentation //
// -------------- //

impl TextNode {
    pub fn new(data: String) -> Self {
        Self {
            tree: TreeNode::new(Node::new(
                NodeData::CharacterData(CharacterData::new(data)),
                NodeType::TEXT_NODE,
            )),
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl From<TextNode> for TreeNode<Node> {
    fn from(text: TextNode) -> Self {
        text.tree
    }
}

impl ops::Deref for TextNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}
