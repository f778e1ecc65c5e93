/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;

use infra::structure::tree::TreeNode;

use super::{CharacterData, Node, NodeData, NodeType};

// --------- //
// Structure //
// --------- //

pub struct CommentNode {
    tree: TreeNode<Node>,
}

// -------------- //
// Implémentation //
// -------------- //

impl CommentNode {
    pub fn new(data: String) -> Self {
        Self {
            tree: TreeNode::new(Node::new(
                NodeData::CharacterData(CharacterData::new(data)),
                NodeType::COMMENT_NODE,
            )),
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl From<CommentNode> for TreeNode<Node> {
    fn from(comment: CommentNode) -> Self {
        comment.tree
    }
}

impl ops::Deref for CommentNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}
