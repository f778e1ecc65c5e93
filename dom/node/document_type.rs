/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;

use infra::structure::tree::TreeNode;

use super::{Node, NodeData, NodeType};

// --------- //
// Structure //
// --------- //

pub struct DoctypeNode {
    tree: TreeNode<Node>,
}

/// Le doctype conserve son nom et ses identifiants publics et système,
/// un identifiant manquant étant représenté par la chaîne vide.
#[derive(Debug)]
pub struct DocumentType {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

// -------------- //
// Implémentation //
// -------------- //

impl DoctypeNode {
    pub fn new(
        name: impl ToString,
        public_id: impl ToString,
        system_id: impl ToString,
    ) -> Self {
        Self {
            tree: TreeNode::new(Node::new(
                NodeData::DocumentType(DocumentType {
                    name: name.to_string(),
                    public_id: public_id.to_string(),
                    system_id: system_id.to_string(),
                }),
                NodeType::DOCUMENT_TYPE_NODE,
            )),
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl From<DoctypeNode> for TreeNode<Node> {
    fn from(doctype: DoctypeNode) -> Self {
        doctype.tree
    }
}

impl ops::Deref for DoctypeNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}
