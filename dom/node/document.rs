/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;
use std::cell::RefCell;

use infra::structure::tree::TreeNode;

use super::{Node, NodeData, NodeType};

// --------- //
// Structure //
// --------- //

pub struct DocumentNode {
    tree: TreeNode<Node>,
}

#[derive(Debug)]
#[derive(Default)]
pub struct Document {
    pub quirks_mode: RefCell<QuirksMode>,
}

// ----------- //
// Énumération //
// ----------- //

/// Mode de rendu hérité, déduit du doctype.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(Default)]
#[derive(PartialEq, Eq)]
pub enum QuirksMode {
    Yes,
    Limited,
    #[default]
    No,
}

// -------------- //
// Implémentation //
// -------------- //

impl DocumentNode {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            tree: TreeNode::new(Node::new(
                NodeData::Document(Document::default()),
                NodeType::DOCUMENT_NODE,
            )),
        }
    }
}

impl Document {
    pub fn isin_quirks_mode(&self) -> bool {
        *self.quirks_mode.borrow() == QuirksMode::Yes
    }

    pub fn set_quirks_mode(&self, quirks_mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = quirks_mode;
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl Clone for DocumentNode {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl From<&DocumentNode> for TreeNode<Node> {
    fn from(document: &DocumentNode) -> Self {
        document.tree.clone()
    }
}

impl From<DocumentNode> for TreeNode<Node> {
    fn from(document: DocumentNode) -> Self {
        document.tree
    }
}

impl ops::Deref for DocumentNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}
