/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Le noeud document
mod document;

/// Le noeud doctype
mod document_type;

/// Le noeud élément
mod element;

/// Les données de caractères (texte, commentaire)
mod character_data;

/// Le noeud texte
mod text;

/// Le noeud commentaire
mod comment;

use html_elements::Element;

pub use self::{
    character_data::CharacterData,
    comment::CommentNode,
    document::{Document, DocumentNode, QuirksMode},
    document_type::{DoctypeNode, DocumentType},
    element::ElementNode,
    text::TextNode,
};

// --------- //
// Structure //
// --------- //

/// Un noeud de l'arbre du document : un type et la donnée qui lui
/// correspond. Les liens de parenté sont portés par
/// [infra::structure::tree::TreeNode].
#[derive(Debug)]
pub struct Node {
    node_data: NodeData,
    node_type: NodeType,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
pub enum NodeData {
    Document(Document),
    DocumentType(DocumentType),
    Element(Element),
    CharacterData(CharacterData),
}

#[allow(non_camel_case_types)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    ELEMENT_NODE = 1,
    TEXT_NODE = 3,
    COMMENT_NODE = 8,
    DOCUMENT_NODE = 9,
    DOCUMENT_TYPE_NODE = 10,
}

// -------------- //
// Implémentation //
// -------------- //

// Self
impl Node {
    pub(super) fn new(node_data: NodeData, node_type: NodeType) -> Self {
        Self {
            node_data,
            node_type,
        }
    }
}

// &Self
impl Node {
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::ELEMENT_NODE
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::TEXT_NODE
    }

    pub fn is_comment(&self) -> bool {
        self.node_type == NodeType::COMMENT_NODE
    }

    pub fn is_document(&self) -> bool {
        self.node_type == NodeType::DOCUMENT_NODE
    }

    pub fn is_doctype(&self) -> bool {
        self.node_type == NodeType::DOCUMENT_TYPE_NODE
    }

    /// Retourne la donnée du noeud, qui doit être un élément. Toute
    /// autre sorte de noeud est une erreur de programmation.
    pub fn element_ref(&self) -> &Element {
        match &self.node_data {
            | NodeData::Element(element) => element,
            | _ => panic!("Élément attendu."),
        }
    }

    /// Retourne la donnée du noeud, qui doit être un document.
    pub fn document_ref(&self) -> &Document {
        match &self.node_data {
            | NodeData::Document(document) => document,
            | _ => panic!("Document attendu."),
        }
    }

    /// Retourne la donnée du noeud, qui doit être un doctype.
    pub fn doctype_ref(&self) -> &DocumentType {
        match &self.node_data {
            | NodeData::DocumentType(doctype) => doctype,
            | _ => panic!("Doctype attendu."),
        }
    }

    /// Retourne la donnée du noeud, qui doit être un noeud de données
    /// de caractères (texte ou commentaire).
    pub fn character_data_ref(&self) -> &CharacterData {
        match &self.node_data {
            | NodeData::CharacterData(character_data) => character_data,
            | _ => panic!("Données de caractères attendues."),
        }
    }

    pub fn isin_html_namespace(&self) -> bool {
        self.element_ref().isin_html_namespace()
    }

    pub fn is_mathml_text_integration_point(&self) -> bool {
        self.element_ref().is_mathml_text_integration_point()
    }

    pub fn is_html_integration_point(&self) -> bool {
        self.element_ref().is_html_integration_point()
    }
}
