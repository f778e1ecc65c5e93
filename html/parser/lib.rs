/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod error;
mod interface;
mod state;
mod token;
mod tree_construction;

use std::ops::ControlFlow;

use dom::node::{DocumentNode, Node};
use html_elements::{interface::IsOneOfTagsInterface, tag_names};
use infra::structure::tree::TreeNode;
use macros::dd;

pub use self::{
    error::HTMLParseError,
    interface::HTMLTokenizerInterface,
    token::{ForceQuirksFlag, HTMLTagToken, HTMLToken},
    tree_construction::HTMLTreeConstruction,
};

// --------- //
// Structure //
// --------- //

/// Le pilote de l'étape de construction de l'arbre : tire les jetons
/// du tokenizer un à un et les soumet au dispatcher, jusqu'à la fin du
/// flux ou une erreur de lecture.
pub struct HTMLParser<T>
where
    T: HTMLTokenizerInterface,
{
    tokenizer: T,
    tree_construction: HTMLTreeConstruction,
    fragment_root: Option<TreeNode<Node>>,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
pub enum HTMLParserState {
    Continue,
    Ignore,
}

#[derive(Debug)]
pub enum HTMLParserFlag {
    Stop,
}

// -------------- //
// Implémentation //
// -------------- //

impl<T> HTMLParser<T>
where
    T: HTMLTokenizerInterface,
{
    pub fn new(document: DocumentNode, tokenizer: T) -> Self {
        Self {
            tokenizer,
            tree_construction: HTMLTreeConstruction::new(document),
            fragment_root: None,
        }
    }

    /// Construit un analyseur de fragment. Lorsque l'élément de
    /// contexte est un élément de texte brut, le tokenizer est forcé
    /// dans le mode correspondant via son point d'accroche `raw tag`.
    pub fn with_context(
        document: DocumentNode,
        mut tokenizer: T,
        context_element: Option<TreeNode<Node>>,
    ) -> Self {
        if let Some(context) = context_element.as_ref() {
            let name = context.element_ref().local_name().to_owned();
            if name.as_str().is_one_of([
                tag_names::iframe,
                tag_names::noembed,
                tag_names::noframes,
                tag_names::noscript,
                tag_names::plaintext,
                tag_names::script,
                tag_names::style,
                tag_names::title,
                tag_names::textarea,
                tag_names::xmp,
            ]) {
                tokenizer.set_raw_tag(&name);
            }
        }

        let mut tree_construction = HTMLTreeConstruction::new(document);
        let fragment_root =
            tree_construction.init_fragment(context_element);

        Self {
            tokenizer,
            tree_construction,
            fragment_root: Some(fragment_root),
        }
    }

    /// L'hôte peut désactiver le script ; par défaut, le drapeau est
    /// considéré comme activé.
    pub fn set_scripting_enabled(&mut self, enabled: bool) {
        self.tree_construction.set_scripting_enabled(enabled);
    }

    pub fn scripting_enabled(&self) -> bool {
        self.tree_construction.scripting_enabled()
    }

    /// Boucle de l'analyse : chaque jeton est traité jusqu'à ce que le
    /// jeton de fin de flux soit consommé. Une erreur de lecture du
    /// tokenizer abandonne l'analyse et remonte à l'appelant.
    pub fn run(&mut self) -> Result<(), HTMLParseError> {
        loop {
            let token = self.tokenizer.consume_next_token()?;
            let reached_eof = token.is_eof();

            dd!(&token);

            if let ControlFlow::Break(HTMLParserFlag::Stop) =
                self.tree_construction.process_token(token)
            {
                break;
            }

            if reached_eof {
                break;
            }
        }

        Ok(())
    }
}

// -------- //
// Fonction //
// -------- //

/// Analyse un document complet : retourne le noeud document racine.
/// La fin de flux termine l'analyse ; toute erreur de lecture du
/// tokenizer est propagée.
pub fn parse_document<T>(
    tokenizer: T,
) -> Result<DocumentNode, HTMLParseError>
where
    T: HTMLTokenizerInterface,
{
    let document = DocumentNode::new();
    let mut parser = HTMLParser::new(document.clone(), tokenizer);
    parser.run()?;
    Ok(document)
}

/// Analyse un fragment : avec un élément de contexte, retourne les
/// enfants de la racine `<html>` synthétique, détachés de leur
/// parent ; sans contexte, les enfants du document.
pub fn parse_fragment<T>(
    tokenizer: T,
    context_element: Option<TreeNode<Node>>,
) -> Result<Vec<TreeNode<Node>>, HTMLParseError>
where
    T: HTMLTokenizerInterface,
{
    let document = DocumentNode::new();
    let has_context = context_element.is_some();
    let mut parser = HTMLParser::with_context(
        document.clone(),
        tokenizer,
        context_element,
    );
    parser.run()?;

    let parent: TreeNode<Node> = if has_context {
        parser
            .fragment_root
            .take()
            .expect("La racine synthétique du fragment")
    } else {
        document.into()
    };

    let children = parent.children();
    for child in &children {
        child.detach();
    }

    Ok(children)
}
