/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::node::{CommentNode, DoctypeNode, QuirksMode};

use crate::{
    state::InsertionMode,
    token::HTMLToken,
    tree_construction::{
        split_whitespace_prefix, HTMLTreeConstruction,
        HTMLTreeConstructionControlFlow,
    },
    HTMLParserState,
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_initial_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token that consists only of whitespace
            //
            // Ignorer le jeton. Un reste non blanc retombe dans le cas
            // "anything else" ci-dessous.
            | HTMLToken::Text(ref text) => {
                let (_, rest) = split_whitespace_prefix(text);
                if rest.is_empty() {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }

                self.parse_error(&token);
                self.document
                    .document_ref()
                    .set_quirks_mode(QuirksMode::Yes);
                self.insertion_mode
                    .switch_to(InsertionMode::BeforeHTML);
                let rest = rest.to_owned();
                self.dispatch(HTMLToken::Text(rest))
            }

            // A comment token
            //
            // Insérer un commentaire comme dernier enfant du document.
            | HTMLToken::Comment(comment) => {
                self.document.append_child(CommentNode::new(comment));
                HTMLTreeConstructionControlFlow::Continue(
                    HTMLParserState::Continue,
                )
            }

            // A DOCTYPE token
            //
            // Ajouter un noeud doctype au document, avec le nom donné
            // (ou la chaîne vide s'il est manquant), puis régler le
            // mode quirks du document d'après la table des
            // déclencheurs. Passer le mode d'insertion à
            // "before html".
            | HTMLToken::DOCTYPE {
                ref name,
                ref public_identifier,
                ref system_identifier,
                ..
            } => {
                let doctype = DoctypeNode::new(
                    name.as_deref().unwrap_or_default(),
                    public_identifier.as_deref().unwrap_or_default(),
                    system_identifier.as_deref().unwrap_or_default(),
                );
                self.document.append_child(doctype);
                self.document
                    .document_ref()
                    .set_quirks_mode(token.quirks_mode());
                self.insertion_mode
                    .switch_to(InsertionMode::BeforeHTML);
                HTMLTreeConstructionControlFlow::Continue(
                    HTMLParserState::Continue,
                )
            }

            // Anything else
            //
            // Erreur d'analyse : document sans doctype. Mettre le
            // document en mode quirks, passer le mode d'insertion à
            // "before html" et retraiter le jeton.
            | _ => {
                self.parse_error(&token);
                self.document
                    .document_ref()
                    .set_quirks_mode(QuirksMode::Yes);
                self.insertion_mode
                    .switch_to(InsertionMode::BeforeHTML);
                self.dispatch(token)
            }
        }
    }
}
