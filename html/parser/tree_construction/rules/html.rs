/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::node::CommentNode;
use html_elements::{interface::IsOneOfTagsInterface, tag_names};

use crate::{
    state::InsertionMode,
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        split_whitespace_prefix, HTMLTreeConstruction,
        HTMLTreeConstructionControlFlow,
    },
    HTMLParserState,
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_before_html_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A DOCTYPE token
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::DOCTYPE { .. } => {
                self.parse_error(&token);
                return HTMLTreeConstructionControlFlow::Continue(
                    HTMLParserState::Ignore,
                );
            }

            // A character token that consists only of whitespace
            //
            // Ignorer le jeton. Un reste non blanc retombe dans le cas
            // "anything else".
            | HTMLToken::Text(ref text) => {
                let (_, rest) = split_whitespace_prefix(text);
                if rest.is_empty() {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }

                let rest = rest.to_owned();
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::html,
                ));
                return self.dispatch(HTMLToken::Text(rest));
            }

            // A comment token
            //
            // Insérer un commentaire comme dernier enfant du document.
            | HTMLToken::Comment(comment) => {
                self.document.append_child(CommentNode::new(comment));
            }

            // A start tag whose tag name is "html"
            //
            // Créer l'élément racine, l'ajouter au document et passer
            // le mode d'insertion à "before head".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::html == name => {
                self.insert_html_element(token.as_tag());
                self.insertion_mode
                    .switch_to(InsertionMode::BeforeHead);
            }

            // An end tag whose tag name is one of: "head", "body",
            // "html", "br"
            //
            // Agir comme dans le cas "anything else".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::head,
                tag_names::body,
                tag_names::html,
                tag_names::br,
            ]) =>
            {
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::html,
                ));
                return self.dispatch(token);
            }

            // Any other end tag
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken { is_end: true, .. }) => {
                self.parse_error(&token);
                return HTMLTreeConstructionControlFlow::Continue(
                    HTMLParserState::Ignore,
                );
            }

            // Anything else
            //
            // Créer un élément html implicite, puis retraiter le
            // jeton.
            | _ => {
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::html,
                ));
                return self.dispatch(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }
}
