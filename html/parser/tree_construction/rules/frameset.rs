/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::node::CommentNode;
use html_elements::tag_names;

use crate::{
    state::InsertionMode,
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        is_ascii_whitespace, HTMLTreeConstruction,
        HTMLTreeConstructionControlFlow,
    },
    HTMLParserFlag, HTMLParserState,
};

/// Dans les modes frameset, seuls les caractères blancs d'un jeton de
/// texte sont conservés.
fn retain_whitespace(text: &str) -> String {
    text.chars().filter(|ch| is_ascii_whitespace(*ch)).collect()
}

impl HTMLTreeConstruction {
    pub(crate) fn handle_in_frameset_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Les caractères blancs sont insérés ; le reste est une
            // erreur d'analyse et est ignoré.
            | HTMLToken::Text(ref text) => {
                let whitespace = retain_whitespace(text);
                if whitespace.len() < text.len() {
                    self.parse_error(&token);
                }
                if !whitespace.is_empty() {
                    self.insert_text(&whitespace);
                }
            }

            // A comment token
            | HTMLToken::Comment(comment) => {
                self.insert_comment(comment);
            }

            // A DOCTYPE token
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::DOCTYPE { .. } => {
                self.parse_error(&token);
                /* Ignore */
            }

            // A start tag whose tag name is "html"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::html == name => {
                return self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                );
            }

            // A start tag whose tag name is "frameset"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::frameset == name => {
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is "frame"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::frame == name => {
                self.insert_html_element(token.as_tag());
                self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_tag();
            }

            // A start tag whose tag name is "noframes"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::noframes == name => {
                return self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                );
            }

            // An end tag whose tag name is "frameset"
            //
            // Le frameset racine n'est jamais dépilé (cas du
            // fragment). Quand le dépilement expose autre chose qu'un
            // frameset, passer le mode d'insertion à
            // "after frameset".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::frameset == name => {
                let current_is_root = self
                    .current_node()
                    .is_some_and(|cnode| {
                        tag_names::html
                            == cnode.element_ref().local_name()
                    });

                if current_is_root {
                    self.parse_error(&token);
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }

                self.stack_of_open_elements.pop();

                let current_is_frameset = self
                    .current_node()
                    .is_some_and(|cnode| {
                        tag_names::frameset
                            == cnode.element_ref().local_name()
                    });
                if !current_is_frameset {
                    self.insertion_mode
                        .switch_to(InsertionMode::AfterFrameset);
                }
            }

            // An end-of-file token
            //
            // Si le noeud actuel n'est pas l'élément racine, il s'agit
            // d'une erreur d'analyse. Arrêter l'analyse.
            | HTMLToken::EOF => {
                let current_is_root = self
                    .current_node()
                    .is_some_and(|cnode| {
                        tag_names::html
                            == cnode.element_ref().local_name()
                    });
                if !current_is_root {
                    self.parse_error(&token);
                }
                return HTMLTreeConstructionControlFlow::Break(
                    HTMLParserFlag::Stop,
                );
            }

            // Anything else
            //
            // Erreur d'analyse. Ignorer le jeton.
            | _ => {
                self.parse_error(&token);
                /* Ignore */
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_after_frameset_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Seuls les caractères blancs sont conservés.
            | HTMLToken::Text(ref text) => {
                let whitespace = retain_whitespace(text);
                if whitespace.len() < text.len() {
                    self.parse_error(&token);
                }
                if !whitespace.is_empty() {
                    self.insert_text(&whitespace);
                }
            }

            // A comment token
            | HTMLToken::Comment(comment) => {
                self.insert_comment(comment);
            }

            // A DOCTYPE token
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::DOCTYPE { .. } => {
                self.parse_error(&token);
                /* Ignore */
            }

            // A start tag whose tag name is "html"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::html == name => {
                return self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                );
            }

            // A start tag whose tag name is "noframes"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::noframes == name => {
                return self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                );
            }

            // An end tag whose tag name is "html"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::html == name => {
                self.insertion_mode
                    .switch_to(InsertionMode::AfterAfterFrameset);
            }

            // An end-of-file token
            //
            // Arrêter l'analyse.
            | HTMLToken::EOF => {
                return HTMLTreeConstructionControlFlow::Break(
                    HTMLParserFlag::Stop,
                );
            }

            // Anything else
            //
            // Erreur d'analyse. Ignorer le jeton.
            | _ => {
                self.parse_error(&token);
                /* Ignore */
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_after_after_frameset_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A comment token
            //
            // Insérer un commentaire comme dernier enfant du document.
            | HTMLToken::Comment(comment) => {
                self.document.append_child(CommentNode::new(comment));
            }

            // A character token
            //
            // Les caractères blancs restants sont traités selon les
            // règles du mode "in body".
            | HTMLToken::Text(ref text) => {
                let whitespace = retain_whitespace(text);
                if whitespace.len() < text.len() {
                    self.parse_error(&token);
                }
                if !whitespace.is_empty() {
                    return self.process_using_the_rules_for(
                        InsertionMode::InBody,
                        HTMLToken::Text(whitespace),
                    );
                }
            }

            // A DOCTYPE token
            | HTMLToken::DOCTYPE { .. } => {
                return self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                );
            }

            // A start tag whose tag name is "html"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::html == name => {
                return self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                );
            }

            // A start tag whose tag name is "noframes"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::noframes == name => {
                return self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                );
            }

            // An end-of-file token
            //
            // Arrêter l'analyse.
            | HTMLToken::EOF => {
                return HTMLTreeConstructionControlFlow::Break(
                    HTMLParserFlag::Stop,
                );
            }

            // Anything else
            //
            // Erreur d'analyse. Ignorer le jeton.
            | _ => {
                self.parse_error(&token);
                /* Ignore */
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }
}
