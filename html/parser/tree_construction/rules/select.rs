/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_elements::{interface::IsOneOfTagsInterface, tag_names};

use crate::{
    state::{InsertionMode, Scope},
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        strip_nulls, HTMLTreeConstruction,
        HTMLTreeConstructionControlFlow,
    },
    HTMLParserFlag, HTMLParserState,
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_in_select_insertion_mode(
        &mut self,
        mut token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // An end-of-file token
            //
            // Arrêter l'analyse.
            | HTMLToken::EOF => {
                return HTMLTreeConstructionControlFlow::Break(
                    HTMLParserFlag::Stop,
                );
            }

            // A character token
            //
            // Insérer le texte, caractères NUL exclus.
            | HTMLToken::Text(ref text) => {
                let data = strip_nulls(text);
                if !data.is_empty() {
                    self.insert_text(&data);
                }
            }

            // A comment token
            //
            // Insérer un commentaire au niveau du noeud actuel.
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

            // A start tag whose tag name is "option"
            //
            // Une option encore ouverte est d'abord dépilée.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::option == name => {
                if self.current_node_is(tag_names::option) {
                    self.stack_of_open_elements.pop();
                }
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is "optgroup"
            //
            // Une option, puis un optgroup encore ouverts sont
            // d'abord dépilés.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::optgroup == name => {
                if self.current_node_is(tag_names::option) {
                    self.stack_of_open_elements.pop();
                }
                if self.current_node_is(tag_names::optgroup) {
                    self.stack_of_open_elements.pop();
                }
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is "select"
            //
            // Erreur d'analyse. Agir comme une balise de fin
            // </select>.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::select == name => {
                self.parse_error(&token);
                token.as_tag_mut().is_end = true;
                return self.dispatch(token);
            }

            // A start tag whose tag name is one of: "input", "keygen",
            // "textarea"
            //
            // Erreur d'analyse. Fermer le select en portée puis
            // retraiter le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::input,
                tag_names::keygen,
                tag_names::textarea,
            ]) =>
            {
                self.parse_error(&token);
                if self.stack_of_open_elements.has_element_in_scope(
                    Scope::Select,
                    [tag_names::select],
                ) {
                    self.process_implied_token(
                        HTMLToken::new_end_tag(tag_names::select),
                    );
                    return self.dispatch(token);
                }
                /* Ignore (cas du fragment) */
            }

            // A start tag whose tag name is "script"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::script == name => {
                return self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                );
            }

            // An end tag whose tag name is "option"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::option == name => {
                if self.current_node_is(tag_names::option) {
                    self.stack_of_open_elements.pop();
                } else {
                    self.parse_error(&token);
                }
            }

            // An end tag whose tag name is "optgroup"
            //
            // Un optgroup situé juste sous une option au sommet de la
            // pile est fermé avec elle.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::optgroup == name => {
                let mut idx = self.stack_of_open_elements.len() - 1;
                if self.current_node_is(tag_names::option) && idx > 0 {
                    idx -= 1;
                }
                if tag_names::optgroup
                    == self.stack_of_open_elements[idx]
                        .element_ref()
                        .local_name()
                {
                    self.stack_of_open_elements.truncate(idx);
                } else {
                    self.parse_error(&token);
                }
            }

            // An end tag whose tag name is "select"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::select == name => {
                if self.stack_of_open_elements.pop_until(
                    Scope::Select,
                    [tag_names::select],
                ) {
                    self.reset_insertion_mode();
                } else {
                    self.parse_error(&token);
                    /* Ignore (cas du fragment) */
                }
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

    pub(crate) fn handle_in_select_in_table_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A start tag or an end tag whose tag name is one of:
            // "caption", "table", "tbody", "tfoot", "thead", "tr",
            // "td", "th"
            //
            // Une balise de début, ou une balise de fin dont la cible
            // est en portée de table, ferme d'abord le select.
            | HTMLToken::Tag(HTMLTagToken {
                ref name, is_end, ..
            }) if name.is_one_of([
                tag_names::caption,
                tag_names::table,
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
                tag_names::tr,
                tag_names::td,
                tag_names::th,
            ]) =>
            {
                self.parse_error(&token);

                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                if !is_end
                    || self
                        .stack_of_open_elements
                        .has_element_in_scope(Scope::Table, [tag_name])
                {
                    self.process_implied_token(
                        HTMLToken::new_end_tag(tag_names::select),
                    );
                    return self.dispatch(token);
                }
                /* Ignore */
            }

            // Anything else
            //
            // Traiter le jeton selon les règles du mode "in select".
            | _ => {
                return self.process_using_the_rules_for(
                    InsertionMode::InSelect,
                    token,
                );
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    fn current_node_is(&self, tag_name: tag_names) -> bool {
        self.current_node().is_some_and(|cnode| {
            tag_name == cnode.element_ref().local_name()
        })
    }
}
