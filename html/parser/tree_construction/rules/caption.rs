/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_elements::{interface::IsOneOfTagsInterface, tag_names};

use crate::{
    state::{InsertionMode, Scope},
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
    },
    HTMLParserState,
};

impl HTMLTreeConstruction {
    /// Ferme la légende courante : la pile est dépilée jusqu'à
    /// l'élément caption inclus et la liste des éléments de mise en
    /// forme actifs est vidée jusqu'au dernier marqueur.
    fn close_caption(&mut self) -> bool {
        if self
            .stack_of_open_elements
            .pop_until(Scope::Table, [tag_names::caption])
        {
            self.list_of_active_formatting_elements
                .clear_up_to_the_last_marker();
            self.insertion_mode.switch_to(InsertionMode::InTable);
            return true;
        }
        false
    }

    pub(crate) fn handle_in_caption_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "thead", "tr"
            //
            // Fermer la légende et retraiter le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::caption,
                tag_names::col,
                tag_names::colgroup,
                tag_names::tbody,
                tag_names::td,
                tag_names::tfoot,
                tag_names::thead,
                tag_names::tr,
            ]) =>
            {
                if self.close_caption() {
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore (cas du fragment) */
            }

            // A start tag whose tag name is "select"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::select == name => {
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(token.as_tag());
                self.set_frameset_not_ok();
                self.insertion_mode
                    .switch_to(InsertionMode::InSelectInTable);
            }

            // An end tag whose tag name is "caption"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::caption == name => {
                if !self.close_caption() {
                    self.parse_error(&token);
                    /* Ignore */
                }
            }

            // An end tag whose tag name is "table"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::table == name => {
                if self.close_caption() {
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is one of: "body", "col",
            // "colgroup", "html", "tbody", "td", "tfoot", "th",
            // "thead", "tr"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::body,
                tag_names::col,
                tag_names::colgroup,
                tag_names::html,
                tag_names::tbody,
                tag_names::td,
                tag_names::tfoot,
                tag_names::th,
                tag_names::thead,
                tag_names::tr,
            ]) =>
            {
                self.parse_error(&token);
                /* Ignore */
            }

            // Anything else
            //
            // Traiter le jeton selon les règles du mode "in body".
            | _ => {
                return self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                );
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }
}
