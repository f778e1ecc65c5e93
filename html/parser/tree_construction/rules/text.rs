/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_elements::tag_names;

use crate::{
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
    },
    HTMLParserState,
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_text_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Insérer le texte. Une nouvelle ligne en tête du premier
            // texte d'un élément textarea est élidée.
            | HTMLToken::Text(ref text) => {
                let mut data = text.as_str();

                let top = self.top();
                if !top.is_document()
                    && tag_names::textarea
                        == top.element_ref().local_name()
                    && !top.has_children()
                {
                    data = data.strip_prefix('\r').unwrap_or(data);
                    data = data.strip_prefix('\n').unwrap_or(data);
                }

                if data.is_empty() {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }

                let data = data.to_owned();
                self.insert_text(&data);
            }

            // An end-of-file token
            //
            // Erreur d'analyse. Dépiler le noeud actuel, revenir au
            // mode d'insertion original, puis retraiter le jeton.
            | HTMLToken::EOF => {
                self.parse_error(&token);
                self.stack_of_open_elements.pop();
                self.switch_back_to_original_insertion_mode();
                return self.dispatch(token);
            }

            // Any end tag
            //
            // Dépiler le noeud actuel et revenir au mode d'insertion
            // original.
            | HTMLToken::Tag(HTMLTagToken { is_end: true, .. }) => {
                self.stack_of_open_elements.pop();
                self.switch_back_to_original_insertion_mode();
            }

            // Anything else
            //
            // Revenir au mode d'insertion original et retraiter le
            // jeton.
            | _ => {
                self.switch_back_to_original_insertion_mode();
                return self.dispatch(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }
}
