/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_elements::{
    interface::IsOneOfTagsInterface, tag_attributes, tag_names,
};

use crate::{
    state::{InsertionMode, Scope},
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        is_all_whitespace, split_whitespace_prefix, strip_nulls,
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
    },
    HTMLParserFlag, HTMLParserState,
};

impl HTMLTreeConstruction {
    /// Vrai quand le noeud actuel fait partie de la structure d'une
    /// table, c'est-à-dire quand une insertion ordinaire la
    /// détruirait.
    fn current_node_isin_table_structure(&self) -> bool {
        self.current_node().is_some_and(|cnode| {
            cnode.element_ref().local_name().is_one_of([
                tag_names::table,
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
                tag_names::tr,
            ])
        })
    }

    /// Traite un jeton selon les règles du mode "in body", avec le
    /// `foster parenting` armé si le noeud actuel fait partie de la
    /// structure d'une table.
    fn process_in_body_with_foster_parenting(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        let foster = self.current_node_isin_table_structure();
        if foster {
            self.set_foster_parenting(true);
        }
        let flow = self
            .process_using_the_rules_for(InsertionMode::InBody, token);
        self.set_foster_parenting(false);
        flow
    }

    pub(crate) fn handle_in_table_insertion_mode(
        &mut self,
        token: HTMLToken,
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

            // A character token, if the current node is table, tbody,
            // tfoot, thead, or tr element
            //
            // Un texte entièrement blanc est inséré dans le noeud
            // actuel ; tout autre texte est redirigé par le parent
            // nourricier via les règles du mode "in body".
            | HTMLToken::Text(ref text) => {
                let data = strip_nulls(text);
                if self.current_node_isin_table_structure()
                    && is_all_whitespace(&data)
                {
                    self.insert_text(&data);
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Continue,
                    );
                }

                self.parse_error(&token);
                return self.process_in_body_with_foster_parenting(
                    HTMLToken::Text(data),
                );
            }

            // A comment token
            //
            // Insérer un commentaire.
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

            // A start tag whose tag name is "caption"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::caption == name => {
                self.stack_of_open_elements
                    .clear_to_context(Scope::Table);
                self.list_of_active_formatting_elements
                    .insert_marker_at_end();
                self.insert_html_element(token.as_tag());
                self.insertion_mode
                    .switch_to(InsertionMode::InCaption);
            }

            // A start tag whose tag name is "colgroup"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::colgroup == name => {
                self.stack_of_open_elements
                    .clear_to_context(Scope::Table);
                self.insert_html_element(token.as_tag());
                self.insertion_mode
                    .switch_to(InsertionMode::InColumnGroup);
            }

            // A start tag whose tag name is "col"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::col == name => {
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::colgroup,
                ));
                return self.dispatch(token);
            }

            // A start tag whose tag name is one of: "tbody", "tfoot",
            // "thead"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
            ]) =>
            {
                self.stack_of_open_elements
                    .clear_to_context(Scope::Table);
                self.insert_html_element(token.as_tag());
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
            }

            // A start tag whose tag name is one of: "td", "th", "tr"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::td,
                tag_names::th,
                tag_names::tr,
            ]) =>
            {
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::tbody,
                ));
                return self.dispatch(token);
            }

            // A start tag whose tag name is "table"
            //
            // Erreur d'analyse. Fermer la table courante puis
            // retraiter le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::table == name => {
                self.parse_error(&token);
                if self
                    .stack_of_open_elements
                    .pop_until(Scope::Table, [tag_names::table])
                {
                    self.reset_insertion_mode();
                    return self.dispatch(token);
                }
                /* Ignore (cas du fragment) */
            }

            // A start tag whose tag name is one of: "style", "script"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name
                .is_one_of([tag_names::style, tag_names::script]) =>
            {
                return self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                );
            }

            // A start tag whose tag name is "input", if the token has
            // an attribute "type" whose value is "hidden"
            //
            // Un input caché est inséré dans la table puis aussitôt
            // dépilé ; tout autre input suit le cas "anything else".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::input == name
                && token
                    .as_tag()
                    .attribute(tag_attributes::ty.as_str())
                    .is_some_and(|value| {
                        value.eq_ignore_ascii_case("hidden")
                    }) =>
            {
                self.parse_error(&token);
                self.insert_html_element(token.as_tag());
                self.stack_of_open_elements.pop();
            }

            // A start tag whose tag name is "form"
            //
            // Inséré puis aussitôt dépilé ; le pointeur de formulaire
            // n'est renseigné que s'il était vide.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::form == name => {
                self.parse_error(&token);
                if self.form_element_pointer_is_set() {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }
                self.insert_html_element(token.as_tag());
                let form = self.stack_of_open_elements.pop();
                self.set_form_element_pointer(form);
            }

            // A start tag whose tag name is "select"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::select == name => {
                self.reconstruct_active_formatting_elements();
                if self.current_node_isin_table_structure() {
                    self.set_foster_parenting(true);
                }
                self.insert_html_element(token.as_tag());
                self.set_foster_parenting(false);
                self.set_frameset_not_ok();
                self.insertion_mode
                    .switch_to(InsertionMode::InSelectInTable);
            }

            // An end tag whose tag name is "table"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::table == name => {
                if self
                    .stack_of_open_elements
                    .pop_until(Scope::Table, [tag_names::table])
                {
                    self.reset_insertion_mode();
                } else {
                    self.parse_error(&token);
                    /* Ignore */
                }
            }

            // An end tag whose tag name is one of: "body", "caption",
            // "col", "colgroup", "html", "tbody", "td", "tfoot", "th",
            // "thead", "tr"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::body,
                tag_names::caption,
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
            // Erreur d'analyse. Traiter selon les règles du mode
            // "in body", avec le parent nourricier armé si besoin.
            | _ => {
                self.parse_error(&token);
                return self
                    .process_in_body_with_foster_parenting(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_in_column_group_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Les espaces de tête sont insérés dans le noeud actuel ;
            // le reste suit le cas "anything else".
            | HTMLToken::Text(ref text) => {
                let (whitespace, rest) = split_whitespace_prefix(text);
                if !whitespace.is_empty() {
                    let whitespace = whitespace.to_owned();
                    self.insert_text(&whitespace);
                }

                if rest.is_empty() {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Continue,
                    );
                }

                let rest = rest.to_owned();
                return self
                    .column_group_anything_else(HTMLToken::Text(rest));
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

            // A start tag whose tag name is "col"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::col == name => {
                self.insert_html_element(token.as_tag());
                self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_tag();
            }

            // An end tag whose tag name is "colgroup"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::colgroup == name => {
                if !self.current_node_is_root() {
                    self.stack_of_open_elements.pop();
                    self.insertion_mode
                        .switch_to(InsertionMode::InTable);
                }
            }

            // An end tag whose tag name is "col"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::col == name => {
                self.parse_error(&token);
                /* Ignore */
            }

            // Anything else
            | _ => {
                return self.column_group_anything_else(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    /// Le cas "anything else" du mode "in column group" : fermer le
    /// colgroup et retraiter, sauf dans le cas d'un fragment dont la
    /// racine est au sommet de la pile.
    fn column_group_anything_else(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        if self.current_node_is_root() {
            return HTMLTreeConstructionControlFlow::Continue(
                HTMLParserState::Ignore,
            );
        }
        self.stack_of_open_elements.pop();
        self.insertion_mode.switch_to(InsertionMode::InTable);
        self.dispatch(token)
    }

    fn current_node_is_root(&self) -> bool {
        self.current_node().is_some_and(|cnode| {
            tag_names::html == cnode.element_ref().local_name()
        })
    }

    pub(crate) fn handle_in_table_body_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A start tag whose tag name is "tr"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::tr == name => {
                self.stack_of_open_elements
                    .clear_to_context(Scope::TableBody);
                self.insert_html_element(token.as_tag());
                self.insertion_mode.switch_to(InsertionMode::InRow);
            }

            // A start tag whose tag name is one of: "td", "th"
            //
            // Erreur d'analyse. Créer un élément tr implicite puis
            // retraiter le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([tag_names::td, tag_names::th]) => {
                self.parse_error(&token);
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::tr,
                ));
                return self.dispatch(token);
            }

            // A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::caption,
                tag_names::col,
                tag_names::colgroup,
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
            ]) =>
            {
                if self.stack_of_open_elements.pop_until(
                    Scope::Table,
                    [
                        tag_names::tbody,
                        tag_names::thead,
                        tag_names::tfoot,
                    ],
                ) {
                    self.insertion_mode
                        .switch_to(InsertionMode::InTable);
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore (cas du fragment) */
            }

            // An end tag whose tag name is one of: "tbody", "tfoot",
            // "thead"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
            ]) =>
            {
                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                if self
                    .stack_of_open_elements
                    .has_element_in_scope(Scope::Table, [tag_name])
                {
                    self.stack_of_open_elements
                        .clear_to_context(Scope::TableBody);
                    self.stack_of_open_elements.pop();
                    self.insertion_mode
                        .switch_to(InsertionMode::InTable);
                } else {
                    self.parse_error(&token);
                }
            }

            // An end tag whose tag name is "table"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::table == name => {
                if self.stack_of_open_elements.pop_until(
                    Scope::Table,
                    [
                        tag_names::tbody,
                        tag_names::thead,
                        tag_names::tfoot,
                    ],
                ) {
                    self.insertion_mode
                        .switch_to(InsertionMode::InTable);
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is one of: "body", "caption",
            // "col", "colgroup", "html", "td", "th", "tr"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::body,
                tag_names::caption,
                tag_names::col,
                tag_names::colgroup,
                tag_names::html,
                tag_names::td,
                tag_names::th,
                tag_names::tr,
            ]) =>
            {
                self.parse_error(&token);
                /* Ignore */
            }

            // A comment token
            | HTMLToken::Comment(comment) => {
                self.insert_comment(comment);
            }

            // Anything else
            //
            // Traiter le jeton selon les règles du mode "in table".
            | _ => {
                return self.process_using_the_rules_for(
                    InsertionMode::InTable,
                    token,
                );
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_in_row_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A start tag whose tag name is one of: "td", "th"
            //
            // Insérer la cellule et poser un marqueur dans la liste
            // des éléments de mise en forme actifs.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([tag_names::td, tag_names::th]) => {
                self.stack_of_open_elements
                    .clear_to_context(Scope::TableRow);
                self.insert_html_element(token.as_tag());
                self.list_of_active_formatting_elements
                    .insert_marker_at_end();
                self.insertion_mode.switch_to(InsertionMode::InCell);
            }

            // A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead", "tr"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::caption,
                tag_names::col,
                tag_names::colgroup,
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
                tag_names::tr,
            ]) =>
            {
                if self
                    .stack_of_open_elements
                    .pop_until(Scope::Table, [tag_names::tr])
                {
                    self.insertion_mode
                        .switch_to(InsertionMode::InTableBody);
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is "tr"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::tr == name => {
                if self
                    .stack_of_open_elements
                    .pop_until(Scope::Table, [tag_names::tr])
                {
                    self.insertion_mode
                        .switch_to(InsertionMode::InTableBody);
                } else {
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
                if self
                    .stack_of_open_elements
                    .pop_until(Scope::Table, [tag_names::tr])
                {
                    self.insertion_mode
                        .switch_to(InsertionMode::InTableBody);
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is one of: "tbody", "tfoot",
            // "thead"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
            ]) =>
            {
                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                if self
                    .stack_of_open_elements
                    .has_element_in_scope(Scope::Table, [tag_name])
                {
                    self.process_implied_token(
                        HTMLToken::new_end_tag(tag_names::tr),
                    );
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is one of: "body", "caption",
            // "col", "colgroup", "html", "td", "th"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::body,
                tag_names::caption,
                tag_names::col,
                tag_names::colgroup,
                tag_names::html,
                tag_names::td,
                tag_names::th,
            ]) =>
            {
                self.parse_error(&token);
                /* Ignore */
            }

            // Anything else
            //
            // Traiter le jeton selon les règles du mode "in table".
            | _ => {
                return self.process_using_the_rules_for(
                    InsertionMode::InTable,
                    token,
                );
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_in_cell_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr"
            //
            // Fermer la cellule et retraiter le jeton.
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
                tag_names::th,
                tag_names::thead,
                tag_names::tr,
            ]) =>
            {
                if self.stack_of_open_elements.pop_until(
                    Scope::Table,
                    [tag_names::td, tag_names::th],
                ) {
                    self.list_of_active_formatting_elements
                        .clear_up_to_the_last_marker();
                    self.insertion_mode
                        .switch_to(InsertionMode::InRow);
                    return self.dispatch(token);
                }
                self.parse_error(&token);
                /* Ignore (cas du fragment) */
            }

            // An end tag whose tag name is one of: "td", "th"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([tag_names::td, tag_names::th]) => {
                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                if !self
                    .stack_of_open_elements
                    .pop_until(Scope::Table, [tag_name])
                {
                    self.parse_error(&token);
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }
                self.list_of_active_formatting_elements
                    .clear_up_to_the_last_marker();
                self.insertion_mode.switch_to(InsertionMode::InRow);
            }

            // An end tag whose tag name is one of: "body", "caption",
            // "col", "colgroup", "html"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::body,
                tag_names::caption,
                tag_names::col,
                tag_names::colgroup,
                tag_names::html,
            ]) =>
            {
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is one of: "table", "tbody",
            // "tfoot", "thead", "tr"
            //
            // Fermer la cellule et retraiter le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::table,
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
                tag_names::tr,
            ]) =>
            {
                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                if !self
                    .stack_of_open_elements
                    .has_element_in_scope(Scope::Table, [tag_name])
                {
                    self.parse_error(&token);
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }
                self.stack_of_open_elements.pop_until(
                    Scope::Table,
                    [tag_names::td, tag_names::th],
                );
                self.list_of_active_formatting_elements
                    .clear_up_to_the_last_marker();
                self.insertion_mode.switch_to(InsertionMode::InRow);
                return self.dispatch(token);
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
