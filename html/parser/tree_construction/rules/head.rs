/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

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
    pub(crate) fn handle_before_head_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
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
                    tag_names::head,
                ));
                return self.dispatch(HTMLToken::Text(rest));
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

            // A start tag whose tag name is "html"
            //
            // Traiter le jeton selon les règles du mode "in body".
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

            // A start tag whose tag name is "head"
            //
            // Insérer l'élément, le retenir comme pointeur head, puis
            // passer le mode d'insertion à "in head".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::head == name => {
                let head = self.insert_html_element(token.as_tag());
                self.head_element_pointer = Some(head);
                self.insertion_mode.switch_to(InsertionMode::InHead);
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
                    tag_names::head,
                ));
                return self.dispatch(token);
            }

            // Any other end tag
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken { is_end: true, .. }) => {
                self.parse_error(&token);
                /* Ignore */
            }

            // Anything else
            //
            // Créer un élément head implicite, puis retraiter le
            // jeton.
            | _ => {
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::head,
                ));
                return self.dispatch(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_in_head_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Les espaces de tête sont insérés dans le noeud actuel ;
            // le reste est retraité comme dans le cas "anything else".
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
                self.process_implied_token(HTMLToken::new_end_tag(
                    tag_names::head,
                ));
                return self.dispatch(HTMLToken::Text(rest));
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

            // A start tag whose tag name is one of: "base",
            // "basefont", "bgsound", "command", "link", "meta"
            //
            // Insérer l'élément, le dépiler aussitôt, et acquitter le
            // drapeau de fermeture automatique.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::base,
                tag_names::basefont,
                tag_names::bgsound,
                tag_names::command,
                tag_names::link,
                tag_names::meta,
            ]) =>
            {
                self.insert_html_element(token.as_tag());
                self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_tag();
            }

            // A start tag whose tag name is one of: "script", "title",
            // "noscript", "noframes", "style"
            //
            // Analyse générique d'un élément de texte brut : le
            // tokenizer bascule de lui-même, le mode d'insertion passe
            // à "text" après avoir sauvegardé le mode actuel.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::script,
                tag_names::title,
                tag_names::noscript,
                tag_names::noframes,
                tag_names::style,
            ]) =>
            {
                self.insert_html_element(token.as_tag());
                self.set_original_insertion_mode();
                self.insertion_mode.switch_to(InsertionMode::Text);
            }

            // A start tag whose tag name is "head"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::head == name => {
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is "head"
            //
            // Dépiler l'élément head. Tout autre sommet de pile à ce
            // stade est une erreur de programmation.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::head == name => {
                let popped = self
                    .stack_of_open_elements
                    .pop()
                    .expect("Un élément à dépiler");
                if tag_names::head != popped.element_ref().local_name()
                {
                    panic!(
                        "L'élément <head> est introuvable dans le \
                         mode d'insertion \"in head\"."
                    );
                }
                self.insertion_mode
                    .switch_to(InsertionMode::AfterHead);
            }

            // An end tag whose tag name is one of: "body", "html",
            // "br"
            //
            // Agir comme dans le cas "anything else".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::body,
                tag_names::html,
                tag_names::br,
            ]) =>
            {
                self.process_implied_token(HTMLToken::new_end_tag(
                    tag_names::head,
                ));
                return self.dispatch(token);
            }

            // Any other end tag
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken { is_end: true, .. }) => {
                self.parse_error(&token);
                /* Ignore */
            }

            // Anything else
            //
            // Fermer l'élément head implicitement, puis retraiter le
            // jeton.
            | _ => {
                self.process_implied_token(HTMLToken::new_end_tag(
                    tag_names::head,
                ));
                return self.dispatch(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_after_head_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Les espaces de tête sont insérés dans le noeud actuel ;
            // le reste est retraité comme dans le cas "anything else".
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
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::body,
                ));
                self.set_frameset_ok();
                return self.dispatch(HTMLToken::Text(rest));
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

            // A start tag whose tag name is "body"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::body == name => {
                self.insert_html_element(token.as_tag());
                self.set_frameset_not_ok();
                self.insertion_mode.switch_to(InsertionMode::InBody);
            }

            // A start tag whose tag name is "frameset"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::frameset == name => {
                self.insert_html_element(token.as_tag());
                self.insertion_mode
                    .switch_to(InsertionMode::InFrameset);
            }

            // A start tag whose tag name is one of: "base",
            // "basefont", "bgsound", "link", "meta", "noframes",
            // "script", "style", "title"
            //
            // Erreur d'analyse. L'élément head est repoussé sur la
            // pile le temps de traiter le jeton selon les règles du
            // mode "in head", puis en est retiré.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::base,
                tag_names::basefont,
                tag_names::bgsound,
                tag_names::link,
                tag_names::meta,
                tag_names::noframes,
                tag_names::script,
                tag_names::style,
                tag_names::title,
            ]) =>
            {
                self.parse_error(&token);

                let head = self
                    .head_element_pointer
                    .to_owned()
                    .expect("Le pointeur de l'élément head");
                self.stack_of_open_elements.put(head.to_owned());

                let flow = self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                );

                self.stack_of_open_elements.remove(&head);
                return flow;
            }

            // A start tag whose tag name is "head"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::head == name => {
                self.parse_error(&token);
                /* Ignore */
            }

            // An end tag whose tag name is one of: "body", "html",
            // "br"
            //
            // Agir comme dans le cas "anything else".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::body,
                tag_names::html,
                tag_names::br,
            ]) =>
            {
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::body,
                ));
                self.set_frameset_ok();
                return self.dispatch(token);
            }

            // Any other end tag
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken { is_end: true, .. }) => {
                self.parse_error(&token);
                /* Ignore */
            }

            // Anything else
            //
            // Créer un élément body implicite, rétablir frameset-ok,
            // puis retraiter le jeton.
            | _ => {
                self.process_implied_token(HTMLToken::new_start_tag(
                    tag_names::body,
                ));
                self.set_frameset_ok();
                return self.dispatch(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }
}
