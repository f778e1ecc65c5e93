/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_elements::{
    interface::IsOneOfTagsInterface, tag_attributes, tag_names,
    Attribute,
};
use infra::namespace::Namespace;

use crate::{
    state::{Entry, InsertionMode, Scope},
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        is_all_whitespace, is_special_element, strip_nulls,
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
    },
    HTMLParserFlag, HTMLParserState,
};

impl HTMLTreeConstruction {
    /// Lorsque les étapes exigent de fermer un élément p, la pile est
    /// dépilée jusqu'à un élément p dans la portée du bouton.
    pub(crate) fn close_p_element(&mut self) {
        self.stack_of_open_elements
            .pop_until(Scope::Button, [tag_names::p]);
    }

    pub(crate) fn handle_in_body_insertion_mode(
        &mut self,
        mut token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Une nouvelle ligne en tête du premier texte d'un élément
            // pre ou listing est élidée. Les caractères NUL sont
            // supprimés. Reconstruire les éléments de mise en forme
            // actifs, puis insérer le texte. Un texte qui n'est pas
            // entièrement blanc fait passer le drapeau frameset-ok à
            // "not ok".
            | HTMLToken::Text(ref text) => {
                let mut data = text.as_str();

                let top = self.top();
                if !top.is_document()
                    && top.element_ref().local_name().is_one_of([
                        tag_names::pre,
                        tag_names::listing,
                    ])
                    && !top.has_children()
                {
                    data = data.strip_prefix('\r').unwrap_or(data);
                    data = data.strip_prefix('\n').unwrap_or(data);
                }

                let data = strip_nulls(data);
                if data.is_empty() {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }

                self.reconstruct_active_formatting_elements();
                self.insert_text(&data);

                if !is_all_whitespace(&data) {
                    self.set_frameset_not_ok();
                }
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
            // Les attributs absents de l'élément racine existant lui
            // sont ajoutés.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                ref attributes,
                is_end: false,
                ..
            }) if tag_names::html == name => {
                let root = self
                    .stack_of_open_elements
                    .first()
                    .expect("L'élément racine")
                    .to_owned();
                copy_missing_attributes(&root, attributes);
            }

            // A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "command", "link", "meta", "noframes",
            // "script", "style", "title"
            //
            // Traiter le jeton selon les règles du mode d'insertion
            // "in head".
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
                tag_names::noframes,
                tag_names::script,
                tag_names::style,
                tag_names::title,
            ]) =>
            {
                return self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                );
            }

            // A start tag whose tag name is "body"
            //
            // Si le deuxième élément de la pile est un élément body,
            // ses attributs manquants sont complétés et frameset-ok
            // passe à "not ok".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                ref attributes,
                is_end: false,
                ..
            }) if tag_names::body == name => {
                if self.stack_of_open_elements.len() >= 2 {
                    let second =
                        self.stack_of_open_elements[1].to_owned();
                    if second.is_element()
                        && tag_names::body
                            == second.element_ref().local_name()
                    {
                        self.set_frameset_not_ok();
                        copy_missing_attributes(&second, attributes);
                    }
                }
            }

            // A start tag whose tag name is "frameset"
            //
            // Remplacement destructif du body par un frameset, gardé
            // par le drapeau frameset-ok.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::frameset == name => {
                if !self.frameset_ok()
                    || self.stack_of_open_elements.len() < 2
                    || tag_names::body
                        != self.stack_of_open_elements[1]
                            .element_ref()
                            .local_name()
                {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }

                let body = self.stack_of_open_elements[1].to_owned();
                body.detach();
                self.stack_of_open_elements.truncate(1);
                self.insert_html_element(token.as_tag());
                self.insertion_mode
                    .switch_to(InsertionMode::InFrameset);
            }

            // A start tag whose tag name is one of: "address",
            // "article", "aside", "blockquote", "center", "details",
            // "dir", "div", "dl", "fieldset", "figcaption", "figure",
            // "footer", "header", "hgroup", "menu", "nav", "ol", "p",
            // "section", "summary", "ul"
            //
            // Fermer un éventuel élément p, puis insérer l'élément.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::address,
                tag_names::article,
                tag_names::aside,
                tag_names::blockquote,
                tag_names::center,
                tag_names::details,
                tag_names::dir,
                tag_names::div,
                tag_names::dl,
                tag_names::fieldset,
                tag_names::figcaption,
                tag_names::figure,
                tag_names::footer,
                tag_names::header,
                tag_names::hgroup,
                tag_names::menu,
                tag_names::nav,
                tag_names::ol,
                tag_names::p,
                tag_names::section,
                tag_names::summary,
                tag_names::ul,
            ]) =>
            {
                self.close_p_element();
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is one of: "h1" ... "h6"
            //
            // Fermer un éventuel élément p ; un titre déjà ouvert au
            // sommet de la pile est dépilé avant l'insertion.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::h1,
                tag_names::h2,
                tag_names::h3,
                tag_names::h4,
                tag_names::h5,
                tag_names::h6,
            ]) =>
            {
                self.close_p_element();
                if let Some(cnode) = self.current_node() {
                    if cnode.element_ref().local_name().is_one_of([
                        tag_names::h1,
                        tag_names::h2,
                        tag_names::h3,
                        tag_names::h4,
                        tag_names::h5,
                        tag_names::h6,
                    ]) {
                        self.stack_of_open_elements.pop();
                    }
                }
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is one of: "pre", "listing"
            //
            // L'élision de la nouvelle ligne de tête est traitée par
            // le cas du jeton de texte.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name
                .is_one_of([tag_names::pre, tag_names::listing]) =>
            {
                self.close_p_element();
                self.insert_html_element(token.as_tag());
                self.set_frameset_not_ok();
            }

            // A start tag whose tag name is "form"
            //
            // Le pointeur de formulaire n'est jamais écrasé tant qu'il
            // est renseigné.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::form == name => {
                if self.form_element_pointer.is_none() {
                    self.close_p_element();
                    let form = self.insert_html_element(token.as_tag());
                    self.form_element_pointer = Some(form);
                }
            }

            // A start tag whose tag name is "li"
            // A start tag whose tag name is one of: "dd", "dt"
            //
            // Fermer l'entrée de liste ouverte de même famille, puis
            // fermer un éventuel élément p et insérer l'élément.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::li,
                tag_names::dd,
                tag_names::dt,
            ]) =>
            {
                self.set_frameset_not_ok();

                let family: &[tag_names] =
                    if tag_names::li == name {
                        &[tag_names::li]
                    } else {
                        &[tag_names::dd, tag_names::dt]
                    };

                for idx in
                    (0..self.stack_of_open_elements.len()).rev()
                {
                    let node =
                        self.stack_of_open_elements[idx].to_owned();
                    let node_name = node.element_ref().local_name();

                    if family
                        .iter()
                        .any(|tag_name| *tag_name == node_name)
                    {
                        self.stack_of_open_elements.truncate(idx);
                        break;
                    }

                    if node_name.is_one_of([
                        tag_names::address,
                        tag_names::div,
                        tag_names::p,
                    ]) || !is_special_element(&node)
                    {
                        continue;
                    }

                    break;
                }

                self.close_p_element();
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is "plaintext"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::plaintext == name => {
                self.close_p_element();
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is "button"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::button == name => {
                self.stack_of_open_elements
                    .pop_until(Scope::Default, [tag_names::button]);
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(token.as_tag());
                self.set_frameset_not_ok();
            }

            // A start tag whose tag name is "a"
            //
            // Un élément a encore actif depuis le dernier marqueur est
            // d'abord fermé par l'agence d'adoption, puis purgé de la
            // pile et de la liste.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::a == name => {
                let mut stale = None;
                for entry in self
                    .list_of_active_formatting_elements
                    .iter()
                    .rev()
                {
                    match entry {
                        | Entry::Marker => break,
                        | Entry::Element(node) => {
                            if tag_names::a
                                == node.element_ref().local_name()
                            {
                                stale = Some(node.to_owned());
                                break;
                            }
                        }
                    }
                }

                if let Some(stale) = stale {
                    self.parse_error(&token);
                    self.run_adoption_agency_algorithm("a");
                    self.stack_of_open_elements.remove(&stale);
                    self.list_of_active_formatting_elements
                        .remove_element(&stale);
                }

                self.reconstruct_active_formatting_elements();
                self.add_formatting_element(token.as_tag());
            }

            // A start tag whose tag name is one of: "b", "big",
            // "code", "em", "font", "i", "s", "small", "strike",
            // "strong", "tt", "u"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::b,
                tag_names::big,
                tag_names::code,
                tag_names::em,
                tag_names::font,
                tag_names::i,
                tag_names::s,
                tag_names::small,
                tag_names::strike,
                tag_names::strong,
                tag_names::tt,
                tag_names::u,
            ]) =>
            {
                self.reconstruct_active_formatting_elements();
                self.add_formatting_element(token.as_tag());
            }

            // A start tag whose tag name is "nobr"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::nobr == name => {
                self.reconstruct_active_formatting_elements();
                if self.stack_of_open_elements.has_element_in_scope(
                    Scope::Default,
                    [tag_names::nobr],
                ) {
                    self.parse_error(&token);
                    self.run_adoption_agency_algorithm("nobr");
                    self.reconstruct_active_formatting_elements();
                }
                self.add_formatting_element(token.as_tag());
            }

            // A start tag whose tag name is one of: "applet",
            // "marquee", "object"
            //
            // Insérer l'élément puis un marqueur à la fin de la liste
            // des éléments de mise en forme actifs.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::applet,
                tag_names::marquee,
                tag_names::object,
            ]) =>
            {
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(token.as_tag());
                self.list_of_active_formatting_elements
                    .insert_marker_at_end();
                self.set_frameset_not_ok();
            }

            // A start tag whose tag name is "table"
            //
            // En dehors du mode quirks, fermer un éventuel élément p.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::table == name => {
                if !self.document.document_ref().isin_quirks_mode() {
                    self.close_p_element();
                }
                self.insert_html_element(token.as_tag());
                self.set_frameset_not_ok();
                self.insertion_mode.switch_to(InsertionMode::InTable);
            }

            // A start tag whose tag name is one of: "area", "br",
            // "embed", "img", "input", "keygen", "wbr"
            //
            // Éléments vides : insérés puis immédiatement dépilés, le
            // drapeau de fermeture automatique est acquitté. Un input
            // caché ne touche pas à frameset-ok.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::area,
                tag_names::br,
                tag_names::embed,
                tag_names::img,
                tag_names::input,
                tag_names::keygen,
                tag_names::wbr,
            ]) =>
            {
                self.reconstruct_active_formatting_elements();
                let is_hidden_input = tag_names::input == name
                    && token
                        .as_tag()
                        .attribute(tag_attributes::ty.as_str())
                        .is_some_and(|value| {
                            value.eq_ignore_ascii_case("hidden")
                        });
                self.insert_html_element(token.as_tag());
                self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_tag();

                if is_hidden_input {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Continue,
                    );
                }

                self.set_frameset_not_ok();
            }

            // A start tag whose tag name is one of: "param", "source",
            // "track"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::param,
                tag_names::source,
                tag_names::track,
            ]) =>
            {
                self.insert_html_element(token.as_tag());
                self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_tag();
            }

            // A start tag whose tag name is "hr"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::hr == name => {
                self.close_p_element();
                self.insert_html_element(token.as_tag());
                self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_tag();
                self.set_frameset_not_ok();
            }

            // A start tag whose tag name is "image"
            //
            // Erreur d'analyse. Changer le nom de balise du jeton en
            // "img" puis retraiter.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::image == name => {
                self.parse_error(&token);
                token.as_tag_mut().update_name(tag_names::img);
                return self.dispatch(token);
            }

            // A start tag whose tag name is "isindex"
            //
            // Synthétise un échafaudage form/hr/label/input/hr, avec
            // une invite configurable par l'attribut prompt.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::isindex == name => {
                self.parse_error(&token);

                if self.form_element_pointer.is_some() {
                    return HTMLTreeConstructionControlFlow::Continue(
                        HTMLParserState::Ignore,
                    );
                }

                let mut action = String::new();
                let mut prompt = String::from(
                    "This is a searchable index. Enter search \
                     keywords: ",
                );
                let mut attributes =
                    vec![Attribute::new("name", "isindex")];

                for attribute in token.as_tag().attributes() {
                    match attribute.name.as_str() {
                        | "action" => {
                            action = attribute.value.to_owned();
                        }
                        | "name" => { /* ignorer l'attribut */ }
                        | "prompt" => {
                            prompt = attribute.value.to_owned();
                        }
                        | _ => attributes.push(attribute.to_owned()),
                    }
                }

                self.acknowledge_self_closing_tag();
                self.close_p_element();

                let form_tag = if action.is_empty() {
                    HTMLTagToken::start().with_name(tag_names::form)
                } else {
                    HTMLTagToken::start()
                        .with_name(tag_names::form)
                        .with_attributes([("action", action)])
                };
                let form = self.insert_html_element(&form_tag);
                self.form_element_pointer = Some(form);

                self.insert_html_element(
                    &HTMLTagToken::start().with_name(tag_names::hr),
                );
                self.stack_of_open_elements.pop();

                self.insert_html_element(
                    &HTMLTagToken::start().with_name(tag_names::label),
                );
                self.insert_text(&prompt);
                self.insert_html_element(
                    &HTMLTagToken::start()
                        .with_name(tag_names::input)
                        .with_attributes(attributes),
                );
                self.stack_of_open_elements.pop();
                self.stack_of_open_elements.pop();

                self.insert_html_element(
                    &HTMLTagToken::start().with_name(tag_names::hr),
                );
                self.stack_of_open_elements.pop();
                self.stack_of_open_elements.pop();

                self.form_element_pointer = None;
            }

            // A start tag whose tag name is "textarea"
            //
            // L'élision de la nouvelle ligne de tête est traitée par
            // le mode "text".
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::textarea == name => {
                self.insert_html_element(token.as_tag());
                self.set_original_insertion_mode();
                self.set_frameset_not_ok();
                self.insertion_mode.switch_to(InsertionMode::Text);
            }

            // A start tag whose tag name is "xmp"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::xmp == name => {
                self.close_p_element();
                self.reconstruct_active_formatting_elements();
                self.set_frameset_not_ok();
                self.insert_html_element(token.as_tag());
                self.set_original_insertion_mode();
                self.insertion_mode.switch_to(InsertionMode::Text);
            }

            // A start tag whose tag name is "iframe"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if tag_names::iframe == name => {
                self.set_frameset_not_ok();
                self.insert_html_element(token.as_tag());
                self.set_original_insertion_mode();
                self.insertion_mode.switch_to(InsertionMode::Text);
            }

            // A start tag whose tag name is one of: "noembed",
            // "noscript"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name
                .is_one_of([tag_names::noembed, tag_names::noscript]) =>
            {
                self.insert_html_element(token.as_tag());
                self.set_original_insertion_mode();
                self.insertion_mode.switch_to(InsertionMode::Text);
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
                self.insertion_mode.switch_to(InsertionMode::InSelect);
            }

            // A start tag whose tag name is one of: "optgroup",
            // "option"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name
                .is_one_of([tag_names::optgroup, tag_names::option]) =>
            {
                if let Some(cnode) = self.current_node() {
                    if tag_names::option
                        == cnode.element_ref().local_name()
                    {
                        self.stack_of_open_elements.pop();
                    }
                }
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is one of: "rp", "rt"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([tag_names::rp, tag_names::rt]) => {
                if self.stack_of_open_elements.has_element_in_scope(
                    Scope::Default,
                    [tag_names::ruby],
                ) {
                    self.generate_implied_end_tags();
                }
                self.insert_html_element(token.as_tag());
            }

            // A start tag whose tag name is one of: "math", "svg"
            //
            // Entrée dans un sous-arbre étranger : les attributs sont
            // ajustés puis l'élément est inséré dans l'espace de noms
            // correspondant.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([tag_names::math, tag_names::svg]) => {
                self.reconstruct_active_formatting_elements();

                let namespace = if tag_names::math == name {
                    self.adjust_mathml_attributes(token.as_tag_mut());
                    Namespace::MathML
                } else {
                    self.adjust_svg_attributes(token.as_tag_mut());
                    Namespace::SVG
                };
                self.adjust_foreign_attributes(token.as_tag_mut());

                self.insert_foreign_element(token.as_tag(), namespace);
            }

            // A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot",
            // "th", "thead", "tr"
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of([
                tag_names::caption,
                tag_names::col,
                tag_names::colgroup,
                tag_names::frame,
                tag_names::head,
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

            // Any other start tag
            | HTMLToken::Tag(HTMLTagToken {
                is_end: false, ..
            }) => {
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(token.as_tag());
            }

            // An end tag whose tag name is "body"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::body == name => {
                if self.stack_of_open_elements.has_element_in_scope(
                    Scope::Default,
                    [tag_names::body],
                ) {
                    self.insertion_mode
                        .switch_to(InsertionMode::AfterBody);
                }
            }

            // An end tag whose tag name is "html"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::html == name => {
                if self.stack_of_open_elements.has_element_in_scope(
                    Scope::Default,
                    [tag_names::body],
                ) {
                    self.process_implied_token(
                        HTMLToken::new_end_tag(tag_names::body),
                    );
                    return self.dispatch(token);
                }
                /* Ignore */
            }

            // An end tag whose tag name is one of: "address",
            // "article", "aside", "blockquote", "button", "center",
            // "details", "dir", "div", "dl", "fieldset", "figcaption",
            // "figure", "footer", "header", "hgroup", "listing",
            // "menu", "nav", "ol", "pre", "section", "summary", "ul"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::address,
                tag_names::article,
                tag_names::aside,
                tag_names::blockquote,
                tag_names::button,
                tag_names::center,
                tag_names::details,
                tag_names::dir,
                tag_names::div,
                tag_names::dl,
                tag_names::fieldset,
                tag_names::figcaption,
                tag_names::figure,
                tag_names::footer,
                tag_names::header,
                tag_names::hgroup,
                tag_names::listing,
                tag_names::menu,
                tag_names::nav,
                tag_names::ol,
                tag_names::pre,
                tag_names::section,
                tag_names::summary,
                tag_names::ul,
            ]) =>
            {
                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                self.stack_of_open_elements
                    .pop_until(Scope::Default, [tag_name]);
            }

            // An end tag whose tag name is "form"
            //
            // Le pointeur de formulaire est consommé et l'élément est
            // retiré de la pile sans dépiler ce qui le surplombe.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::form == name => {
                let node = self.form_element_pointer.take();

                let scope_idx = self
                    .stack_of_open_elements
                    .index_of_element_in_scope(
                        Scope::Default,
                        [tag_names::form],
                    );

                let node = match (node, scope_idx) {
                    | (Some(node), Some(idx))
                        if self.stack_of_open_elements[idx]
                            == node =>
                    {
                        node
                    }
                    | _ => {
                        self.parse_error(&token);
                        return HTMLTreeConstructionControlFlow::
                            Continue(HTMLParserState::Ignore);
                    }
                };

                self.generate_implied_end_tags();
                self.stack_of_open_elements.remove(&node);
            }

            // An end tag whose tag name is "p"
            //
            // Un élément p hors de portée est d'abord synthétisé.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::p == name => {
                if !self.stack_of_open_elements.has_element_in_scope(
                    Scope::Button,
                    [tag_names::p],
                ) {
                    self.parse_error(&token);
                    self.insert_html_element(
                        &HTMLTagToken::start().with_name(tag_names::p),
                    );
                }
                self.close_p_element();
            }

            // An end tag whose tag name is "li"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::li == name => {
                self.stack_of_open_elements
                    .pop_until(Scope::ListItem, [tag_names::li]);
            }

            // An end tag whose tag name is one of: "dd", "dt"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([tag_names::dd, tag_names::dt]) => {
                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                self.stack_of_open_elements
                    .pop_until(Scope::Default, [tag_name]);
            }

            // An end tag whose tag name is one of: "h1" ... "h6"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::h1,
                tag_names::h2,
                tag_names::h3,
                tag_names::h4,
                tag_names::h5,
                tag_names::h6,
            ]) =>
            {
                self.stack_of_open_elements.pop_until(
                    Scope::Default,
                    [
                        tag_names::h1,
                        tag_names::h2,
                        tag_names::h3,
                        tag_names::h4,
                        tag_names::h5,
                        tag_names::h6,
                    ],
                );
            }

            // An end tag whose tag name is one of: "a", "b", "big",
            // "code", "em", "font", "i", "nobr", "s", "small",
            // "strike", "strong", "tt", "u"
            //
            // Exécuter l'algorithme de l'agence d'adoption.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::a,
                tag_names::b,
                tag_names::big,
                tag_names::code,
                tag_names::em,
                tag_names::font,
                tag_names::i,
                tag_names::nobr,
                tag_names::s,
                tag_names::small,
                tag_names::strike,
                tag_names::strong,
                tag_names::tt,
                tag_names::u,
            ]) =>
            {
                let tag_name = name.to_owned();
                self.run_adoption_agency_algorithm(&tag_name);
            }

            // An end tag token whose tag name is one of: "applet",
            // "marquee", "object"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if name.is_one_of([
                tag_names::applet,
                tag_names::marquee,
                tag_names::object,
            ]) =>
            {
                let tag_name = name
                    .parse::<tag_names>()
                    .expect("Un nom de balise connu");
                if self
                    .stack_of_open_elements
                    .pop_until(Scope::Default, [tag_name])
                {
                    self.list_of_active_formatting_elements
                        .clear_up_to_the_last_marker();
                }
            }

            // An end tag whose tag name is "br"
            //
            // Agir comme s'il s'agissait d'une balise de début.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::br == name => {
                self.parse_error(&token);
                token.as_tag_mut().is_end = false;
                return self.dispatch(token);
            }

            // Any other end tag
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) => {
                let tag_name = name.to_owned();
                self.any_other_end_tag_in_body(&tag_name);
            }

            // An end-of-file token
            //
            // Arrêter l'analyse.
            | HTMLToken::EOF => {
                return HTMLTreeConstructionControlFlow::Break(
                    HTMLParserFlag::Stop,
                );
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_after_body_insertion_mode(
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

            // A character token that consists only of whitespace
            //
            // Traiter le jeton selon les règles du mode "in body".
            | HTMLToken::Text(ref text)
                if is_all_whitespace(text) =>
            {
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

            // An end tag whose tag name is "html"
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) if tag_names::html == name => {
                self.insertion_mode
                    .switch_to(InsertionMode::AfterAfterBody);
            }

            // A comment token
            //
            // Le commentaire est accroché à l'élément racine <html>.
            // Son absence à ce stade est une erreur de programmation.
            | HTMLToken::Comment(comment) => {
                let root = self
                    .stack_of_open_elements
                    .first()
                    .filter(|node| {
                        tag_names::html
                            == node.element_ref().local_name()
                    })
                    .expect(
                        "L'élément <html> dans le mode d'insertion \
                         \"after body\"",
                    )
                    .to_owned();
                root.append_child(
                    dom::node::CommentNode::new(comment),
                );
            }

            // Anything else
            //
            // Repasser en mode "in body" et retraiter le jeton.
            | _ => {
                self.insertion_mode.switch_to(InsertionMode::InBody);
                return self.dispatch(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    pub(crate) fn handle_after_after_body_insertion_mode(
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

            // A character token that consists only of whitespace
            | HTMLToken::Text(ref text)
                if is_all_whitespace(text) =>
            {
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

            // A comment token
            //
            // Insérer un commentaire comme dernier enfant du document.
            | HTMLToken::Comment(comment) => {
                self.document.append_child(
                    dom::node::CommentNode::new(comment),
                );
            }

            // A DOCTYPE token
            | HTMLToken::DOCTYPE { .. } => {
                return self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                );
            }

            // Anything else
            | _ => {
                self.insertion_mode.switch_to(InsertionMode::InBody);
                return self.dispatch(token);
            }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }
}

// -------- //
// Fonction //
// -------- //

/// Complète les attributs manquants d'un élément existant : seuls les
/// attributs absents sont ajoutés, la première occurrence gagne.
fn copy_missing_attributes(
    node: &infra::structure::tree::TreeNode<dom::node::Node>,
    attributes: &[Attribute],
) {
    let element = node.element_ref();
    for attribute in attributes {
        if !element.has_attribute(&attribute.name) {
            element.append_attribute(attribute.to_owned());
        }
    }
}
