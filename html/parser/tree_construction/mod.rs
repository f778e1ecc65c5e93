/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod foreign;

mod rules {
    mod body;
    mod caption;
    mod frameset;
    mod head;
    mod html;
    mod initial;
    mod select;
    mod table;
    mod text;
}

use std::ops::ControlFlow;

use dom::node::{
    CommentNode, DocumentNode, ElementNode, Node, TextNode,
};
use html_elements::{
    interface::IsOneOfTagsInterface, tag_names, Element,
};
use infra::{namespace::Namespace, structure::tree::TreeNode};

use crate::{
    state::{
        Entry, FormElementPointer, FramesetOkFlag, HeadElementPointer,
        InsertionMode, ListOfActiveFormattingElements, Scope,
        StackOfOpenElements,
    },
    token::{HTMLTagToken, HTMLToken},
    HTMLParserFlag, HTMLParserState,
};

// ---- //
// Type //
// ---- //

pub(crate) type HTMLTreeConstructionControlFlow =
    ControlFlow<HTMLParserFlag, HTMLParserState>;

// --------- //
// Structure //
// --------- //

/// L'étape de construction de l'arbre : une machine à états pilotée
/// par le mode d'insertion, la pile des éléments ouverts et la liste
/// des éléments de mise en forme actifs.
pub struct HTMLTreeConstruction {
    pub(crate) document: DocumentNode,
    pub(crate) insertion_mode: InsertionMode,
    original_insertion_mode: Option<InsertionMode>,
    pub(crate) stack_of_open_elements: StackOfOpenElements,
    list_of_active_formatting_elements: ListOfActiveFormattingElements,
    head_element_pointer: Option<HeadElementPointer>,
    form_element_pointer: Option<FormElementPointer>,
    scripting_enabled: bool,
    frameset_ok_flag: FramesetOkFlag,
    foster_parenting: bool,
    has_self_closing_token: bool,
    context_element: Option<TreeNode<Node>>,
}

// -------- //
// Fonction //
// -------- //

pub(crate) const WHITESPACE: [char; 5] =
    [' ', '\t', '\r', '\n', '\x0C'];

pub(crate) fn is_ascii_whitespace(ch: char) -> bool {
    WHITESPACE.contains(&ch)
}

pub(crate) fn is_all_whitespace(text: &str) -> bool {
    text.chars().all(is_ascii_whitespace)
}

/// Découpe un jeton de texte en sa séquence d'espaces de tête et son
/// reste. Plusieurs modes traitent ces deux parts différemment.
pub(crate) fn split_whitespace_prefix(text: &str) -> (&str, &str) {
    let rest = text.trim_start_matches(is_ascii_whitespace);
    let prefix_len = text.len() - rest.len();
    (&text[..prefix_len], rest)
}

pub(crate) fn strip_nulls(text: &str) -> String {
    text.replace('\0', "")
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#special>
pub(crate) fn is_special_element(node: &TreeNode<Node>) -> bool {
    let element = node.element_ref();
    let name = element.local_name();

    match element.namespace() {
        | Namespace::HTML => name.is_one_of([
            tag_names::address,
            tag_names::applet,
            tag_names::area,
            tag_names::article,
            tag_names::aside,
            tag_names::base,
            tag_names::basefont,
            tag_names::bgsound,
            tag_names::blockquote,
            tag_names::body,
            tag_names::br,
            tag_names::button,
            tag_names::caption,
            tag_names::center,
            tag_names::col,
            tag_names::colgroup,
            tag_names::command,
            tag_names::dd,
            tag_names::details,
            tag_names::dir,
            tag_names::div,
            tag_names::dl,
            tag_names::dt,
            tag_names::embed,
            tag_names::fieldset,
            tag_names::figcaption,
            tag_names::figure,
            tag_names::footer,
            tag_names::form,
            tag_names::frame,
            tag_names::frameset,
            tag_names::h1,
            tag_names::h2,
            tag_names::h3,
            tag_names::h4,
            tag_names::h5,
            tag_names::h6,
            tag_names::head,
            tag_names::header,
            tag_names::hgroup,
            tag_names::hr,
            tag_names::html,
            tag_names::iframe,
            tag_names::img,
            tag_names::input,
            tag_names::isindex,
            tag_names::li,
            tag_names::link,
            tag_names::listing,
            tag_names::main,
            tag_names::marquee,
            tag_names::menu,
            tag_names::meta,
            tag_names::nav,
            tag_names::noembed,
            tag_names::noframes,
            tag_names::noscript,
            tag_names::object,
            tag_names::ol,
            tag_names::p,
            tag_names::param,
            tag_names::plaintext,
            tag_names::pre,
            tag_names::script,
            tag_names::section,
            tag_names::select,
            tag_names::source,
            tag_names::style,
            tag_names::summary,
            tag_names::table,
            tag_names::tbody,
            tag_names::td,
            tag_names::textarea,
            tag_names::tfoot,
            tag_names::th,
            tag_names::thead,
            tag_names::title,
            tag_names::tr,
            tag_names::track,
            tag_names::ul,
            tag_names::wbr,
            tag_names::xmp,
        ]),
        | Namespace::MathML => name.is_one_of([
            tag_names::mi,
            tag_names::mo,
            tag_names::mn,
            tag_names::ms,
            tag_names::mtext,
            tag_names::annotationXml,
        ]),
        | Namespace::SVG => name.is_one_of([
            tag_names::foreignObject,
            tag_names::desc,
            tag_names::title,
        ]),
        | _ => false,
    }
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLTreeConstruction {
    pub(crate) fn new(document: DocumentNode) -> Self {
        Self {
            document,
            insertion_mode: InsertionMode::default(),
            original_insertion_mode: None,
            stack_of_open_elements: StackOfOpenElements::default(),
            list_of_active_formatting_elements:
                ListOfActiveFormattingElements::default(),
            head_element_pointer: None,
            form_element_pointer: None,
            scripting_enabled: true,
            frameset_ok_flag: FramesetOkFlag::Ok,
            foster_parenting: false,
            has_self_closing_token: false,
            context_element: None,
        }
    }

    /// Prépare l'analyse d'un fragment : une racine `<html>`
    /// synthétique devient le premier élément ouvert, le pointeur de
    /// formulaire est amorcé depuis les ancêtres de l'élément de
    /// contexte, puis le mode d'insertion est réinitialisé.
    pub(crate) fn init_fragment(
        &mut self,
        context_element: Option<TreeNode<Node>>,
    ) -> TreeNode<Node> {
        let root: TreeNode<Node> = ElementNode::new(Element::new(
            tag_names::html,
            Namespace::HTML,
        ))
        .into();

        self.document.append_child(root.clone());
        self.stack_of_open_elements.put(root.clone());
        self.context_element = context_element.clone();
        self.reset_insertion_mode();

        let mut maybe_ancestor = context_element;
        while let Some(ancestor) = maybe_ancestor {
            if ancestor.is_element()
                && tag_names::form == ancestor.element_ref().local_name()
            {
                self.form_element_pointer = Some(ancestor);
                break;
            }
            maybe_ancestor = ancestor.parent_node();
        }

        root
    }

    pub(crate) fn set_scripting_enabled(&mut self, enabled: bool) {
        self.scripting_enabled = enabled;
    }

    pub(crate) fn scripting_enabled(&self) -> bool {
        self.scripting_enabled
    }
}

// ------------------------------- //
// Implémentation // le dispatcher //
// ------------------------------- //

impl HTMLTreeConstruction {
    /// Traite un jeton venant du tokenizer. Une balise de début
    /// auto-fermante est ré-interprétée comme une séquence de deux
    /// jetons : la balise de début, puis, si le drapeau n'a pas été
    /// acquitté par le gestionnaire, une balise de fin de même nom.
    pub(crate) fn process_token(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        let self_closing_name = match &token {
            | HTMLToken::Tag(tag)
                if !tag.is_end && tag.self_closing_flag =>
            {
                Some(tag.name.to_owned())
            }
            | _ => None,
        };

        if self_closing_name.is_some() {
            self.has_self_closing_token = true;
        }

        let flow = self.dispatch(token);

        if self.has_self_closing_token {
            self.has_self_closing_token = false;
            if let Some(name) = self_closing_name {
                self.process_implied_token(HTMLToken::new_end_tag(
                    name,
                ));
            }
        }

        flow
    }

    /// Le dispatcher de construction d'arbre : traite le jeton selon
    /// les règles du mode d'insertion actuel, ou selon les règles du
    /// contenu étranger lorsque le contexte d'insertion est étranger.
    pub(crate) fn dispatch(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        if !self.use_foreign_process(&token) {
            self.process_using_the_rules_for(self.insertion_mode, token)
        } else {
            self.process_using_the_rules_for_foreign_content(token)
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#using-the-rules-for>
    pub(crate) fn process_using_the_rules_for(
        &mut self,
        m: InsertionMode,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match m {
            | InsertionMode::Initial => {
                self.handle_initial_insertion_mode(token)
            }
            | InsertionMode::BeforeHTML => {
                self.handle_before_html_insertion_mode(token)
            }
            | InsertionMode::BeforeHead => {
                self.handle_before_head_insertion_mode(token)
            }
            | InsertionMode::InHead => {
                self.handle_in_head_insertion_mode(token)
            }
            | InsertionMode::AfterHead => {
                self.handle_after_head_insertion_mode(token)
            }
            | InsertionMode::InBody => {
                self.handle_in_body_insertion_mode(token)
            }
            | InsertionMode::Text => {
                self.handle_text_insertion_mode(token)
            }
            | InsertionMode::InTable => {
                self.handle_in_table_insertion_mode(token)
            }
            | InsertionMode::InCaption => {
                self.handle_in_caption_insertion_mode(token)
            }
            | InsertionMode::InColumnGroup => {
                self.handle_in_column_group_insertion_mode(token)
            }
            | InsertionMode::InTableBody => {
                self.handle_in_table_body_insertion_mode(token)
            }
            | InsertionMode::InRow => {
                self.handle_in_row_insertion_mode(token)
            }
            | InsertionMode::InCell => {
                self.handle_in_cell_insertion_mode(token)
            }
            | InsertionMode::InSelect => {
                self.handle_in_select_insertion_mode(token)
            }
            | InsertionMode::InSelectInTable => {
                self.handle_in_select_in_table_insertion_mode(token)
            }
            | InsertionMode::AfterBody => {
                self.handle_after_body_insertion_mode(token)
            }
            | InsertionMode::InFrameset => {
                self.handle_in_frameset_insertion_mode(token)
            }
            | InsertionMode::AfterFrameset => {
                self.handle_after_frameset_insertion_mode(token)
            }
            | InsertionMode::AfterAfterBody => {
                self.handle_after_after_body_insertion_mode(token)
            }
            | InsertionMode::AfterAfterFrameset => {
                self.handle_after_after_frameset_insertion_mode(token)
            }
        }
    }

    /// Traite un jeton synthétisé comme s'il était apparu dans le flux
    /// d'entrée, sans perturber l'expansion d'une balise auto-fermante
    /// en cours.
    pub(crate) fn process_implied_token(&mut self, token: HTMLToken) {
        let saved = self.has_self_closing_token;
        self.has_self_closing_token = false;
        let _ = self.dispatch(token);
        self.has_self_closing_token = saved;
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag>
    pub(crate) fn acknowledge_self_closing_tag(&mut self) {
        self.has_self_closing_token = false;
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#parse-errors>
    pub(crate) fn parse_error(&self, token: &HTMLToken) {
        match token {
            | HTMLToken::Tag(HTMLTagToken {
                name, is_end, ..
            }) => {
                if *is_end {
                    log::error!("Balise de fin inattendue: {name}");
                } else {
                    log::error!("Balise de début inattendue: {name}");
                }
            }
            | HTMLToken::DOCTYPE { .. } => {
                log::error!("DOCTYPE inattendu")
            }
            | HTMLToken::Comment(_) => {
                log::error!("Commentaire inattendu")
            }
            | HTMLToken::Text(_) => log::error!("Texte inattendu"),
            | HTMLToken::EOF => log::error!("Fin de flux inattendue"),
        }
    }
}

// ------------------------------------ //
// Implémentation // l'état du parseur  //
// ------------------------------------ //

impl HTMLTreeConstruction {
    /// Le noeud actuel, ou le document lorsque la pile est vide.
    pub(crate) fn top(&self) -> TreeNode<Node> {
        self.stack_of_open_elements
            .current_node()
            .cloned()
            .unwrap_or_else(|| (&self.document).into())
    }

    pub(crate) fn current_node(&self) -> Option<&TreeNode<Node>> {
        self.stack_of_open_elements.current_node()
    }

    /// Sauvegarde le mode d'insertion courant avant de passer au mode
    /// "text". Une double sauvegarde sans restauration est une erreur
    /// de programmation.
    pub(crate) fn set_original_insertion_mode(&mut self) {
        if self.original_insertion_mode.is_some() {
            panic!(
                "Le mode d'insertion original a été sauvegardé deux \
                 fois."
            );
        }
        self.original_insertion_mode = Some(self.insertion_mode);
    }

    pub(crate) fn switch_back_to_original_insertion_mode(&mut self) {
        let mode = self
            .original_insertion_mode
            .take()
            .expect("Le mode d'insertion original");
        self.insertion_mode.switch_to(mode);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately>
    ///
    /// L'élément de contexte d'un fragment est traité comme le bas de
    /// la pile ; le mode par défaut est "in body".
    pub(crate) fn reset_insertion_mode(&mut self) {
        let mut chosen = InsertionMode::InBody;

        for (idx, node) in
            self.stack_of_open_elements.iter().enumerate().rev()
        {
            let last = idx == 0;

            let node = if last && self.context_element.is_some() {
                self.context_element.to_owned().unwrap()
            } else {
                node.to_owned()
            };

            let element = node.element_ref();
            let mode = match element.local_name() {
                | "select" => InsertionMode::InSelect,
                | "td" | "th" => InsertionMode::InCell,
                | "tr" => InsertionMode::InRow,
                | "tbody" | "thead" | "tfoot" => {
                    InsertionMode::InTableBody
                }
                | "caption" => InsertionMode::InCaption,
                | "colgroup" => InsertionMode::InColumnGroup,
                | "table" => InsertionMode::InTable,
                | "head" => InsertionMode::InBody,
                | "body" => InsertionMode::InBody,
                | "frameset" => InsertionMode::InFrameset,
                | "html" => InsertionMode::BeforeHead,
                | _ => continue,
            };

            chosen = mode;
            break;
        }

        self.insertion_mode.switch_to(chosen);
    }

    pub(crate) fn set_foster_parenting(&mut self, armed: bool) {
        self.foster_parenting = armed;
    }

    pub(crate) fn form_element_pointer_is_set(&self) -> bool {
        self.form_element_pointer.is_some()
    }

    pub(crate) fn set_form_element_pointer(
        &mut self,
        form: Option<FormElementPointer>,
    ) {
        self.form_element_pointer = form;
    }

    pub(crate) fn frameset_ok(&self) -> bool {
        self.frameset_ok_flag == FramesetOkFlag::Ok
    }

    pub(crate) fn set_frameset_not_ok(&mut self) {
        self.frameset_ok_flag = FramesetOkFlag::NotOk;
    }

    pub(crate) fn set_frameset_ok(&mut self) {
        self.frameset_ok_flag = FramesetOkFlag::Ok;
    }
}

// ----------------------------------------- //
// Implémentation // les mutations de l'arbre //
// ----------------------------------------- //

impl HTMLTreeConstruction {
    /// Insère un noeud sous le noeud actuel (ou sous le parent
    /// nourricier lorsque le `foster parenting` est armé), puis pousse
    /// le noeud sur la pile des éléments ouverts s'il s'agit d'un
    /// élément.
    pub(crate) fn insert_node(&mut self, node: TreeNode<Node>) {
        if self.foster_parenting {
            self.foster_parent_node(node.clone());
        } else {
            self.top().append_child(node.clone());
        }

        if node.is_element() {
            self.stack_of_open_elements.put(node);
        }
    }

    /// Insère un texte en le fusionnant avec le dernier enfant du
    /// noeud actuel lorsque celui-ci est déjà un noeud texte. Cette
    /// fusion est observable : l'arbre produit ne contient jamais deux
    /// noeuds texte adjacents.
    pub(crate) fn insert_text(&mut self, text: &str) {
        let top = self.top();
        if let Some(last_child) = top.last_child() {
            if last_child.is_text() {
                last_child.character_data_ref().append_data(text);
                return;
            }
        }
        self.insert_node(TextNode::new(text.to_owned()).into());
    }

    pub(crate) fn insert_comment(&mut self, data: String) {
        self.insert_node(CommentNode::new(data).into());
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element>
    pub(crate) fn insert_html_element(
        &mut self,
        tag: &HTMLTagToken,
    ) -> TreeNode<Node> {
        self.insert_foreign_element(tag, Namespace::HTML)
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element>
    pub(crate) fn insert_foreign_element(
        &mut self,
        tag: &HTMLTagToken,
        namespace: Namespace,
    ) -> TreeNode<Node> {
        let node = self.create_element_for(tag, namespace);
        self.insert_node(node.clone());
        node
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token>
    pub(crate) fn create_element_for(
        &self,
        tag: &HTMLTagToken,
        namespace: Namespace,
    ) -> TreeNode<Node> {
        let element = Element::new(tag.local_name(), namespace);
        for attribute in tag.attributes() {
            element.append_attribute(attribute.clone());
        }
        ElementNode::new(element).into()
    }

    /// Clone superficiel d'un noeud élément : même balise, même espace
    /// de noms, même liste d'attributs, aucun parent.
    pub(crate) fn clone_element_node(
        &self,
        node: &TreeNode<Node>,
    ) -> TreeNode<Node> {
        let source = node.element_ref();
        let element =
            Element::new(source.local_name(), source.namespace());
        for attribute in source.attributes().iter() {
            element.append_attribute(attribute.clone());
        }
        ElementNode::new(element).into()
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#foster-parent>
    ///
    /// Redirige un noeud mal placé dans une table : il est inséré dans
    /// le parent de la table la plus proche, juste avant elle. Sans
    /// table sur la pile, le parent nourricier est l'élément racine ;
    /// pour une table sans parent, l'élément juste au-dessous d'elle
    /// sur la pile. Un noeud texte inséré juste après un frère texte
    /// est fusionné avec lui.
    pub(crate) fn foster_parent_node(&mut self, node: TreeNode<Node>) {
        self.foster_parenting = false;

        let maybe_table = self
            .stack_of_open_elements
            .iter()
            .enumerate()
            .rev()
            .find(|(_, element)| {
                tag_names::table == element.element_ref().local_name()
            })
            .map(|(idx, element)| (idx, element.to_owned()));

        let (parent, before_table) = match &maybe_table {
            | None => (
                self.stack_of_open_elements
                    .first()
                    .expect("La racine de la pile")
                    .to_owned(),
                None,
            ),
            | Some((table_idx, table)) => match table.parent_node() {
                | Some(parent) => (parent, Some(table.to_owned())),
                | None => (
                    self.stack_of_open_elements
                        .element_immediately_below(*table_idx)
                        .expect("L'élément au-dessous de la table")
                        .to_owned(),
                    None,
                ),
            },
        };

        let previous = match &before_table {
            | Some(table) => table.previous_sibling(),
            | None => parent.last_child(),
        };

        if node.is_text() {
            if let Some(previous) = previous {
                if previous.is_text() {
                    previous
                        .character_data_ref()
                        .append_data(&node.character_data_ref().data());
                    return;
                }
            }
        }

        parent.insert_before(node, before_table.as_ref());
    }

    /// Déplace tous les enfants de `src` à la fin de `dst`, dans leur
    /// ordre d'origine.
    pub(crate) fn reparent_children(
        &self,
        dst: &TreeNode<Node>,
        src: &TreeNode<Node>,
    ) {
        while let Some(child) = src.first_child() {
            dst.append_child(child);
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements>
    ///
    /// Rouvre les éléments de mise en forme fermés hors ordre : depuis
    /// la première entrée qui n'est ni un marqueur ni déjà sur la
    /// pile, chaque entrée est clonée, insérée, et remplacée par son
    /// clone dans la liste.
    pub(crate) fn reconstruct_active_formatting_elements(&mut self) {
        if self.list_of_active_formatting_elements.is_empty() {
            return;
        }

        let entries_len =
            self.list_of_active_formatting_elements.len();
        let mut idx = entries_len - 1;

        loop {
            let entry = &self.list_of_active_formatting_elements[idx];
            let stop = match entry {
                | Entry::Marker => true,
                | Entry::Element(node) => {
                    self.stack_of_open_elements.contains(node)
                }
            };

            if stop {
                idx += 1;
                break;
            }

            if idx == 0 {
                break;
            }
            idx -= 1;
        }

        while idx < entries_len {
            let node = self.list_of_active_formatting_elements[idx]
                .element()
                .expect("Une entrée élément")
                .to_owned();
            let clone = self.clone_element_node(&node);
            self.insert_node(clone.clone());
            self.list_of_active_formatting_elements[idx] =
                Entry::Element(clone);
            idx += 1;
        }
    }

    /// Insère un élément de mise en forme et l'enregistre dans la
    /// liste des éléments de mise en forme actifs, clause de l'arche
    /// de Noé comprise.
    pub(crate) fn add_formatting_element(&mut self, tag: &HTMLTagToken) {
        let element = self.insert_html_element(tag);
        self.list_of_active_formatting_elements
            .push_formatting_element(element);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags>
    ///
    /// Dépile tant que le noeud actuel porte l'une des balises de fin
    /// implicites.
    pub(crate) fn generate_implied_end_tags(&mut self) {
        while let Some(cnode) = self.current_node() {
            let name = cnode.element_ref().local_name().to_owned();
            if name.as_str().is_one_of([
                tag_names::dd,
                tag_names::dt,
                tag_names::li,
                tag_names::option,
                tag_names::optgroup,
                tag_names::p,
                tag_names::rp,
                tag_names::rt,
            ]) {
                self.stack_of_open_elements.pop();
            } else {
                break;
            }
        }
    }
}

// ------------------------------------ //
// Implémentation // l'agence d'adoption //
// ------------------------------------ //

impl HTMLTreeConstruction {
    /// <https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm>
    ///
    /// Réécriture des éléments de mise en forme mal imbriqués, en huit
    /// itérations au plus de l'algorithme de l'agence d'adoption.
    pub(crate) fn run_adoption_agency_algorithm(
        &mut self,
        tag_name: &str,
    ) {
        for _ in 0..8 {
            // Trouver l'élément de mise en forme, en remontant la
            // liste jusqu'au marqueur le plus proche.
            let maybe_formatting_element = self
                .list_of_active_formatting_elements
                .last_element_before_marker(tag_name);

            let formatting_element = match maybe_formatting_element {
                | Some((_, element)) => element,
                | None => {
                    self.any_other_end_tag_in_body(tag_name);
                    return;
                }
            };

            // Présent dans la liste mais pas sur la pile : entrée
            // périmée, la retirer.
            let fe_index = match self
                .stack_of_open_elements
                .index_of(&formatting_element)
            {
                | Some(idx) => idx,
                | None => {
                    self.list_of_active_formatting_elements
                        .remove_element(&formatting_element);
                    return;
                }
            };

            let subject = tag_name
                .parse::<tag_names>()
                .expect("Une balise de mise en forme");
            if !self
                .stack_of_open_elements
                .has_element_in_scope(Scope::Default, [subject])
            {
                // Hors de portée : ignorer la balise.
                return;
            }

            // Le furthest block : l'élément spécial le plus proche
            // au-dessus de l'élément de mise en forme sur la pile.
            let maybe_furthest_block = self.stack_of_open_elements
                [fe_index..]
                .iter()
                .find(|element| is_special_element(element))
                .cloned();

            let furthest_block = match maybe_furthest_block {
                | Some(furthest_block) => furthest_block,
                | None => {
                    // Pas de furthest block : dépiler jusqu'à
                    // l'élément de mise en forme inclus.
                    loop {
                        let popped = self
                            .stack_of_open_elements
                            .pop()
                            .expect("Un élément à dépiler");
                        if popped == formatting_element {
                            break;
                        }
                    }
                    self.list_of_active_formatting_elements
                        .remove_element(&formatting_element);
                    return;
                }
            };

            // L'ancêtre commun et le signet.
            let common_ancestor =
                self.stack_of_open_elements[fe_index - 1].to_owned();
            let mut bookmark = self
                .list_of_active_formatting_elements
                .position_of(&formatting_element)
                .expect("La position de l'élément de mise en forme");

            // La boucle interne : au plus trois itérations.
            let mut last_node = furthest_block.to_owned();
            let mut node;
            let mut node_idx = self
                .stack_of_open_elements
                .index_of(&furthest_block)
                .expect("La position du furthest block");

            for _ in 0..3 {
                node_idx -= 1;
                node = self.stack_of_open_elements[node_idx].to_owned();

                if self
                    .list_of_active_formatting_elements
                    .position_of(&node)
                    .is_none()
                {
                    self.stack_of_open_elements.remove(&node);
                    continue;
                }

                if node == formatting_element {
                    break;
                }

                let clone = self.clone_element_node(&node);
                let afe_idx = self
                    .list_of_active_formatting_elements
                    .position_of(&node)
                    .unwrap();
                self.list_of_active_formatting_elements[afe_idx] =
                    Entry::Element(clone.to_owned());
                let oe_idx = self
                    .stack_of_open_elements
                    .index_of(&node)
                    .unwrap();
                self.stack_of_open_elements[oe_idx] = clone.to_owned();
                node = clone;

                if last_node == furthest_block {
                    bookmark = self
                        .list_of_active_formatting_elements
                        .position_of(&node)
                        .unwrap()
                        + 1;
                }

                last_node.detach();
                node.append_child(last_node.to_owned());
                last_node = node;
            }

            // Rattacher last_node à l'ancêtre commun, sauf pour les
            // tables mal imbriquées, qui passent par le parent
            // nourricier.
            last_node.detach();
            if common_ancestor
                .element_ref()
                .local_name()
                .is_one_of([
                    tag_names::table,
                    tag_names::tbody,
                    tag_names::tfoot,
                    tag_names::thead,
                    tag_names::tr,
                ])
            {
                self.foster_parent_node(last_node.to_owned());
            } else {
                common_ancestor.append_child(last_node.to_owned());
            }

            // Déplacer les enfants du furthest block sur un clone de
            // l'élément de mise en forme, puis y accrocher le clone.
            let clone = self.clone_element_node(&formatting_element);
            self.reparent_children(&clone, &furthest_block);
            furthest_block.append_child(clone.to_owned());

            // Corriger la liste des éléments de mise en forme actifs.
            if let Some(old_position) = self
                .list_of_active_formatting_elements
                .position_of(&formatting_element)
            {
                if old_position < bookmark {
                    bookmark -= 1;
                }
            }
            self.list_of_active_formatting_elements
                .remove_element(&formatting_element);
            self.list_of_active_formatting_elements
                .insert(bookmark, Entry::Element(clone.to_owned()));

            // Corriger la pile des éléments ouverts.
            self.stack_of_open_elements.remove(&formatting_element);
            let fb_index = self
                .stack_of_open_elements
                .index_of(&furthest_block)
                .expect("La position du furthest block");
            self.stack_of_open_elements.insert(fb_index + 1, clone);
        }
    }

    /// Le traitement "any other end tag" du mode "in body" : remonter
    /// la pile jusqu'à une balise correspondante, en s'arrêtant au
    /// premier élément spécial.
    pub(crate) fn any_other_end_tag_in_body(&mut self, tag_name: &str) {
        for idx in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[idx].to_owned();
            if node.element_ref().local_name() == tag_name {
                self.stack_of_open_elements.truncate(idx);
                break;
            }
            if is_special_element(&node) {
                break;
            }
        }
    }
}
