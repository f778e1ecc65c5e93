/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::ops;

use dom::node::Node;
use html_elements::tag_names;
use infra::{namespace::Namespace, structure::tree::TreeNode};

// --------- //
// Structure //
// --------- //

/// La pile des éléments ouverts : les éléments en cours de
/// construction, la racine en bas de pile. La pile ne possède pas les
/// noeuds ; elle tient des poignées vers des noeuds que l'arbre
/// possède.
#[derive(Default)]
pub(crate) struct StackOfOpenElements {
    elements: Vec<TreeNode<Node>>,
}

// ----------- //
// Énumération //
// ----------- //

/// Les sept portées des parcours de pile. Chacune est paramétrée par
/// un ensemble de balises d'arrêt qui borne le parcours.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub(crate) enum Scope {
    Default,
    ListItem,
    Button,
    Table,
    TableRow,
    TableBody,
    Select,
}

// -------------- //
// Implémentation //
// -------------- //

impl StackOfOpenElements {
    /// Balises d'arrêt de la portée par défaut, par espace de noms.
    /// Les points d'intégration MathML et SVG bornent les parcours
    /// des sous-arbres étrangers.
    const DEFAULT_STOP_TAGS_HTML: [tag_names; 8] = [
        tag_names::applet,
        tag_names::caption,
        tag_names::html,
        tag_names::table,
        tag_names::td,
        tag_names::th,
        tag_names::marquee,
        tag_names::object,
    ];
    const DEFAULT_STOP_TAGS_MATHML: [tag_names; 6] = [
        tag_names::annotationXml,
        tag_names::mi,
        tag_names::mn,
        tag_names::mo,
        tag_names::ms,
        tag_names::mtext,
    ];
    const DEFAULT_STOP_TAGS_SVG: [tag_names; 3] = [
        tag_names::desc,
        tag_names::foreignObject,
        tag_names::title,
    ];

    /// Le noeud actuel est le noeud le plus bas de cette pile
    /// d'éléments ouverts.
    pub(crate) fn current_node(&self) -> Option<&TreeNode<Node>> {
        self.elements.last()
    }

    pub(crate) fn put(&mut self, element: TreeNode<Node>) {
        self.elements.push(element);
    }

    pub(crate) fn pop(&mut self) -> Option<TreeNode<Node>> {
        self.elements.pop()
    }

    pub(crate) fn contains(&self, node: &TreeNode<Node>) -> bool {
        self.index_of(node).is_some()
    }

    pub(crate) fn index_of(
        &self,
        node: &TreeNode<Node>,
    ) -> Option<usize> {
        self.elements.iter().position(|element| element == node)
    }

    /// Retire un noeud de la pile, où qu'il se trouve. Sans effet si
    /// le noeud n'y est pas.
    pub(crate) fn remove(&mut self, node: &TreeNode<Node>) {
        if let Some(idx) = self.index_of(node) {
            self.elements.remove(idx);
        }
    }

    /// L'élément immédiatement au-dessous de l'élément donné par son
    /// index (vers le bas de la pile).
    pub(crate) fn element_immediately_below(
        &self,
        index: usize,
    ) -> Option<&TreeNode<Node>> {
        index.checked_sub(1).and_then(|idx| self.elements.get(idx))
    }

    /// Index, en partant du haut de la pile, du premier élément dont
    /// la balise correspond à l'une des balises recherchées et qui se
    /// trouve dans la portée donnée. Le parcours s'arrête sans
    /// correspondance dès qu'une balise d'arrêt de la portée est
    /// rencontrée.
    ///
    /// Les correspondances de balises ne s'appliquent qu'aux éléments
    /// de l'espace de noms HTML ; les éléments étrangers sont
    /// transparents, sauf au travers des ensembles de balises d'arrêt.
    pub(crate) fn index_of_element_in_scope(
        &self,
        scope: Scope,
        match_tags: impl IntoIterator<Item = tag_names> + Copy,
    ) -> Option<usize> {
        for (idx, node) in self.elements.iter().enumerate().rev() {
            let element = node.element_ref();
            let name = element.local_name();

            if element.isin_html_namespace() {
                if match_tags
                    .into_iter()
                    .any(|tag_name| tag_name == name)
                {
                    return Some(idx);
                }

                match scope {
                    | Scope::Default => {}
                    | Scope::ListItem => {
                        if name.eq("ol") || name.eq("ul") {
                            return None;
                        }
                    }
                    | Scope::Button => {
                        if tag_names::button == name {
                            return None;
                        }
                    }
                    | Scope::Table => {
                        if name.eq("html") || name.eq("table") {
                            return None;
                        }
                    }
                    | Scope::Select => {
                        // Portée inversée : toute balise autre que
                        // optgroup/option ferme la portée.
                        if !(name.eq("optgroup") || name.eq("option")) {
                            return None;
                        }
                    }
                    | Scope::TableRow | Scope::TableBody => {
                        unreachable!(
                            "Portée réservée à clear_to_context."
                        );
                    }
                }
            }

            if matches!(
                scope,
                Scope::Default | Scope::ListItem | Scope::Button
            ) {
                let stop_tags: &[tag_names] = match element.namespace()
                {
                    | Namespace::HTML => &Self::DEFAULT_STOP_TAGS_HTML,
                    | Namespace::MathML => {
                        &Self::DEFAULT_STOP_TAGS_MATHML
                    }
                    | Namespace::SVG => &Self::DEFAULT_STOP_TAGS_SVG,
                    | _ => &[],
                };
                if stop_tags.iter().any(|tag_name| *tag_name == name) {
                    return None;
                }
            }
        }

        None
    }

    pub(crate) fn has_element_in_scope(
        &self,
        scope: Scope,
        match_tags: impl IntoIterator<Item = tag_names> + Copy,
    ) -> bool {
        self.index_of_element_in_scope(scope, match_tags).is_some()
    }

    /// Tronque la pile au premier élément en portée dont la balise
    /// correspond : l'élément trouvé et tout ce qui est au-dessus de
    /// lui sont retirés. Sans correspondance, la pile est inchangée.
    pub(crate) fn pop_until(
        &mut self,
        scope: Scope,
        match_tags: impl IntoIterator<Item = tag_names> + Copy,
    ) -> bool {
        if let Some(idx) =
            self.index_of_element_in_scope(scope, match_tags)
        {
            self.elements.truncate(idx);
            return true;
        }
        false
    }

    /// Dépile jusqu'à ce que le sommet soit un élément de contexte de
    /// la portée donnée. L'élément de contexte lui-même est conservé.
    pub(crate) fn clear_to_context(&mut self, scope: Scope) {
        for (idx, node) in self.elements.iter().enumerate().rev() {
            let element = node.element_ref();
            let name = element.local_name();

            let found = match scope {
                | Scope::Table => name.eq("html") || name.eq("table"),
                | Scope::TableRow => name.eq("html") || name.eq("tr"),
                | Scope::TableBody => {
                    name.eq("html")
                        || name.eq("tbody")
                        || name.eq("tfoot")
                        || name.eq("thead")
                }
                | _ => unreachable!(
                    "Portée sans contexte de pile défini."
                ),
            };

            if found {
                self.elements.truncate(idx + 1);
                return;
            }
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl ops::Deref for StackOfOpenElements {
    type Target = Vec<TreeNode<Node>>;

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl ops::DerefMut for StackOfOpenElements {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use dom::node::ElementNode;
    use html_elements::Element;

    use super::*;

    fn push_html(
        stack: &mut StackOfOpenElements,
        name: &str,
    ) -> TreeNode<Node> {
        let node: TreeNode<Node> =
            ElementNode::new(Element::new(name, Namespace::HTML))
                .into();
        stack.put(node.clone());
        node
    }

    fn stack_of(names: &[&str]) -> StackOfOpenElements {
        let mut stack = StackOfOpenElements::default();
        for name in names {
            push_html(&mut stack, name);
        }
        stack
    }

    #[test]
    fn test_pop_until_stops_at_scope_boundary() {
        // ["html", "body", "font", "table", "b", "i", "u"]
        let mut stack = stack_of(&[
            "html", "body", "font", "table", "b", "i", "u",
        ]);

        assert!(!stack.pop_until(Scope::Table, [tag_names::font]));
        assert_eq!(stack.len(), 7);

        assert!(stack.pop_until(Scope::Table, [tag_names::i]));
        let names: Vec<String> = stack
            .iter()
            .map(|node| node.element_ref().local_name().to_owned())
            .collect();
        assert_eq!(names, ["html", "body", "font", "table", "b"]);
    }

    #[test]
    fn test_pop_until_matches_stop_tag_itself() {
        let mut stack =
            stack_of(&["html", "body", "font", "table", "b"]);
        assert!(stack.pop_until(Scope::Table, [tag_names::table]));
        let names: Vec<String> = stack
            .iter()
            .map(|node| node.element_ref().local_name().to_owned())
            .collect();
        assert_eq!(names, ["html", "body", "font"]);
    }

    #[test]
    fn test_button_scope() {
        let stack = stack_of(&["html", "body", "p", "button", "span"]);
        assert!(!stack.has_element_in_scope(
            Scope::Button,
            [tag_names::p]
        ));

        let stack = stack_of(&["html", "body", "p", "span"]);
        assert!(
            stack.has_element_in_scope(Scope::Button, [tag_names::p])
        );
    }

    #[test]
    fn test_list_item_scope() {
        let stack = stack_of(&["html", "body", "li", "ul", "span"]);
        assert!(!stack.has_element_in_scope(
            Scope::ListItem,
            [tag_names::li]
        ));
    }

    #[test]
    fn test_select_scope_is_inverted() {
        let stack =
            stack_of(&["html", "body", "select", "optgroup", "option"]);
        assert!(stack.has_element_in_scope(
            Scope::Select,
            [tag_names::select]
        ));

        let stack =
            stack_of(&["html", "body", "select", "div", "option"]);
        assert!(!stack.has_element_in_scope(
            Scope::Select,
            [tag_names::select]
        ));
    }

    #[test]
    fn test_foreign_element_is_transparent() {
        let mut stack = stack_of(&["html", "body", "p"]);
        let svg: TreeNode<Node> =
            ElementNode::new(Element::new("svg", Namespace::SVG))
                .into();
        stack.put(svg);

        assert!(
            stack.has_element_in_scope(Scope::Default, [tag_names::p])
        );
    }

    #[test]
    fn test_foreign_stop_tag_closes_scope() {
        let mut stack = stack_of(&["html", "body", "p"]);
        let foreign_object: TreeNode<Node> = ElementNode::new(
            Element::new("foreignObject", Namespace::SVG),
        )
        .into();
        stack.put(foreign_object);

        assert!(
            !stack.has_element_in_scope(Scope::Default, [tag_names::p])
        );
    }

    #[test]
    fn test_clear_to_context() {
        let mut stack =
            stack_of(&["html", "table", "tbody", "tr", "td", "b"]);
        stack.clear_to_context(Scope::TableRow);
        let names: Vec<String> = stack
            .iter()
            .map(|node| node.element_ref().local_name().to_owned())
            .collect();
        assert_eq!(names, ["html", "table", "tbody", "tr"]);
    }
}
