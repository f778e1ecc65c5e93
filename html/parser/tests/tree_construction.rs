/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::node::{ElementNode, Node};
use html_elements::Element;
use html_parser::{parse_document, parse_fragment};
use html_test_support::{dump_tree, serialize, MiniTokenizer};
use infra::{namespace::Namespace, structure::tree::TreeNode};
use pretty_assertions::assert_eq;

fn parse_to_dump(input: &str) -> String {
    let document = parse_document(MiniTokenizer::new(input))
        .expect("L'analyse du document");
    dump_tree(&document)
}

/// Chaque noeud de l'arbre retourné a exactement un parent, les
/// listes d'enfants sont cohérentes, aucun noeud texte n'est adjacent
/// à un autre, et les clés d'attributs sont uniques.
fn assert_tree_invariants(node: &TreeNode<Node>) {
    let mut previous_was_text = false;

    for child in node.children() {
        assert_eq!(
            child.parent_node().expect("Un parent"),
            *node,
            "enfant orphelin ou mal rattaché"
        );

        assert!(
            !(previous_was_text && child.is_text()),
            "deux noeuds texte adjacents"
        );
        previous_was_text = child.is_text();

        if child.is_element() {
            let element = child.element_ref();
            let attributes = element.attributes();
            for (idx, attribute) in attributes.iter().enumerate() {
                assert!(
                    !attributes[..idx]
                        .iter()
                        .any(|other| other.name == attribute.name),
                    "clé d'attribut dupliquée: {}",
                    attribute.name
                );
            }
        }

        assert_tree_invariants(&child);
    }
}

#[test]
fn test_empty_input_builds_skeleton() {
    assert_eq!(
        parse_to_dump(""),
        "\
| <html>
|   <head>
|   <body>
"
    );
}

#[test]
fn test_paragraph_with_text() {
    assert_eq!(
        parse_to_dump("<p>Hello"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       \"Hello\"
"
    );
}

#[test]
fn test_adoption_agency_clones_misnested_formatting() {
    assert_eq!(
        parse_to_dump("<b><i>x</b>y"),
        "\
| <html>
|   <head>
|   <body>
|     <b>
|       <i>
|         \"x\"
|     <i>
|       \"y\"
"
    );
}

#[test]
fn test_adoption_agency_clone_keeps_attributes() {
    assert_eq!(
        parse_to_dump("<b id=\"x\"><p>y</b>"),
        "\
| <html>
|   <head>
|   <body>
|     <b>
|       id=\"x\"
|     <p>
|       <b>
|         id=\"x\"
|         \"y\"
"
    );
}

#[test]
fn test_implicit_paragraph_close() {
    assert_eq!(
        parse_to_dump("<p>a<p>b"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       \"a\"
|     <p>
|       \"b\"
"
    );
}

#[test]
fn test_select_with_sibling_options() {
    assert_eq!(
        parse_to_dump("<select><option>a<option>b</select>"),
        "\
| <html>
|   <head>
|   <body>
|     <select>
|       <option>
|         \"a\"
|       <option>
|         \"b\"
"
    );
}

#[test]
fn test_svg_foreign_object_integration_point() {
    assert_eq!(
        parse_to_dump(
            "<svg><g><foreignObject><p>x</foreignObject></g></svg>"
        ),
        "\
| <html>
|   <head>
|   <body>
|     <svg svg>
|       <svg g>
|         <svg foreignObject>
|           <p>
|             \"x\"
"
    );
}

#[test]
fn test_table_with_implied_sections() {
    assert_eq!(
        parse_to_dump("<table><td>x</table>"),
        "\
| <html>
|   <head>
|   <body>
|     <table>
|       <tbody>
|         <tr>
|           <td>
|             \"x\"
"
    );
}

#[test]
fn test_table_text_is_foster_parented() {
    assert_eq!(
        parse_to_dump("<table>x<td>y</table>"),
        "\
| <html>
|   <head>
|   <body>
|     \"x\"
|     <table>
|       <tbody>
|         <tr>
|           <td>
|             \"y\"
"
    );
}

#[test]
fn test_isindex_scaffold() {
    assert_eq!(
        parse_to_dump(
            "<isindex prompt=\"Q:\" action=\"/s\" foo=\"bar\">"
        ),
        "\
| <html>
|   <head>
|   <body>
|     <form>
|       action=\"/s\"
|       <hr>
|       <label>
|         \"Q:\"
|         <input>
|           name=\"isindex\"
|           foo=\"bar\"
|       <hr>
"
    );
}

#[test]
fn test_root_html_attributes_are_merged() {
    assert_eq!(
        parse_to_dump(
            "<html lang=\"a\"><html lang=\"b\" class=\"c\">"
        ),
        "\
| <html>
|   lang=\"a\"
|   class=\"c\"
|   <head>
|   <body>
"
    );
}

#[test]
fn test_quirks_mode_gates_paragraph_close_before_table() {
    // Sans doctype, le document est en mode quirks : la table reste
    // dans le paragraphe ouvert.
    assert_eq!(
        parse_to_dump("<p><table></table>"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       <table>
"
    );

    // En mode standard, la balise de début table ferme d'abord le
    // paragraphe.
    assert_eq!(
        parse_to_dump("<!DOCTYPE html><p><table></table>"),
        "\
| <!DOCTYPE html>
| <html>
|   <head>
|   <body>
|     <p>
|     <table>
"
    );
}

#[test]
fn test_leading_newline_elision() {
    assert_eq!(
        parse_to_dump("<pre>\nx</pre>"),
        "\
| <html>
|   <head>
|   <body>
|     <pre>
|       \"x\"
"
    );

    assert_eq!(
        parse_to_dump("<textarea>\nabc</textarea>"),
        "\
| <html>
|   <head>
|   <body>
|     <textarea>
|       \"abc\"
"
    );
}

#[test]
fn test_comment_in_select_is_attached_to_current_node() {
    assert_eq!(
        parse_to_dump("<select><!--c--><option>a</select>"),
        "\
| <html>
|   <head>
|   <body>
|     <select>
|       <!-- c -->
|       <option>
|         \"a\"
"
    );
}

#[test]
fn test_comment_after_body_is_attached_to_root() {
    assert_eq!(
        parse_to_dump("<body><p>x</p></body><!--c-->"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       \"x\"
|   <!-- c -->
"
    );
}

#[test]
fn test_head_whitespace_is_split() {
    // Les espaces de tête restent dans le head, le texte bascule dans
    // le body.
    assert_eq!(
        parse_to_dump("<head>  x"),
        "\
| <html>
|   <head>
|     \"  \"
|   <body>
|     \"x\"
"
    );
}

#[test]
fn test_end_tag_br_acts_as_start_tag() {
    assert_eq!(
        parse_to_dump("a</br>b"),
        "\
| <html>
|   <head>
|   <body>
|     \"a\"
|     <br>
|     \"b\"
"
    );
}

#[test]
fn test_frameset_replaces_body_when_allowed() {
    assert_eq!(
        parse_to_dump("<frameset><frame></frameset>"),
        "\
| <html>
|   <head>
|   <frameset>
|     <frame>
"
    );

    // Du contenu non trivial arme frameset-ok à "not ok" : le
    // frameset est ignoré.
    assert_eq!(
        parse_to_dump("<p>x</p><frameset>"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       \"x\"
"
    );
}

#[test]
fn test_invariants_on_hostile_input() {
    let inputs = [
        "<b><i>x</b>y",
        "<table>x<td>y</table><i>z",
        "<b><p>a</b>b<table><tr><td><b>c</table>",
        "<a href=\"u\">x<a>y</a>",
        "<svg><foreignObject><p>x</svg>y",
        "<select><table><option>a",
    ];

    for input in inputs {
        let document = parse_document(MiniTokenizer::new(input))
            .expect("L'analyse du document");
        assert_tree_invariants(&document);
    }
}

#[test]
fn test_round_trip_is_stable() {
    let input = "<!DOCTYPE html><html><head><title>Hello</title>\
                 </head><body><p>a b</p><table><tbody><tr><td>1\
                 </td></tr></tbody></table></body></html>";

    let first = parse_document(MiniTokenizer::new(input))
        .expect("L'analyse du document");
    let rendered = serialize(&first);
    let second = parse_document(MiniTokenizer::new(&rendered))
        .expect("La seconde analyse");

    assert_eq!(dump_tree(&first), dump_tree(&second));
}

#[test]
fn test_fragment_without_context_returns_document_children() {
    let children =
        parse_fragment(MiniTokenizer::new("<p>x"), None)
            .expect("L'analyse du fragment");

    assert_eq!(children.len(), 1);
    assert!(children[0].is_element());
    assert_eq!(children[0].element_ref().local_name(), "html");
    assert!(children[0].parent_node().is_none());
}

#[test]
fn test_fragment_with_div_context() {
    let context: TreeNode<Node> =
        ElementNode::new(Element::new("div", Namespace::HTML)).into();

    let children = parse_fragment(
        MiniTokenizer::new("<p>x</p><p>y</p>"),
        Some(context),
    )
    .expect("L'analyse du fragment");

    assert_eq!(children.len(), 2);
    for child in &children {
        assert_eq!(child.element_ref().local_name(), "p");
        assert!(child.parent_node().is_none());
    }
}

#[test]
fn test_fragment_with_tr_context() {
    let context: TreeNode<Node> =
        ElementNode::new(Element::new("tr", Namespace::HTML)).into();

    let children = parse_fragment(
        MiniTokenizer::new("<td>a<td>b"),
        Some(context),
    )
    .expect("L'analyse du fragment");

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].element_ref().local_name(), "td");
    assert_eq!(children[1].element_ref().local_name(), "td");
}

#[test]
fn test_fragment_with_raw_text_context() {
    let context: TreeNode<Node> = ElementNode::new(Element::new(
        "title",
        Namespace::HTML,
    ))
    .into();

    let children = parse_fragment(
        MiniTokenizer::new("<b>x"),
        Some(context),
    )
    .expect("L'analyse du fragment");

    assert_eq!(children.len(), 1);
    assert!(children[0].is_text());
    assert_eq!(
        children[0].character_data_ref().data(),
        "<b>x"
    );
}

#[test]
fn test_fragment_context_seeds_form_pointer() {
    let form: TreeNode<Node> =
        ElementNode::new(Element::new("form", Namespace::HTML))
            .into();
    let context: TreeNode<Node> =
        ElementNode::new(Element::new("div", Namespace::HTML)).into();
    form.append_child(context.clone());

    // Le pointeur de formulaire hérité du contexte empêche tout
    // nouvel élément form de s'ouvrir.
    let children = parse_fragment(
        MiniTokenizer::new("<form><p>x"),
        Some(context),
    )
    .expect("L'analyse du fragment");

    assert_eq!(children.len(), 1);
    assert_eq!(children[0].element_ref().local_name(), "p");
}
