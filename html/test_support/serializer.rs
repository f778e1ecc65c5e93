/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt::Write;

use dom::node::Node;
use infra::structure::tree::TreeNode;

/// Les éléments vides : sérialisés sans balise de fin, leurs enfants
/// éventuels sont ignorés.
const VOID_ELEMENTS: [&str; 16] = [
    "area", "base", "br", "col", "command", "embed", "frame", "hr",
    "img", "input", "keygen", "link", "meta", "param", "source",
    "track",
];

/// Les éléments dont le contenu texte est rendu sans échappement.
const PLAINTEXT_ELEMENTS: [&str; 8] = [
    "iframe", "noembed", "noframes", "noscript", "plaintext",
    "script", "style", "xmp",
];

/// Rend un arbre (ou un sous-arbre) en texte HTML. Suffisant pour
/// vérifier la propriété d'aller-retour analyse → rendu → analyse.
pub fn serialize(node: &TreeNode<Node>) -> String {
    let mut output = String::new();
    render_node(&mut output, node, false);
    output
}

fn render_node(
    output: &mut String,
    node: &TreeNode<Node>,
    parent_is_plaintext: bool,
) {
    if node.is_document() {
        for child in node.children() {
            render_node(output, &child, false);
        }
        return;
    }

    if node.is_doctype() {
        writeln!(output, "<!DOCTYPE {}>", node.doctype_ref().name)
            .unwrap();
        return;
    }

    if node.is_comment() {
        write!(
            output,
            "<!--{}-->",
            node.character_data_ref().data()
        )
        .unwrap();
        return;
    }

    if node.is_text() {
        let data = node.character_data_ref().data();
        if parent_is_plaintext {
            output.push_str(&data);
        } else {
            output.push_str(&escape_text(&data));
        }
        return;
    }

    let element = node.element_ref();
    let name = element.local_name().to_owned();

    output.push('<');
    output.push_str(&name);
    for attribute in element.attributes().iter() {
        output.push(' ');
        if let Some(prefix) = attribute.prefix.as_deref() {
            if !prefix.is_empty() {
                output.push_str(prefix);
                output.push(':');
            }
        }
        output.push_str(&attribute.name);
        output.push_str("=\"");
        output.push_str(&escape_attribute(&attribute.value));
        output.push('"');
    }
    output.push('>');

    if VOID_ELEMENTS.contains(&name.as_str()) {
        return;
    }

    let is_plaintext = PLAINTEXT_ELEMENTS.contains(&name.as_str());
    for child in node.children() {
        render_node(output, &child, is_plaintext);
    }

    output.push_str("</");
    output.push_str(&name);
    output.push('>');
}

fn escape_text(data: &str) -> String {
    data.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
