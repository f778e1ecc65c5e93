/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt::Write;

use dom::node::Node;
use infra::{namespace::Namespace, structure::tree::TreeNode};

/// Sérialise un arbre au format de comparaison des suites de tests
/// html5lib : une ligne par noeud, préfixée de `| ` et indentée de
/// deux espaces par niveau. Les éléments étrangers sont préfixés de
/// leur espace de noms (`svg foreignObject`), les attributs ajustés
/// de leur préfixe (`xlink href`). Les attributs sont listés dans
/// leur ordre de première occurrence.
pub fn dump_tree(root: &TreeNode<Node>) -> String {
    let mut output = String::new();
    for child in root.children() {
        write_node(&mut output, &child, 0);
    }
    output
}

fn write_node(
    output: &mut String,
    node: &TreeNode<Node>,
    depth: usize,
) {
    let indent = "  ".repeat(depth);

    if node.is_element() {
        let element = node.element_ref();
        let name = match element.namespace() {
            | Namespace::HTML => element.local_name().to_owned(),
            | namespace => format!(
                "{} {}",
                namespace.prefix(),
                element.local_name()
            ),
        };
        writeln!(output, "| {indent}<{name}>").unwrap();

        for attribute in element.attributes().iter() {
            let attribute_name = match attribute.prefix.as_deref() {
                | Some(prefix) if !prefix.is_empty() => {
                    format!("{} {}", prefix, attribute.name)
                }
                | _ => attribute.name.to_owned(),
            };
            writeln!(
                output,
                "| {indent}  {attribute_name}=\"{}\"",
                attribute.value
            )
            .unwrap();
        }

        for child in node.children() {
            write_node(output, &child, depth + 1);
        }
        return;
    }

    if node.is_text() {
        writeln!(
            output,
            "| {indent}\"{}\"",
            node.character_data_ref().data()
        )
        .unwrap();
        return;
    }

    if node.is_comment() {
        writeln!(
            output,
            "| {indent}<!-- {} -->",
            node.character_data_ref().data()
        )
        .unwrap();
        return;
    }

    if node.is_doctype() {
        let doctype = node.doctype_ref();
        if doctype.public_id.is_empty() && doctype.system_id.is_empty()
        {
            writeln!(output, "| <!DOCTYPE {}>", doctype.name)
                .unwrap();
        } else {
            writeln!(
                output,
                "| <!DOCTYPE {} \"{}\" \"{}\">",
                doctype.name, doctype.public_id, doctype.system_id
            )
            .unwrap();
        }
    }
}
