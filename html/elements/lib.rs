/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

pub mod interface;
mod tags;

use std::cell::{Ref, RefCell};

use infra::namespace::Namespace;
use interface::IsOneOfTagsInterface;

pub use self::tags::{tag_attributes, tag_names};

// --------- //
// Structure //
// --------- //

/// Un attribut d'élément. Le préfixe et l'espace de noms ne sont
/// renseignés que pour les attributs étrangers ajustés (xlink:href,
/// xml:lang, xmlns, ...).
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub prefix: Option<String>,
    pub namespace: Option<Namespace>,
}

/// Un élément : un nom local, un espace de noms et une liste
/// d'attributs ordonnée. Les clés d'attributs sont uniques et
/// conservées dans leur ordre de première occurrence.
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Namespace,
    pub attributes: RefCell<Vec<Attribute>>,
}

// -------------- //
// Implémentation //
// -------------- //

impl Attribute {
    pub fn new(name: impl ToString, value: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            prefix: None,
            namespace: None,
        }
    }
}

impl<S1, S2> From<(S1, S2)> for Attribute
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    fn from(nv: (S1, S2)) -> Self {
        Self::new(nv.0.as_ref(), nv.1.as_ref())
    }
}

// Self
impl Element {
    pub fn new(name: impl ToString, namespace: Namespace) -> Self {
        Self {
            name: name.to_string(),
            namespace,
            attributes: Default::default(),
        }
    }
}

// &Self
impl Element {
    pub fn local_name(&self) -> &str {
        &self.name
    }

    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn isin_html_namespace(&self) -> bool {
        self.namespace == Namespace::HTML
    }

    pub fn isin_mathml_namespace(&self) -> bool {
        self.namespace == Namespace::MathML
    }

    pub fn isin_svg_namespace(&self) -> bool {
        self.namespace == Namespace::SVG
    }

    /// Un point d'intégration de texte MathML est un élément mi, mo,
    /// mn, ms ou mtext de l'espace de noms MathML.
    pub fn is_mathml_text_integration_point(&self) -> bool {
        self.isin_mathml_namespace()
            && self.local_name().is_one_of([
                tag_names::mi,
                tag_names::mo,
                tag_names::mn,
                tag_names::ms,
                tag_names::mtext,
            ])
    }

    /// Un point d'intégration HTML est un élément SVG foreignObject,
    /// desc ou title, ou un élément MathML annotation-xml dont
    /// l'attribut encoding vaut "text/html" ou "application/xhtml+xml"
    /// (sans tenir compte de la casse).
    pub fn is_html_integration_point(&self) -> bool {
        if self.isin_svg_namespace() {
            return self.local_name().is_one_of([
                tag_names::foreignObject,
                tag_names::desc,
                tag_names::title,
            ]);
        }

        if self.isin_mathml_namespace()
            && tag_names::annotationXml == self.local_name()
        {
            return self
                .attribute(tag_attributes::encoding.as_str())
                .map(|encoding| {
                    encoding.eq_ignore_ascii_case("text/html")
                        || encoding
                            .eq_ignore_ascii_case("application/xhtml+xml")
                })
                .unwrap_or(false);
        }

        false
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.to_owned())
    }

    pub fn attributes(&self) -> Ref<'_, Vec<Attribute>> {
        self.attributes.borrow()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes
            .borrow()
            .iter()
            .any(|attribute| attribute.name == name)
    }

    /// Vrai si l'autre élément porte exactement les mêmes attributs
    /// (nom, valeur, espace de noms), indépendamment de l'ordre.
    pub fn has_identical_attributes(&self, other: &Self) -> bool {
        let ours = self.attributes.borrow();
        let theirs = other.attributes.borrow();

        ours.len() == theirs.len()
            && ours.iter().all(|attribute| {
                theirs.iter().any(|other_attribute| {
                    attribute == other_attribute
                })
            })
    }
}

// &mut Self
impl Element {
    /// Ajoute un attribut en conservant la première occurrence : si la
    /// clé existe déjà, la valeur en place est conservée.
    pub fn append_attribute(&self, attribute: Attribute) {
        if self.has_attribute(&attribute.name) {
            return;
        }
        self.attributes.borrow_mut().push(attribute);
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut attributes = self.attributes.borrow_mut();
        if let Some(attribute) =
            attributes.iter_mut().find(|attribute| attribute.name == name)
        {
            attribute.value = value.to_owned();
            return;
        }
        attributes.push(Attribute::new(name, value));
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_order_is_first_occurrence() {
        let element = Element::new("div", Namespace::HTML);
        element.append_attribute(Attribute::new("id", "a"));
        element.append_attribute(Attribute::new("class", "b"));
        element.append_attribute(Attribute::new("id", "ignored"));

        let names: Vec<String> = element
            .attributes()
            .iter()
            .map(|attribute| attribute.name.to_owned())
            .collect();
        assert_eq!(names, ["id", "class"]);
        assert_eq!(element.attribute("id").unwrap(), "a");
    }

    #[test]
    fn test_html_integration_point() {
        let fo = Element::new("foreignObject", Namespace::SVG);
        assert!(fo.is_html_integration_point());

        let fo_html = Element::new("foreignObject", Namespace::HTML);
        assert!(!fo_html.is_html_integration_point());

        let annotation =
            Element::new("annotation-xml", Namespace::MathML);
        assert!(!annotation.is_html_integration_point());
        annotation.set_attribute("encoding", "TEXT/HTML");
        assert!(annotation.is_html_integration_point());
    }

    #[test]
    fn test_mathml_text_integration_point() {
        let mtext = Element::new("mtext", Namespace::MathML);
        assert!(mtext.is_mathml_text_integration_point());

        let mtext_html = Element::new("mtext", Namespace::HTML);
        assert!(!mtext_html.is_mathml_text_integration_point());
    }

    #[test]
    fn test_identical_attributes() {
        let left = Element::new("b", Namespace::HTML);
        let right = Element::new("b", Namespace::HTML);
        left.append_attribute(Attribute::new("id", "x"));
        right.append_attribute(Attribute::new("id", "x"));
        assert!(left.has_identical_attributes(&right));

        right.set_attribute("id", "y");
        assert!(!left.has_identical_attributes(&right));
    }
}
