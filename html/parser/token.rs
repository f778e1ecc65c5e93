/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::node::QuirksMode;
use html_elements::{
    interface::IsOneOfAttributesInterface, tag_attributes, Attribute,
};
use infra::namespace::Namespace;

// --------- //
// Structure //
// --------- //

/// Les jetons `start-tag`, `end-tag` et `self-closing-tag` ont :
///   - un nom de balise, déjà en minuscules ;
///   - un drapeau permettant de savoir s'il s'agit d'une balise
///     auto-fermante ;
///   - une liste ordonnée d'attributs aux clés uniques.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq)]
pub struct HTMLTagToken {
    pub(crate) name: String,
    pub(crate) self_closing_flag: bool,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) is_end: bool,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq)]
pub enum ForceQuirksFlag {
    On = 1,
    Off = 0,
}

/// Les jetons que l'étape de construction de l'arbre consomme :
///   - texte (la suite de caractères brute produite par le tokenizer) ;
///   - balise de début, de fin, auto-fermante ;
///   - commentaire ;
///   - DOCTYPE ;
///   - fin de flux.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum HTMLToken {
    Text(String),

    Tag(HTMLTagToken),

    /// Le jeton `comment` contient la chaîne de caractères du
    /// commentaire, délimiteurs exclus.
    Comment(String),

    /// Les jetons `DOCTYPE` ont un nom, un identifiant public, un
    /// identifiant système et un drapeau "force-quirks". Un identifiant
    /// manquant est un état distinct de la chaîne vide.
    DOCTYPE {
        name: Option<String>,
        public_identifier: Option<String>,
        system_identifier: Option<String>,
        force_quirks_flag: ForceQuirksFlag,
    },

    /// Le jeton distingué de fin de flux.
    EOF,
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLToken {
    pub fn new_start_tag(name: impl ToString) -> Self {
        Self::Tag(HTMLTagToken::start().with_name(name))
    }

    pub fn new_end_tag(name: impl ToString) -> Self {
        Self::Tag(HTMLTagToken::end().with_name(name))
    }

    pub fn new_text(text: impl ToString) -> Self {
        Self::Text(text.to_string())
    }

    pub fn new_comment(comment: impl ToString) -> Self {
        Self::Comment(comment.to_string())
    }

    pub const fn new_doctype() -> Self {
        Self::DOCTYPE {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks_flag: ForceQuirksFlag::Off,
        }
    }
}

// &Self
impl HTMLToken {
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    pub const fn is_start_tag(&self) -> bool {
        if let Self::Tag(HTMLTagToken { is_end, .. }) = self {
            !(*is_end)
        } else {
            false
        }
    }

    pub const fn is_end_tag(&self) -> bool {
        if let Self::Tag(HTMLTagToken { is_end, .. }) = self {
            *is_end
        } else {
            false
        }
    }

    pub const fn as_tag(&self) -> &HTMLTagToken {
        if let Self::Tag(tag) = self {
            return tag;
        }
        panic!("N'est pas un jeton de balise.");
    }

    pub fn as_tag_mut(&mut self) -> &mut HTMLTagToken {
        if let Self::Tag(tag) = self {
            return tag;
        }
        panic!("N'est pas un jeton de balise.");
    }
}

// ------------- //
// Jeton DOCTYPE //
// ------------- //

impl HTMLToken {
    /// Défini un nom pour le [DOCTYPE](HTMLToken::DOCTYPE).
    pub fn with_name(mut self, new_name: impl ToString) -> Self {
        assert!(matches!(self, Self::DOCTYPE { name: None, .. }));
        if let Self::DOCTYPE { ref mut name, .. } = self {
            *name = Some(new_name.to_string());
        }
        self
    }

    /// Défini un identificateur public pour le
    /// [DOCTYPE](HTMLToken::DOCTYPE).
    pub fn with_public_identifier(mut self, pid: impl ToString) -> Self {
        assert!(matches!(self, Self::DOCTYPE { .. }));
        if let Self::DOCTYPE {
            ref mut public_identifier,
            ..
        } = self
        {
            *public_identifier = pid.to_string().into();
        }
        self
    }

    /// Défini un identificateur système pour le
    /// [DOCTYPE](HTMLToken::DOCTYPE).
    pub fn with_system_identifier(mut self, sid: impl ToString) -> Self {
        assert!(matches!(self, Self::DOCTYPE { .. }));
        if let Self::DOCTYPE {
            ref mut system_identifier,
            ..
        } = self
        {
            *system_identifier = sid.to_string().into();
        }
        self
    }

    /// Active le drapeau `force-quirks` pour le
    /// [DOCTYPE](HTMLToken::DOCTYPE).
    pub fn with_quirks_mode(mut self) -> Self {
        assert!(matches!(self, Self::DOCTYPE { .. }));
        if let Self::DOCTYPE {
            ref mut force_quirks_flag,
            ..
        } = self
        {
            *force_quirks_flag = ForceQuirksFlag::On;
        }
        self
    }

    fn is_html_doctype_name(&self) -> bool {
        if let Self::DOCTYPE { name, .. } = self {
            matches!(name.as_deref(), Some("html"))
        } else {
            false
        }
    }

    /// Mode de rendu déduit du jeton DOCTYPE, d'après la table des
    /// déclencheurs de quirks de la spécification.
    pub(crate) fn quirks_mode(&self) -> QuirksMode {
        let (public_identifier, system_identifier) = match self {
            | Self::DOCTYPE {
                public_identifier,
                system_identifier,
                force_quirks_flag,
                ..
            } => {
                if ForceQuirksFlag::On.eq(force_quirks_flag) {
                    return QuirksMode::Yes;
                }
                (public_identifier, system_identifier)
            }
            | _ => panic!("N'est pas un jeton DOCTYPE."),
        };

        if !self.is_html_doctype_name() {
            return QuirksMode::Yes;
        }

        fn is_eq(maybe_id: &Option<String>, xid: &str) -> bool {
            matches!(maybe_id, Some(id) if id.eq_ignore_ascii_case(xid))
        }

        fn is_start_with(maybe_id: &Option<String>, xid: &str) -> bool {
            matches!(
                maybe_id,
                Some(id) if id
                    .to_ascii_lowercase()
                    .starts_with(&xid.to_ascii_lowercase())
            )
        }

        let is_quirky = DOCTYPE::PUBLIC_ID_DEFINED_RULE_1
            .into_iter()
            .any(|xid| is_eq(public_identifier, xid))
            || DOCTYPE::SYSTEM_ID_DEFINED_RULE_1
                .into_iter()
                .any(|xid| is_eq(system_identifier, xid))
            || DOCTYPE::PUBLIC_ID_STARTS_WITH_RULE_1
                .into_iter()
                .any(|xid| is_start_with(public_identifier, xid))
            || system_identifier.is_none()
                && DOCTYPE::PUBLIC_ID_STARTS_WITH_RULE_1_1
                    .into_iter()
                    .any(|xid| is_start_with(public_identifier, xid));

        if is_quirky {
            return QuirksMode::Yes;
        }

        let is_limited_quirky = DOCTYPE::PUBLIC_ID_STARTS_WITH_RULE_2
            .into_iter()
            .any(|xid| is_start_with(public_identifier, xid))
            || system_identifier.is_some()
                && DOCTYPE::PUBLIC_ID_STARTS_WITH_RULE_1_1
                    .into_iter()
                    .any(|xid| is_start_with(public_identifier, xid));

        if is_limited_quirky {
            return QuirksMode::Limited;
        }

        QuirksMode::No
    }
}

// --------- //
// Jeton tag //
// --------- //

impl HTMLTagToken {
    /// Lorsqu'un jeton `start-tag` est créé, son drapeau de fermeture
    /// automatique doit être désactivé et sa liste d'attributs vide.
    pub const fn start() -> Self {
        Self {
            name: String::new(),
            self_closing_flag: false,
            attributes: vec![],
            is_end: false,
        }
    }

    /// Lorsqu'un jeton `end-tag` est créé, son drapeau de fermeture
    /// automatique doit être désactivé et sa liste d'attributs vide.
    pub const fn end() -> Self {
        Self {
            name: String::new(),
            self_closing_flag: false,
            attributes: vec![],
            is_end: true,
        }
    }

    pub fn with_name(mut self, name: impl ToString) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_attributes(
        mut self,
        attributes: impl IntoIterator<Item = impl Into<Attribute>>,
    ) -> Self {
        self.attributes =
            attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_self_closing_flag(mut self) -> Self {
        self.self_closing_flag = true;
        self
    }
}

// &HTMLTagToken
impl HTMLTagToken {
    pub fn local_name(&self) -> &str {
        &self.name
    }

    pub const fn is_self_closing(&self) -> bool {
        self.self_closing_flag
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn has_attributes(
        &self,
        attribute_names: impl IntoIterator<Item = tag_attributes> + Copy,
    ) -> bool {
        self.attributes
            .iter()
            .any(|attribute| {
                attribute.name.as_str().is_one_of(attribute_names)
            })
    }
}

// &mut HTMLTagToken
impl HTMLTagToken {
    pub fn update_name(&mut self, name: impl ToString) {
        self.name = name.to_string();
    }

    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    /// Corrige le cas d'un nom d'attribut qui n'est pas entièrement en
    /// minuscules (tables MathML et SVG).
    pub fn adjust_attribute_name(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) {
        for attribute in self.attributes.iter_mut() {
            if attribute.name == old_name {
                attribute.name = new_name.to_owned();
            }
        }
    }

    /// Corrige l'utilisation d'attributs à espace de noms, en
    /// particulier XLink dans SVG.
    pub fn adjust_foreign_attribute(
        &mut self,
        old_name: &str,
        prefix: &str,
        local_name: &str,
        namespace: Namespace,
    ) {
        for attribute in self.attributes.iter_mut() {
            if attribute.name == old_name {
                attribute.name = local_name.to_owned();
                attribute.prefix = Some(prefix.to_owned());
                attribute.namespace = Some(namespace);
            }
        }
    }

    /// Corrige le cas d'un nom de balise SVG qui n'est pas entièrement
    /// en minuscules (foreignObject, linearGradient, ...).
    pub fn adjust_tag_name(&mut self, old_name: &str, new_name: &str) {
        if self.name == old_name {
            self.name = new_name.to_owned();
        }
    }
}

// --------------------------------- //
// Table des déclencheurs de quirks  //
// --------------------------------- //

#[allow(non_snake_case)]
mod DOCTYPE {
    pub(crate) const PUBLIC_ID_DEFINED_RULE_1: [&str; 3] = [
        "-//W3O//DTD W3 HTML Strict 3.0//EN//",
        "-/W3C/DTD HTML 4.0 Transitional/EN",
        "HTML",
    ];

    pub(crate) const SYSTEM_ID_DEFINED_RULE_1: [&str; 1] =
        ["http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"];

    pub(crate) const PUBLIC_ID_STARTS_WITH_RULE_1: [&str; 55] = [
        "+//Silmaril//dtd html Pro v0r11 19970101//",
        "-//AS//DTD HTML 3.0 asWedit + extensions//",
        "-//AdvaSoft Ltd//DTD HTML 3.0 asWedit + extensions//",
        "-//IETF//DTD HTML 2.0 Level 1//",
        "-//IETF//DTD HTML 2.0 Level 2//",
        "-//IETF//DTD HTML 2.0 Strict Level 1//",
        "-//IETF//DTD HTML 2.0 Strict Level 2//",
        "-//IETF//DTD HTML 2.0 Strict//",
        "-//IETF//DTD HTML 2.0//",
        "-//IETF//DTD HTML 2.1E//",
        "-//IETF//DTD HTML 3.0//",
        "-//IETF//DTD HTML 3.2 Final//",
        "-//IETF//DTD HTML 3.2//",
        "-//IETF//DTD HTML 3//",
        "-//IETF//DTD HTML Level 0//",
        "-//IETF//DTD HTML Level 1//",
        "-//IETF//DTD HTML Level 2//",
        "-//IETF//DTD HTML Level 3//",
        "-//IETF//DTD HTML Strict Level 0//",
        "-//IETF//DTD HTML Strict Level 1//",
        "-//IETF//DTD HTML Strict Level 2//",
        "-//IETF//DTD HTML Strict Level 3//",
        "-//IETF//DTD HTML Strict//",
        "-//IETF//DTD HTML//",
        "-//Metrius//DTD Metrius Presentational//",
        "-//Microsoft//DTD Internet Explorer 2.0 HTML Strict//",
        "-//Microsoft//DTD Internet Explorer 2.0 HTML//",
        "-//Microsoft//DTD Internet Explorer 2.0 Tables//",
        "-//Microsoft//DTD Internet Explorer 3.0 HTML Strict//",
        "-//Microsoft//DTD Internet Explorer 3.0 HTML//",
        "-//Microsoft//DTD Internet Explorer 3.0 Tables//",
        "-//Netscape Comm. Corp.//DTD HTML//",
        "-//Netscape Comm. Corp.//DTD Strict HTML//",
        "-//O'Reilly and Associates//DTD HTML 2.0//",
        "-//O'Reilly and Associates//DTD HTML Extended 1.0//",
        "-//O'Reilly and Associates//DTD HTML Extended Relaxed 1.0//",
        "-//SQ//DTD HTML 2.0 HoTMetaL + extensions//",
        "-//SoftQuad Software//DTD HoTMetaL PRO 6.0::19990601::extensions to HTML 4.0//",
        "-//SoftQuad//DTD HoTMetaL PRO 4.0::19971010::extensions to HTML 4.0//",
        "-//Spyglass//DTD HTML 2.0 Extended//",
        "-//Sun Microsystems Corp.//DTD HotJava HTML//",
        "-//Sun Microsystems Corp.//DTD HotJava Strict HTML//",
        "-//W3C//DTD HTML 3 1995-03-24//",
        "-//W3C//DTD HTML 3.2 Draft//",
        "-//W3C//DTD HTML 3.2 Final//",
        "-//W3C//DTD HTML 3.2//",
        "-//W3C//DTD HTML 3.2S Draft//",
        "-//W3C//DTD HTML 4.0 Frameset//",
        "-//W3C//DTD HTML 4.0 Transitional//",
        "-//W3C//DTD HTML Experimental 19960712//",
        "-//W3C//DTD HTML Experimental 970421//",
        "-//W3C//DTD W3 HTML//",
        "-//W3O//DTD W3 HTML 3.0//",
        "-//WebTechs//DTD Mozilla HTML 2.0//",
        "-//WebTechs//DTD Mozilla HTML//",
    ];

    /// Déclenche quirks quand l'identifiant système est manquant,
    /// limited-quirks quand il est présent.
    pub(crate) const PUBLIC_ID_STARTS_WITH_RULE_1_1: [&str; 2] = [
        "-//W3C//DTD HTML 4.01 Frameset//",
        "-//W3C//DTD HTML 4.01 Transitional//",
    ];

    pub(crate) const PUBLIC_ID_STARTS_WITH_RULE_2: [&str; 2] = [
        "-//W3C//DTD XHTML 1.0 Frameset//",
        "-//W3C//DTD XHTML 1.0 Transitional//",
    ];
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctype_quirks() {
        let token = HTMLToken::new_doctype().with_name("html");
        assert_eq!(token.quirks_mode(), QuirksMode::No);

        let token = HTMLToken::new_doctype().with_name("HtMl");
        assert_eq!(token.quirks_mode(), QuirksMode::Yes);

        let token = HTMLToken::new_doctype()
            .with_name("html")
            .with_quirks_mode();
        assert_eq!(token.quirks_mode(), QuirksMode::Yes);

        let token = HTMLToken::new_doctype()
            .with_name("html")
            .with_public_identifier("-//IETF//DTD HTML 2.0//EN");
        assert_eq!(token.quirks_mode(), QuirksMode::Yes);

        let token = HTMLToken::new_doctype()
            .with_name("html")
            .with_public_identifier(
                "-//W3C//DTD HTML 4.01 Transitional//EN",
            );
        assert_eq!(token.quirks_mode(), QuirksMode::Yes);

        let token = HTMLToken::new_doctype()
            .with_name("html")
            .with_public_identifier(
                "-//W3C//DTD HTML 4.01 Transitional//EN",
            )
            .with_system_identifier(
                "http://www.w3.org/TR/html4/loose.dtd",
            );
        assert_eq!(token.quirks_mode(), QuirksMode::Limited);
    }

    #[test]
    fn test_tag_attribute_lookup() {
        let token = HTMLToken::Tag(
            HTMLTagToken::start().with_name("input").with_attributes([
                ("type", "HIDDEN"),
                ("name", "q"),
            ]),
        );

        let tag = token.as_tag();
        assert_eq!(tag.attribute("type"), Some("HIDDEN"));
        assert!(tag.has_attributes([tag_attributes::name]));
        assert!(!tag.has_attributes([tag_attributes::color]));
    }

    #[test]
    fn test_adjust_tag_and_attribute_names() {
        let mut token = HTMLToken::Tag(
            HTMLTagToken::start()
                .with_name("foreignobject")
                .with_attributes([("xlink:href", "#")]),
        );

        let tag = token.as_tag_mut();
        tag.adjust_tag_name("foreignobject", "foreignObject");
        tag.adjust_foreign_attribute(
            "xlink:href",
            "xlink",
            "href",
            Namespace::XLink,
        );

        assert_eq!(tag.local_name(), "foreignObject");
        let attribute = &tag.attributes()[0];
        assert_eq!(attribute.name, "href");
        assert_eq!(attribute.prefix.as_deref(), Some("xlink"));
        assert_eq!(attribute.namespace, Some(Namespace::XLink));
    }
}
