/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

// ----------- //
// Énumération //
// ----------- //

/// Espaces de noms reconnus par l'étape de construction de l'arbre.
///
/// Les éléments HTML vivent dans l'espace de noms HTML ; les sous-arbres
/// étrangers utilisent MathML ou SVG. Les trois derniers espaces de noms
/// ne concernent que des attributs (xlink:href, xml:lang, xmlns, ...).
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(Default)]
#[derive(PartialEq, Eq)]
pub enum Namespace {
    #[default]
    HTML,
    MathML,
    SVG,
    XLink,
    XML,
    XMLNS,
}

// -------------- //
// Implémentation //
// -------------- //

impl Namespace {
    /// Préfixe court, utilisé pour représenter un élément étranger dans
    /// une sortie de débogage (p.ex. `svg foreignObject`). L'espace de
    /// noms HTML n'a pas de préfixe.
    pub const fn prefix(&self) -> &'static str {
        match self {
            | Self::HTML => "",
            | Self::MathML => "math",
            | Self::SVG => "svg",
            | Self::XLink => "xlink",
            | Self::XML => "xml",
            | Self::XMLNS => "xmlns",
        }
    }

    pub const fn uri(&self) -> &'static str {
        match self {
            | Self::HTML => "http://www.w3.org/1999/xhtml",
            | Self::MathML => "http://www.w3.org/1998/Math/MathML",
            | Self::SVG => "http://www.w3.org/2000/svg",
            | Self::XLink => "http://www.w3.org/1999/xlink",
            | Self::XML => "http://www.w3.org/XML/1998/namespace",
            | Self::XMLNS => "http://www.w3.org/2000/xmlns/",
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}
