/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_elements::{
    interface::IsOneOfTagsInterface, tag_attributes, tag_names,
};
use infra::namespace::Namespace;

use crate::{
    token::{HTMLTagToken, HTMLToken},
    tree_construction::{
        is_all_whitespace, strip_nulls, HTMLTreeConstruction,
        HTMLTreeConstructionControlFlow,
    },
    HTMLParserState,
};

// --------------------- //
// Tables de correction  //
// --------------------- //

/// Les balises de début HTML qui forcent la sortie d'un sous-arbre
/// étranger. `font` n'en fait partie que porteuse d'un attribut
/// color, face ou size.
const BREAKOUT_TAGS: [tag_names; 44] = [
    tag_names::b,
    tag_names::big,
    tag_names::blockquote,
    tag_names::body,
    tag_names::br,
    tag_names::center,
    tag_names::code,
    tag_names::dd,
    tag_names::div,
    tag_names::dl,
    tag_names::dt,
    tag_names::em,
    tag_names::embed,
    tag_names::h1,
    tag_names::h2,
    tag_names::h3,
    tag_names::h4,
    tag_names::h5,
    tag_names::h6,
    tag_names::head,
    tag_names::hr,
    tag_names::i,
    tag_names::img,
    tag_names::li,
    tag_names::listing,
    tag_names::menu,
    tag_names::meta,
    tag_names::nobr,
    tag_names::ol,
    tag_names::p,
    tag_names::pre,
    tag_names::ruby,
    tag_names::s,
    tag_names::small,
    tag_names::span,
    tag_names::strong,
    tag_names::strike,
    tag_names::sub,
    tag_names::sup,
    tag_names::table,
    tag_names::tt,
    tag_names::u,
    tag_names::ul,
    tag_names::var,
];

/// Le tokenizer produit des noms de balises en minuscules ; SVG veut
/// des formes canoniques à casse mixte.
const SVG_TAG_NAME_ADJUSTMENTS: [(&str, &str); 36] = [
    ("altglyph", "altGlyph"),
    ("altglyphdef", "altGlyphDef"),
    ("altglyphitem", "altGlyphItem"),
    ("animatecolor", "animateColor"),
    ("animatemotion", "animateMotion"),
    ("animatetransform", "animateTransform"),
    ("clippath", "clipPath"),
    ("feblend", "feBlend"),
    ("fecolormatrix", "feColorMatrix"),
    ("fecomponenttransfer", "feComponentTransfer"),
    ("fecomposite", "feComposite"),
    ("feconvolvematrix", "feConvolveMatrix"),
    ("fediffuselighting", "feDiffuseLighting"),
    ("fedisplacementmap", "feDisplacementMap"),
    ("fedistantlight", "feDistantLight"),
    ("feflood", "feFlood"),
    ("fefunca", "feFuncA"),
    ("fefuncb", "feFuncB"),
    ("fefuncg", "feFuncG"),
    ("fefuncr", "feFuncR"),
    ("fegaussianblur", "feGaussianBlur"),
    ("feimage", "feImage"),
    ("femerge", "feMerge"),
    ("femergenode", "feMergeNode"),
    ("femorphology", "feMorphology"),
    ("feoffset", "feOffset"),
    ("fepointlight", "fePointLight"),
    ("fespecularlighting", "feSpecularLighting"),
    ("fespotlight", "feSpotLight"),
    ("fetile", "feTile"),
    ("feturbulence", "feTurbulence"),
    ("foreignobject", "foreignObject"),
    ("glyphref", "glyphRef"),
    ("lineargradient", "linearGradient"),
    ("radialgradient", "radialGradient"),
    ("textpath", "textPath"),
];

const MATHML_ATTRIBUTE_ADJUSTMENTS: [(&str, &str); 1] =
    [("definitionurl", "definitionURL")];

const SVG_ATTRIBUTE_ADJUSTMENTS: [(&str, &str); 62] = [
    ("attributename", "attributeName"),
    ("attributetype", "attributeType"),
    ("basefrequency", "baseFrequency"),
    ("baseprofile", "baseProfile"),
    ("calcmode", "calcMode"),
    ("clippathunits", "clipPathUnits"),
    ("contentscripttype", "contentScriptType"),
    ("contentstyletype", "contentStyleType"),
    ("diffuseconstant", "diffuseConstant"),
    ("edgemode", "edgeMode"),
    ("externalresourcesrequired", "externalResourcesRequired"),
    ("filterres", "filterRes"),
    ("filterunits", "filterUnits"),
    ("glyphref", "glyphRef"),
    ("gradienttransform", "gradientTransform"),
    ("gradientunits", "gradientUnits"),
    ("kernelmatrix", "kernelMatrix"),
    ("kernelunitlength", "kernelUnitLength"),
    ("keypoints", "keyPoints"),
    ("keysplines", "keySplines"),
    ("keytimes", "keyTimes"),
    ("lengthadjust", "lengthAdjust"),
    ("limitingconeangle", "limitingConeAngle"),
    ("markerheight", "markerHeight"),
    ("markerunits", "markerUnits"),
    ("markerwidth", "markerWidth"),
    ("maskcontentunits", "maskContentUnits"),
    ("maskunits", "maskUnits"),
    ("numoctaves", "numOctaves"),
    ("pathlength", "pathLength"),
    ("patterncontentunits", "patternContentUnits"),
    ("patterntransform", "patternTransform"),
    ("patternunits", "patternUnits"),
    ("pointsatx", "pointsAtX"),
    ("pointsaty", "pointsAtY"),
    ("pointsatz", "pointsAtZ"),
    ("preservealpha", "preserveAlpha"),
    ("preserveaspectratio", "preserveAspectRatio"),
    ("primitiveunits", "primitiveUnits"),
    ("refx", "refX"),
    ("refy", "refY"),
    ("repeatcount", "repeatCount"),
    ("repeatdur", "repeatDur"),
    ("requiredextensions", "requiredExtensions"),
    ("requiredfeatures", "requiredFeatures"),
    ("specularconstant", "specularConstant"),
    ("specularexponent", "specularExponent"),
    ("spreadmethod", "spreadMethod"),
    ("startoffset", "startOffset"),
    ("stddeviation", "stdDeviation"),
    ("stitchtiles", "stitchTiles"),
    ("surfacescale", "surfaceScale"),
    ("systemlanguage", "systemLanguage"),
    ("tablevalues", "tableValues"),
    ("targetx", "targetX"),
    ("targety", "targetY"),
    ("textlength", "textLength"),
    ("viewbox", "viewBox"),
    ("viewtarget", "viewTarget"),
    ("xchannelselector", "xChannelSelector"),
    ("ychannelselector", "yChannelSelector"),
    ("zoomandpan", "zoomAndPan"),
];

const FOREIGN_ATTRIBUTE_ADJUSTMENTS: [(
    &str,
    &str,
    &str,
    Namespace,
); 11] = [
    ("xlink:actuate", "xlink", "actuate", Namespace::XLink),
    ("xlink:arcrole", "xlink", "arcrole", Namespace::XLink),
    ("xlink:href", "xlink", "href", Namespace::XLink),
    ("xlink:role", "xlink", "role", Namespace::XLink),
    ("xlink:show", "xlink", "show", Namespace::XLink),
    ("xlink:title", "xlink", "title", Namespace::XLink),
    ("xlink:type", "xlink", "type", Namespace::XLink),
    ("xml:lang", "xml", "lang", Namespace::XML),
    ("xml:space", "xml", "space", Namespace::XML),
    ("xmlns", "", "xmlns", Namespace::XMLNS),
    ("xmlns:xlink", "xmlns", "xlink", Namespace::XMLNS),
];

// -------------- //
// Implémentation //
// -------------- //

impl HTMLTreeConstruction {
    /// Le dispatcher de construction d'arbre passe la main aux règles
    /// du contenu étranger lorsque le noeud actuel est dans un espace
    /// de noms non HTML, sous réserve des clauses d'échappement qui
    /// rendent le contrôle aux modes d'insertion HTML aux points
    /// d'intégration, et du contournement pour la fin de flux.
    pub(crate) fn use_foreign_process(
        &self,
        token: &HTMLToken,
    ) -> bool {
        let cnode = match self.current_node() {
            | Some(cnode) => cnode,
            | None => return false,
        };

        let element = cnode.element_ref();
        if element.isin_html_namespace() {
            return false;
        }

        if element.is_mathml_text_integration_point() {
            if token.is_start_tag()
                && !token.as_tag().local_name().is_one_of([
                    tag_names::mglyph,
                    tag_names::malignmark,
                ])
            {
                return false;
            }
            if token.is_text() {
                return false;
            }
        }

        if element.isin_mathml_namespace()
            && tag_names::annotationXml == element.local_name()
            && token.is_start_tag()
            && tag_names::svg == token.as_tag().local_name()
        {
            return false;
        }

        if element.is_html_integration_point()
            && (token.is_start_tag() || token.is_text())
        {
            return false;
        }

        if token.is_eof() {
            return false;
        }

        true
    }

    pub(crate) fn process_using_the_rules_for_foreign_content(
        &mut self,
        mut token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            //
            // Insérer le texte, caractères NUL exclus. Un texte qui
            // n'est pas entièrement blanc fait passer frameset-ok à
            // "not ok".
            | HTMLToken::Text(ref text) => {
                let data = strip_nulls(text);
                if self.frameset_ok() && !is_all_whitespace(&data) {
                    self.set_frameset_not_ok();
                }
                if !data.is_empty() {
                    self.insert_text(&data);
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

            // A start tag appearing in the breakout set, or "font"
            // with a "color", "face" or "size" attribute
            //
            // Erreur d'analyse. Dépiler les éléments ouverts jusqu'à
            // exposer un élément HTML ou un point d'intégration, puis
            // retraiter le jeton selon le mode d'insertion courant.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: false,
                ..
            }) if name.is_one_of(BREAKOUT_TAGS)
                || tag_names::font == name
                    && token.as_tag().has_attributes([
                        tag_attributes::color,
                        tag_attributes::face,
                        tag_attributes::size,
                    ]) =>
            {
                self.parse_error(&token);

                for idx in
                    (0..self.stack_of_open_elements.len()).rev()
                {
                    let node =
                        self.stack_of_open_elements[idx].to_owned();
                    let element = node.element_ref();
                    if element.isin_html_namespace()
                        || element.is_html_integration_point()
                        || element.is_mathml_text_integration_point()
                    {
                        self.stack_of_open_elements
                            .truncate(idx + 1);
                        break;
                    }
                }

                return self.dispatch(token);
            }

            // Any other start tag
            //
            // Ajuster les noms d'attributs (et de balises, pour SVG)
            // selon l'espace de noms du noeud actuel, puis insérer un
            // élément étranger dans ce même espace de noms. Une balise
            // auto-fermante est aussitôt dépilée.
            | HTMLToken::Tag(HTMLTagToken {
                is_end: false, ..
            }) => {
                let namespace = self
                    .current_node()
                    .expect("Le noeud actuel")
                    .element_ref()
                    .namespace();

                match namespace {
                    | Namespace::MathML => {
                        self.adjust_mathml_attributes(
                            token.as_tag_mut(),
                        );
                    }
                    | Namespace::SVG => {
                        self.adjust_svg_tag_name(token.as_tag_mut());
                        self.adjust_svg_attributes(
                            token.as_tag_mut(),
                        );
                    }
                    | _ => unreachable!(
                        "Espace de noms inattendu en contenu \
                         étranger."
                    ),
                }

                self.adjust_foreign_attributes(token.as_tag_mut());
                self.insert_foreign_element(token.as_tag(), namespace);

                if token.as_tag().is_self_closing() {
                    self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_tag();
                }
            }

            // Any other end tag
            //
            // Remonter la pile à la recherche d'une balise
            // correspondante, sans tenir compte de la casse ; un
            // élément HTML rencontré en chemin rend le contrôle au
            // mode d'insertion courant.
            | HTMLToken::Tag(HTMLTagToken {
                ref name,
                is_end: true,
                ..
            }) => {
                let end_name = name.to_owned();

                for idx in
                    (0..self.stack_of_open_elements.len()).rev()
                {
                    let node =
                        self.stack_of_open_elements[idx].to_owned();

                    if node.element_ref().isin_html_namespace() {
                        return self.process_using_the_rules_for(
                            self.insertion_mode,
                            token,
                        );
                    }

                    if node
                        .element_ref()
                        .local_name()
                        .eq_ignore_ascii_case(&end_name)
                    {
                        self.stack_of_open_elements.truncate(idx);
                        break;
                    }
                }
            }

            // Anything else
            //
            // Ignorer le jeton.
            | _ => { /* Ignore */ }
        }

        HTMLTreeConstructionControlFlow::Continue(
            HTMLParserState::Continue,
        )
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adjust-mathml-attributes>
    pub(crate) fn adjust_mathml_attributes(
        &self,
        tag: &mut HTMLTagToken,
    ) {
        for (old_name, new_name) in MATHML_ATTRIBUTE_ADJUSTMENTS {
            tag.adjust_attribute_name(old_name, new_name);
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adjust-svg-attributes>
    pub(crate) fn adjust_svg_attributes(
        &self,
        tag: &mut HTMLTagToken,
    ) {
        for (old_name, new_name) in SVG_ATTRIBUTE_ADJUSTMENTS {
            tag.adjust_attribute_name(old_name, new_name);
        }
    }

    pub(crate) fn adjust_svg_tag_name(&self, tag: &mut HTMLTagToken) {
        for (old_name, new_name) in SVG_TAG_NAME_ADJUSTMENTS {
            tag.adjust_tag_name(old_name, new_name);
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes>
    pub(crate) fn adjust_foreign_attributes(
        &self,
        tag: &mut HTMLTagToken,
    ) {
        for (old_name, prefix, local_name, namespace) in
            FOREIGN_ATTRIBUTE_ADJUSTMENTS
        {
            tag.adjust_foreign_attribute(
                old_name, prefix, local_name, namespace,
            );
        }
    }
}
