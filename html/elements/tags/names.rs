/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::{fmt, str};

use crate::interface::IsOneOfTagsInterface;

// ------ //
// Macros //
// ------ //

/// Les noms de balises dont la forme canonique n'est pas un
/// identifiant Rust valide (`annotation-xml`) ou n'est pas entièrement
/// en minuscules (`foreignObject`) sont déclarés avec leur forme
/// canonique en littéral.
macro_rules! enumerate_html_tag_names {
    ($($name:ident $(= $display:literal)?)*) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug)]
        #[derive(Copy, Clone)]
        #[derive(PartialEq, Eq)]
        pub enum tag_names {
        $(
            #[allow(non_upper_case_globals)]
            $name
        ),*
        }

        impl tag_names {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(| Self::$name =>
                        enumerate_html_tag_names!(
                            @str $name $(= $display)?
                        )),*
                }
            }
        }

        impl str::FromStr for tag_names {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == enumerate_html_tag_names!(
                        @str $name $(= $display)?
                    ) {
                        return Ok(Self::$name);
                    }
                )*
                Err("Élément inconnu")
            }
        }
    };

    (@str $name:ident) => { stringify!($name) };
    (@str $name:ident = $display:literal) => { $display };
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for tag_names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl IsOneOfTagsInterface for tag_names {
    fn is_one_of(self, arr: impl IntoIterator<Item = Self>) -> bool {
        arr.into_iter().any(|tag_name| self == tag_name)
    }
}

impl<S> IsOneOfTagsInterface for S
where
    S: AsRef<str>,
    S: Copy,
{
    fn is_one_of(self, arr: impl IntoIterator<Item = tag_names>) -> bool {
        arr.into_iter().any(|tag_name| tag_name == self)
    }
}

impl<S> PartialEq<S> for tag_names
where
    S: AsRef<str>,
{
    fn eq(&self, other: &S) -> bool {
        self.as_str() == other.as_ref()
    }
}

// ----------------------- //
// Application de la macro //
// ----------------------- //

enumerate_html_tag_names! {
    a
    abbr
    address
    annotationXml = "annotation-xml"
    applet
    area
    article
    aside
    audio
    b
    base
    basefont
    bdi
    bdo
    bgsound
    big
    blockquote
    body
    br
    button
    canvas
    caption
    center
    cite
    code
    col
    colgroup
    command
    data
    datalist
    dd
    del
    desc
    details
    dfn
    dialog
    dir
    div
    dl
    dt
    em
    embed
    fieldset
    figcaption
    figure
    font
    footer
    foreignObject = "foreignObject"
    form
    frame
    frameset
    h1
    h2
    h3
    h4
    h5
    h6
    head
    header
    hgroup
    hr
    html
    i
    iframe
    image
    img
    input
    ins
    isindex
    kbd
    keygen
    label
    legend
    li
    link
    listing
    main
    malignmark
    map
    mark
    marquee
    math
    menu
    meta
    meter
    mglyph
    mi
    mn
    mo
    ms
    mtext
    nav
    nobr
    noembed
    noframes
    noscript
    object
    ol
    optgroup
    option
    output
    p
    param
    picture
    plaintext
    pre
    progress
    q
    rp
    rt
    ruby
    s
    samp
    script
    section
    select
    small
    source
    span
    strike
    strong
    style
    sub
    summary
    sup
    svg
    table
    tbody
    td
    textarea
    tfoot
    th
    thead
    time
    title
    tr
    track
    tt
    u
    ul
    var
    video
    wbr
    xmp
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_plain_name() {
        assert_eq!("div".parse(), Ok(tag_names::div));
        assert_eq!(tag_names::div.as_str(), "div");
    }

    #[test]
    fn test_canonical_display_names() {
        assert_eq!(
            "annotation-xml".parse(),
            Ok(tag_names::annotationXml)
        );
        assert_eq!(tag_names::foreignObject.as_str(), "foreignObject");
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        assert!("marsupilami".parse::<tag_names>().is_err());
    }

    #[test]
    fn test_compare_with_str() {
        assert!(tag_names::table == "table");
        assert!("td".is_one_of([tag_names::td, tag_names::th]));
        assert!(!"div".is_one_of([tag_names::td, tag_names::th]));
    }
}
