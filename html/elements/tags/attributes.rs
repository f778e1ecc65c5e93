/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

use crate::interface::IsOneOfAttributesInterface;

// ------ //
// Macros //
// ------ //

/// `type` est un mot-clé Rust ; sa forme canonique est déclarée en
/// littéral.
macro_rules! enumerate_html_tag_attributes {
    ($($name:ident $(= $display:literal)?)*) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug)]
        #[derive(Copy, Clone)]
        #[derive(PartialEq, Eq)]
        pub enum tag_attributes {
        $(
            #[allow(non_upper_case_globals)]
            $name
        ),*
        }

        impl tag_attributes {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(| Self::$name =>
                        enumerate_html_tag_attributes!(
                            @str $name $(= $display)?
                        )),*
                }
            }
        }
    };

    (@str $name:ident) => { stringify!($name) };
    (@str $name:ident = $display:literal) => { $display };
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for tag_attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<S> PartialEq<S> for tag_attributes
where
    S: AsRef<str>,
{
    fn eq(&self, other: &S) -> bool {
        self.as_str() == other.as_ref()
    }
}

impl<S> IsOneOfAttributesInterface for S
where
    S: AsRef<str>,
    S: Copy,
{
    fn is_one_of(
        self,
        arr: impl IntoIterator<Item = tag_attributes>,
    ) -> bool {
        arr.into_iter()
            .any(|attribute| attribute.as_str() == self.as_ref())
    }
}

// ----------------------- //
// Application de la macro //
// ----------------------- //

enumerate_html_tag_attributes! {
    action
    color
    encoding
    face
    hidden
    href
    name
    prompt
    size
    ty = "type"
}
