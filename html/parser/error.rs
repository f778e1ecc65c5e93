/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;
use std::error;

// ----------- //
// Énumération //
// ----------- //

/// Seule la lecture du flux de jetons peut faire échouer une analyse :
/// le HTML mal formé est toujours récupéré. L'arbre atteint au moment
/// de l'erreur est abandonné avec l'analyseur.
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub enum HTMLParseError {
    ReadFailure(String),
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for HTMLParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Self::ReadFailure(reason) => {
                write!(f, "Erreur de lecture du flux de jetons: {reason}")
            }
        }
    }
}

impl error::Error for HTMLParseError {}
