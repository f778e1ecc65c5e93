/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::cell::RefCell;

// --------- //
// Structure //
// --------- //

/// Une suite de caractères portée par un noeud texte ou commentaire.
#[derive(Debug)]
pub struct CharacterData {
    data: RefCell<String>,
}

// -------------- //
// Implémentation //
// -------------- //

impl CharacterData {
    pub fn new(data: String) -> Self {
        Self {
            data: RefCell::new(data),
        }
    }

    pub fn data(&self) -> String {
        self.data.borrow().to_owned()
    }

    /// Concatène une suite de caractères aux données en place. La
    /// fusion des noeuds texte adjacents passe par ici.
    pub fn append_data(&self, data: &str) {
        self.data.borrow_mut().push_str(data);
    }
}
