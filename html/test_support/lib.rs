/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Outillage de test pour l'étape de construction de l'arbre : un
//! tokenizer minimal et déterministe, une sérialisation de l'arbre au
//! format de comparaison des suites de tests html5lib, et un rendu
//! HTML pour les tests d'aller-retour.

pub mod serializer;
pub mod tokenizer;
pub mod tree_dump;

pub use self::{
    serializer::serialize,
    tokenizer::MiniTokenizer,
    tree_dump::dump_tree,
};
