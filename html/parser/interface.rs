/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{error::HTMLParseError, token::HTMLToken};

// --------- //
// Interface //
// --------- //

/// Contrat du tokenizer, seule frontière avec l'extérieur.
///
/// Le tokenizer produit des jetons dont les noms de balises sont déjà
/// en minuscules et dont les listes d'attributs sont ordonnées avec
/// des clés uniques en première occurrence. La fin du flux est
/// signalée par le jeton distingué [HTMLToken::EOF] ; toute autre
/// erreur de lecture est remontée à l'appelant et interrompt
/// l'analyse.
pub trait HTMLTokenizerInterface {
    fn consume_next_token(
        &mut self,
    ) -> Result<HTMLToken, HTMLParseError>;

    /// Force le tokenizer en mode texte brut jusqu'à la balise de fin
    /// correspondante. Le point d'entrée fragment s'en sert lorsque
    /// l'élément de contexte est un élément de texte brut (script,
    /// title, textarea, ...).
    fn set_raw_tag(&mut self, tag_name: &str);
}
