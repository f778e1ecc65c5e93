/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

// ----------- //
// Énumération //
// ----------- //

/// Gouverne le remplacement destructif du body par un frameset dans le
/// mode "in body" et la balise de début frameset dans "after head".
/// Initialement "ok" ; tout contenu non trivial le fait basculer.
#[derive(Debug)]
#[derive(Default)]
#[derive(PartialEq, Eq)]
pub(crate) enum FramesetOkFlag {
    #[default]
    Ok = 1,
    NotOk = 0,
}
