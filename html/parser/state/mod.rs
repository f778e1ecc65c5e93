/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Le mode d'insertion
mod insertion_mode;

/// La pile des éléments ouverts
mod stack_of_open_elements;

/// La liste des éléments de mise en forme actifs
mod list_of_active_formatting_elements;

/// Les pointeurs d'éléments
mod element_pointers;

/// Les autres drapeaux d'état de l'analyse
mod flags;

pub(crate) use self::{
    element_pointers::{FormElementPointer, HeadElementPointer},
    flags::FramesetOkFlag,
    insertion_mode::InsertionMode,
    list_of_active_formatting_elements::{
        Entry, ListOfActiveFormattingElements,
    },
    stack_of_open_elements::{Scope, StackOfOpenElements},
};
