//! Translation from egui pointer input to the engines' gesture vocabulary.

use crate::services::paint::PointerButton;

pub fn map_pointer_button(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Secondary => PointerButton::Secondary,
        // Extra mouse buttons behave like middle: they never force erase
        egui::PointerButton::Middle
        | egui::PointerButton::Extra1
        | egui::PointerButton::Extra2 => PointerButton::Middle,
    }
}

/// Button pressed this frame, primary taking precedence.
pub fn pressed_button(input: &egui::InputState) -> Option<PointerButton> {
    [
        egui::PointerButton::Primary,
        egui::PointerButton::Secondary,
        egui::PointerButton::Middle,
    ]
    .into_iter()
    .find(|button| input.pointer.button_pressed(*button))
    .map(map_pointer_button)
}

/// Button currently held, primary taking precedence.
pub fn held_button(input: &egui::InputState) -> Option<PointerButton> {
    [
        egui::PointerButton::Primary,
        egui::PointerButton::Secondary,
        egui::PointerButton::Middle,
    ]
    .into_iter()
    .find(|button| input.pointer.button_down(*button))
    .map(map_pointer_button)
}
