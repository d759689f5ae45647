use crate::picker::PickerKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Accept(PickerKey),
    ToggleMark,
    MoveSelection(i32),
    AppendToInput(char),
    DeleteFromInput,
    RemoveLastWord,
    TogglePreview,
    ToggleHelp,
    Exit,
    Nop,
}
