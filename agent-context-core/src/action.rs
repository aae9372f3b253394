/// Every user interaction produces an Action. UI never touches the filesystem directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Cancel,
    Confirm,

    // Movement
    MoveSelection(i32),
    Descend,
    Ascend,

    // Filter
    FilterPush(char),
    FilterPop,

    // Projects mode
    ToggleSelection,
}
