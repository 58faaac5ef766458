#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleDiskUsage,
    ToggleGpus,
    Refresh,
    None,
}
