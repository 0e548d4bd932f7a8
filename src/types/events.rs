/// External signals the panel reacts to.
///
/// These replace the platform notification-center names the panel
/// historically observed; handlers are registered through the typed
/// [`EventBus`](crate::events::EventBus) instead of string-keyed
/// selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The sync/account state changed (sign-in, sign-out).
    AccountChanged,
    /// A sync run finished. Fires on every foreground transition, so
    /// handlers are expected to pre-check the cache dirty flag.
    SyncFinished,
    /// Private browsing data (history) was cleared.
    PrivateDataCleared,
    /// Display/font settings changed.
    DisplaySettingsChanged,
}
