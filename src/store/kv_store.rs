/// Opaque string persistence for user preferences.
///
/// `set` is fire-and-forget: implementations log write failures instead of
/// surfacing them, since losing a preference write must never disturb a call.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}
