//! Boundary to the platform's application model. The platform owns apps and
//! their persisted units; this adapter only needs a name, a platform type and
//! the unit names the platform currently knows about.

pub trait App: Send + Sync {
    fn name(&self) -> &str;

    /// Runtime/platform type of the app, e.g. "python". Selects the image.
    fn platform(&self) -> &str;

    /// Names of the app's current units. Unit names are container ids.
    fn units(&self) -> Vec<String>;
}
