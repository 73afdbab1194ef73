pub trait ConfigProvider: Send + Sync {
    /// Doctors available when the scheduler starts.
    fn initial_units(&self) -> u64;
}
