/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts status output (e.g., to stderr) so that downloads,
/// catalog parsing and disk image assembly can keep the operator informed
/// without writing to stdout, which is reserved for listings.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress over a known number of steps
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for &P {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        (**self).report_progress(current, total, message)
    }

    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }
}
