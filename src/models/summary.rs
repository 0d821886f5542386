use std::path::PathBuf;

/// Running totals for a packaging run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed_count: usize,
    pub failed_count: usize,
    /// Processed fonts that also got a WOFF2 file
    pub converted_count: usize,
    pub output_directory: PathBuf,
    /// Artifact categories, in the order they were produced
    pub generated_files: Vec<String>,
}

impl BatchSummary {
    pub fn new(output_directory: PathBuf) -> Self {
        Self {
            output_directory,
            ..Self::default()
        }
    }

    pub fn record_processed(&mut self) {
        self.processed_count += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed_count += 1;
    }

    pub fn record_converted(&mut self) {
        self.converted_count += 1;
    }

    /// Note an artifact category once
    pub fn record_artifact(&mut self, category: impl Into<String>) {
        let category = category.into();
        if !self.generated_files.contains(&category) {
            self.generated_files.push(category);
        }
    }

    pub fn total(&self) -> usize {
        self.processed_count + self.failed_count
    }
}
