use std::fmt;
use std::path::PathBuf;
use chrono::Local;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use crate::error::{Error, Result};
use crate::font::woff2_targets;
use crate::models::{BatchSummary, Config, ProcessingResult};
use crate::output::{DocumentHeader, Footer, OutputAssembler, LOG_FILE, MANIFEST_FILE, STYLESHEET_FILE};
use crate::utils::{find_font_files, prepare_output_dir, resolve_tool, LogFile};
use super::processor::{process_font, Toolchain};

/// Where a batch is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ValidatingInputs,
    Initializing,
    ProcessingFonts,
    Finalizing,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::ValidatingInputs => "validating inputs",
            PipelineState::Initializing => "initializing",
            PipelineState::ProcessingFonts => "processing fonts",
            PipelineState::Finalizing => "finalizing",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Turns an input directory of fonts into a web font package
pub struct BatchPipeline {
    config: Config,
    toolchain: Toolchain,
    log_file: Option<LogFile>,
    state: PipelineState,
}

impl BatchPipeline {
    pub fn new(config: Config, toolchain: Toolchain) -> Self {
        Self {
            config,
            toolchain,
            log_file: None,
            state: PipelineState::Idle,
        }
    }

    /// Mirror log output into the output directory once it exists
    pub fn with_log_file(mut self, log_file: LogFile) -> Self {
        self.log_file = Some(log_file);
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole batch.
    ///
    /// Errors are only returned for fatal preconditions. Once processing
    /// starts the batch always completes; individual fonts that fail are
    /// counted in the summary instead.
    pub fn run(&mut self) -> Result<BatchSummary> {
        self.transition(PipelineState::ValidatingInputs);
        let fonts = self.validate().map_err(|e| self.fail(e))?;

        self.transition(PipelineState::Initializing);
        let (assembler, mut summary) = self.initialize().map_err(|e| self.fail(e))?;

        self.transition(PipelineState::ProcessingFonts);
        summary = self.process_fonts(&fonts, &assembler, summary);

        self.transition(PipelineState::Finalizing);
        let summary = self.finalize(&assembler, summary);

        self.transition(PipelineState::Done);
        Ok(summary)
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Pipeline: {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, err: Error) -> Error {
        self.transition(PipelineState::Failed);
        err
    }

    fn validate(&self) -> Result<Vec<PathBuf>> {
        for tool in &self.toolchain.required_tools {
            let path = resolve_tool(tool)?;
            debug!("Found {} at {}", tool, path.display());
        }

        let input_dir = &self.config.input_dir;
        if !input_dir.is_dir() {
            return Err(Error::InvalidPath(input_dir.clone()));
        }

        let fonts = find_font_files(input_dir)?;
        if fonts.is_empty() {
            return Err(Error::NoFonts(input_dir.clone()));
        }
        info!("Found {} font file(s) in {}", fonts.len(), input_dir.display());
        Ok(fonts)
    }

    fn initialize(&self) -> Result<(OutputAssembler, BatchSummary)> {
        let output_dir = &self.config.output_dir;
        prepare_output_dir(output_dir, self.config.force)?;

        let mut summary = BatchSummary::new(output_dir.clone());
        if let Some(log_file) = &self.log_file {
            log_file.attach(&output_dir.join(LOG_FILE))?;
            summary.record_artifact(format!("{} (build log)", LOG_FILE));
        }
        info!("Writing package to {}", output_dir.display());

        let header = DocumentHeader::new(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        let assembler = OutputAssembler::create(output_dir, &header)?;
        Ok((assembler, summary))
    }

    /// Fold every font into the summary, appending in discovery order
    fn process_fonts(&self, fonts: &[PathBuf], assembler: &OutputAssembler, summary: BatchSummary) -> BatchSummary {
        let total = fonts.len();
        let targets: Vec<Option<PathBuf>> = if self.config.convert_woff2 {
            woff2_targets(fonts, &self.config.output_dir).into_iter().map(Some).collect()
        } else {
            vec![None; total]
        };

        let process = |(index, (font, target)): (usize, (&PathBuf, &Option<PathBuf>))| {
            info!("[{}/{}] Processing {}", index + 1, total, font.display());
            process_font(&self.toolchain, &self.config, font, target.as_deref())
        };
        let absorb = |summary: BatchSummary, result: ProcessingResult| self.absorb(assembler, summary, result);

        let pool = match self.config.jobs {
            0 | 1 => None,
            jobs => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!("Cannot start {} workers, processing sequentially: {}", jobs, e);
                    None
                }
            },
        };

        match pool {
            Some(pool) => {
                let results: Vec<ProcessingResult> =
                    pool.install(|| fonts.par_iter().zip(targets.par_iter()).enumerate().map(process).collect());
                results.into_iter().fold(summary, absorb)
            }
            None => fonts.iter().zip(targets.iter()).enumerate().map(process).fold(summary, absorb),
        }
    }

    fn absorb(&self, assembler: &OutputAssembler, mut summary: BatchSummary, result: ProcessingResult) -> BatchSummary {
        let name = result.file_name();
        if !result.succeeded {
            if let Some(reason) = &result.failure_reason {
                debug!("Skipping {}: {}", name, reason);
            }
            summary.record_failed();
            return summary;
        }

        match assembler.append_result(&result, &self.toolchain.integrity) {
            Ok(()) => {
                info!("Added {} to the package", name);
                summary.record_processed();
                if result.converted_path.is_some() {
                    summary.record_converted();
                }
            }
            Err(e) => {
                error!("Failed to write package entries for {}: {}", name, e);
                summary.record_failed();
            }
        }
        summary
    }

    /// Write the integrity footer and report the run.
    ///
    /// A footer that cannot be written is logged; the batch still completes.
    fn finalize(&self, assembler: &OutputAssembler, mut summary: BatchSummary) -> BatchSummary {
        match self.write_footer(assembler, &summary) {
            Ok(stylesheet_csp) => info!("Stylesheet integrity: {}", stylesheet_csp),
            Err(e) => error!("Failed to write the integrity footer to {}: {}", MANIFEST_FILE, e),
        }

        summary.record_artifact(format!("{} (manifest)", MANIFEST_FILE));
        summary.record_artifact(format!("{} (stylesheet)", STYLESHEET_FILE));
        if summary.processed_count > 0 {
            summary.record_artifact("original font files");
        }
        if summary.converted_count > 0 {
            summary.record_artifact("WOFF2 font files");
        }

        info!(
            "Processed {} of {} font(s), {} failed",
            summary.processed_count,
            summary.total(),
            summary.failed_count
        );
        info!("Output: {}", summary.output_directory.display());
        for artifact in &summary.generated_files {
            info!("  - {}", artifact);
        }
        summary
    }

    fn write_footer(&self, assembler: &OutputAssembler, summary: &BatchSummary) -> Result<String> {
        // Hash before the footer is written: the footer goes into the
        // manifest, but the hash must cover the finished stylesheet
        let integrity = &self.toolchain.integrity;
        let stylesheet_hash = integrity.hash_base64(assembler.stylesheet_path())?;
        let stylesheet_csp = integrity.csp_source(&stylesheet_hash);

        assembler.append_footer(&Footer {
            stylesheet_csp: stylesheet_csp.clone(),
            summary,
        })?;
        Ok(stylesheet_csp)
    }
}
