// src/pipeline.rs
use crate::config::ExportConfig;
use crate::error::PipelineError;
use log::{debug, info};
use quire_layout::{LaidOutDocument, LayoutSettings, render_document};
use quire_markup::parse_document;
use quire_render_lopdf::render_pdf;
use quire_resource::{FilesystemResourceProvider, ProviderImageResolver};
use quire_style::{FontChoice, MarginsInches, SharedProfile, select_profile};
use quire_traits::{ImageResolver, MathResolver, UnavailableMathResolver};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The pipeline [`PipelineBuilder::build`] produces: images from the
/// filesystem, math always rendered as placeholders.
pub type DefaultPipeline =
    ExportPipeline<UnavailableMathResolver, ProviderImageResolver<FilesystemResourceProvider>>;

/// A builder for creating an [`ExportPipeline`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: ExportConfig,
    resource_dir: Option<PathBuf>,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with the default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole export configuration.
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the export configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.config = ExportConfig::from_json(&json)?;
        Ok(self)
    }

    /// Selects the style profile by name. Checked in [`PipelineBuilder::build`].
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.config.style = style.into();
        self
    }

    pub fn with_font(mut self, font: FontChoice) -> Self {
        self.config.font = font;
        self
    }

    pub fn with_margins(mut self, margins: MarginsInches) -> Self {
        self.config.margins = margins;
        self
    }

    /// Directory embedded images are resolved against. Defaults to the
    /// current directory.
    pub fn with_resource_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resource_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Consumes the builder and creates a pipeline that loads images from the
    /// resource directory and has no math renderer.
    pub fn build(self) -> Result<DefaultPipeline, PipelineError> {
        let base = self
            .resource_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let images = ProviderImageResolver::new(FilesystemResourceProvider::new(base));
        self.build_with(UnavailableMathResolver, images)
    }

    /// Consumes the builder and creates a pipeline around the given resolvers.
    pub fn build_with<M, I>(self, math: M, images: I) -> Result<ExportPipeline<M, I>, PipelineError>
    where
        M: MathResolver,
        I: ImageResolver,
    {
        let profile = select_profile(&self.config.style)?;
        let settings = self.config.layout_settings();
        settings.validate()?;
        debug!(
            "Built pipeline: style={}, font={}, margins={:?}",
            profile.name(),
            settings.font,
            settings.margins
        );
        Ok(ExportPipeline {
            profile,
            settings,
            math,
            images,
        })
    }
}

/// Parses, lays out and writes one document per call.
pub struct ExportPipeline<M, I> {
    profile: SharedProfile,
    settings: LayoutSettings,
    math: M,
    images: I,
}

impl<M, I> ExportPipeline<M, I>
where
    M: MathResolver,
    I: ImageResolver,
{
    pub fn profile(&self) -> &SharedProfile {
        &self.profile
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Parses and lays out `source` without writing a PDF.
    pub async fn layout(&self, source: &str) -> Result<LaidOutDocument, PipelineError> {
        debug!("Parsing {} bytes of source", source.len());
        let doc = parse_document(source);
        let laid_out = render_document(
            &doc,
            self.profile.clone(),
            &self.settings,
            &self.math,
            &self.images,
        )
        .await?;
        Ok(laid_out)
    }

    /// Converts `source` into PDF bytes.
    pub async fn export(&self, source: &str) -> Result<Vec<u8>, PipelineError> {
        let laid_out = self.layout(source).await?;
        let bytes = render_pdf(&laid_out)?;
        info!(
            "Exported '{}': {} pages, {} bytes",
            laid_out.title,
            laid_out.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Reads `input`, exports it and writes the PDF to `output`.
    pub async fn export_file<P, Q>(&self, input: P, output: Q) -> Result<(), PipelineError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let source = fs::read_to_string(input).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read '{}': {}", input.display(), e),
            ))
        })?;
        let bytes = self.export(&source).await?;
        fs::write(output.as_ref(), bytes)?;
        info!("Wrote {}", output.as_ref().display());
        Ok(())
    }
}
