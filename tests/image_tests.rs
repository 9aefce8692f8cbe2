mod common;

use common::fixtures::*;
use common::pdf_assertions::count_images;
use common::{GeneratedPdf, TestResult};
use quire::PipelineBuilder;
use quire::layout::LayoutElement;
use std::fs;

#[tokio::test]
async fn test_embedded_image_keeps_natural_size() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("figures"))?;
    fs::write(dir.path().join("figures/chart one.png"), png_bytes(200, 100))?;

    let pipeline = PipelineBuilder::new().with_resource_dir(dir.path()).build()?;
    let source = "Intro.\n![[figures/chart one.png]]\nMiddle.\n![[figures/chart one.png|Chart]]";

    let laid_out = pipeline.layout(source).await?;
    let images: Vec<_> = laid_out
        .pages
        .iter()
        .flatten()
        .filter(|el| matches!(el.element, LayoutElement::Image(_)))
        .collect();
    assert_eq!(images.len(), 2);
    assert!((images[0].width - 200.0).abs() < 0.01);
    assert!((images[0].height - 100.0).abs() < 0.01);

    let pdf = GeneratedPdf::from_bytes(pipeline.export("![[figures/chart one.png]]").await?)?;
    assert_eq!(count_images(&pdf.doc), 1);
    Ok(())
}

#[tokio::test]
async fn test_wide_image_scales_to_column() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("wide.png"), png_bytes(936, 100))?;

    let pipeline = PipelineBuilder::new().with_resource_dir(dir.path()).build()?;
    let laid_out = pipeline.layout("![[wide.png]]").await?;
    let image = laid_out
        .pages
        .iter()
        .flatten()
        .find(|el| matches!(el.element, LayoutElement::Image(_)))
        .expect("image placed");
    assert!((image.width - 468.0).abs() < 0.01);
    assert!((image.height - 50.0).abs() < 0.01);
    Ok(())
}

#[tokio::test]
async fn test_missing_image_renders_alt_placeholder() -> TestResult {
    let dir = tempfile::tempdir()?;
    let pipeline = PipelineBuilder::new().with_resource_dir(dir.path()).build()?;

    let bytes = pipeline
        .export("Before.\n![[absent.png|Missing figure]]\nAfter.")
        .await?;
    let pdf = GeneratedPdf::from_bytes(bytes)?;
    assert_pdf_contains_text!(pdf, "[Image: Missing figure]");
    assert_pdf_contains_text!(pdf, "After.");
    assert_eq!(count_images(&pdf.doc), 0);
    Ok(())
}

#[tokio::test]
async fn test_image_outside_resource_dir_is_refused() -> TestResult {
    let dir = tempfile::tempdir()?;
    let inner = dir.path().join("notes");
    fs::create_dir(&inner)?;
    fs::write(dir.path().join("secret.png"), png_bytes(10, 10))?;

    let pipeline = PipelineBuilder::new().with_resource_dir(&inner).build()?;
    let pdf = GeneratedPdf::from_bytes(pipeline.export("![[../secret.png|Secret]]").await?)?;
    assert_eq!(count_images(&pdf.doc), 0);
    assert_pdf_contains_text!(pdf, "[Image: Secret]");
    Ok(())
}

#[tokio::test]
async fn test_export_file_writes_pdf() -> TestResult {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("essay.md");
    let output = dir.path().join("essay.pdf");
    fs::write(&input, "# Essay\n\nA short body.")?;

    let pipeline = PipelineBuilder::new().with_resource_dir(dir.path()).build()?;
    pipeline.export_file(&input, &output).await?;

    let pdf = GeneratedPdf::from_bytes(fs::read(&output)?)?;
    assert_pdf_page_count!(pdf, 1);
    assert_eq!(pdf.info("Title").as_deref(), Some("Essay"));
    Ok(())
}
