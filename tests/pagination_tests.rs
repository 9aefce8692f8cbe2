mod common;

use common::fixtures::*;
use common::{TestResult, export_markdown, layout_markdown};
use quire::layout::LayoutElement;

/// Usable bottom of a Letter page with one-inch margins.
const CONTENT_BOTTOM: f32 = 720.0;

#[tokio::test]
async fn test_page_count_never_decreases_as_content_grows() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut previous = 0;
    for count in [1, 5, 10, 20, 40, 60, 80] {
        let laid_out = layout_markdown(&numbered_paragraphs(count)).await?;
        assert!(
            laid_out.page_count() >= previous,
            "{} paragraphs gave {} pages, fewer than {}",
            count,
            laid_out.page_count(),
            previous
        );
        previous = laid_out.page_count();
    }
    assert!(previous > 1, "80 paragraphs should span several pages");
    Ok(())
}

#[tokio::test]
async fn test_appending_blocks_keeps_existing_pages() -> TestResult {
    let base = numbered_paragraphs(30);
    let before = layout_markdown(&base).await?.page_count();

    let extended = format!(
        "{}\n\n> A closing quotation.\n\n```\nlet x = 1;\n```\n\n- one\n- two",
        base
    );
    let after = layout_markdown(&extended).await?.page_count();
    assert!(after >= before);
    Ok(())
}

#[tokio::test]
async fn test_no_text_crosses_the_bottom_margin() -> TestResult {
    let laid_out = layout_markdown(&numbered_paragraphs(60)).await?;
    assert!(laid_out.page_count() > 1);

    for (index, page) in laid_out.pages.iter().enumerate() {
        for el in page {
            if let LayoutElement::Text(_) = &el.element {
                assert!(
                    el.y + el.height <= CONTENT_BOTTOM + 0.01,
                    "text on page {} ends at {} below the margin",
                    index + 1,
                    el.y + el.height
                );
                assert!(el.y >= 72.0 - 0.01, "text above the top margin");
            }
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_continued_paragraph_resumes_at_top_margin() -> TestResult {
    let laid_out = layout_markdown(&numbered_paragraphs(60)).await?;
    let second_page = &laid_out.pages[1];
    let first_text = second_page
        .iter()
        .find(|el| matches!(el.element, LayoutElement::Text(_)))
        .expect("second page has text");
    // 24pt line box, 12pt glyphs centred inside it.
    assert!((first_text.y - 78.0).abs() < 0.01, "got y = {}", first_text.y);
    Ok(())
}

#[tokio::test]
async fn test_oversized_word_is_placed_without_looping() -> TestResult {
    let word = "x".repeat(400);
    let laid_out = layout_markdown(&format!("Before.\n\n{}\n\nAfter.", word)).await?;

    let placed: Vec<_> = laid_out
        .pages
        .iter()
        .flatten()
        .filter(|el| el.text().is_some_and(|t| t.contains("xxxx")))
        .collect();
    assert_eq!(placed.len(), 1, "the word occupies exactly one line");
    assert!(
        (placed[0].x - 108.0).abs() < 0.01,
        "word starts at the paragraph's first-line offset"
    );
    assert!(placed[0].width > 468.0);

    let texts = laid_out.page_texts().join(" ");
    assert!(texts.contains("After."));
    Ok(())
}

#[tokio::test]
async fn test_reference_heading_starts_a_new_page() -> TestResult {
    let source = with_front_matter(
        "Essay",
        "Opening paragraph.\n\n# Bibliography\n\nClosing paragraph.",
    );
    let pdf = export_markdown(&source).await?;

    assert_pdf_page_count!(pdf, 2);
    assert!(pdf.page_text(1).contains("Opening paragraph."));
    assert!(!pdf.page_text(1).contains("Bibliography"));
    assert!(pdf.page_text(2).contains("Bibliography"));
    assert!(pdf.page_text(2).contains("Closing paragraph."));
    Ok(())
}

#[tokio::test]
async fn test_long_code_block_breaks_across_pages() -> TestResult {
    let code: Vec<String> = (0..120).map(|i| format!("line_{i} = {i};")).collect();
    let source = format!("```\n{}\n```", code.join("\n"));
    let laid_out = layout_markdown(&source).await?;

    assert!(laid_out.page_count() >= 2);
    let all = laid_out.page_texts().join(" ");
    assert!(all.contains("line_0 = 0;"));
    assert!(all.contains("line_119 = 119;"));
    Ok(())
}
