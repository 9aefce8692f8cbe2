mod common;

use common::fixtures::*;
use common::{TestResult, export_markdown, layout_markdown};
use quire::layout::LayoutElement;
use quire::markup::{is_table_start, normalize};

#[test]
fn test_normalizing_twice_is_a_fixed_point() {
    let source = "---\ntitle: Draft\n---\n# Heading\nFirst line\nSecond line\n\n\n\
                  Inline $x$ and $$y = 2$$ trailing\n```\ncode\n\nmore\n```\n- item";
    let once = normalize(source).text();
    let twice = normalize(&once).text();
    assert_eq!(once, twice);
}

#[test]
fn test_table_region_detection() {
    assert!(is_table_start("a|b", Some("---|---")));
    assert!(!is_table_start("a|b", Some("c|d")));
    assert!(!is_table_start("a|b", None));
}

#[tokio::test]
async fn test_table_cells_are_rendered_in_grid_order() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let table = pipe_table(
        &["Name", "Score"],
        &[&["Ada", "91"], &["Grace", "88"]],
    );
    let laid_out = layout_markdown(&format!("Intro.\n\n{}\nOutro.", table)).await?;
    let page = &laid_out.pages[0];

    let position = |needle: &str| {
        page.iter()
            .find(|el| el.text() == Some(needle))
            .map(|el| (el.x, el.y))
            .unwrap_or_else(|| panic!("cell '{}' missing", needle))
    };
    let (name_x, name_y) = position("Name");
    let (score_x, _) = position("Score");
    let (ada_x, ada_y) = position("Ada");
    let (_, grace_y) = position("Grace");

    assert!(name_x < score_x);
    assert!((name_x - ada_x).abs() < 0.01);
    assert!(name_y < ada_y && ada_y < grace_y);

    let rules = page
        .iter()
        .filter(|el| matches!(el.element, LayoutElement::Rule(_)))
        .count();
    assert_eq!(rules, 3, "top, header and bottom rules");
    Ok(())
}

#[tokio::test]
async fn test_table_cells_render_without_markup() -> TestResult {
    let source = "| **Total** | `x` |\n|---|---|\n| ![[fig a.png|Fig]] | *it* |";
    let laid_out = layout_markdown(source).await?;
    let cells: Vec<&str> = laid_out.pages[0]
        .iter()
        .filter_map(|el| el.text())
        .filter(|t| *t != "Untitled Document")
        .collect();
    assert_eq!(cells, vec!["Total", "x", "Fig", "it"]);

    let pdf = export_markdown(source).await?;
    assert_pdf_not_contains_text!(pdf, "**");
    assert_pdf_not_contains_text!(pdf, "fig%20a.png");
    Ok(())
}

#[tokio::test]
async fn test_short_table_rows_are_padded() -> TestResult {
    let source = "| A | B | C |\n|---|---|---|\n| only |\n| 1 | 2 | 3 | 4 |";
    let pdf = export_markdown(source).await?;
    assert_pdf_contains_text!(pdf, "only");
    assert_pdf_contains_text!(pdf, "3");
    assert_pdf_not_contains_text!(pdf, "4");
    Ok(())
}

#[tokio::test]
async fn test_rows_without_divider_stay_paragraphs() -> TestResult {
    let laid_out = layout_markdown("a|b\nc|d").await?;
    let texts = laid_out.page_texts();
    assert!(texts[0].contains("a|b"));
    assert!(texts[0].contains("c|d"));
    assert!(
        laid_out.pages[0]
            .iter()
            .all(|el| !matches!(el.element, LayoutElement::Rule(_)))
    );
    Ok(())
}

#[tokio::test]
async fn test_unresolved_math_renders_placeholders() -> TestResult {
    let pdf = export_markdown("Energy is $E = mc^2$ here.\n\n$$\\int_0^1 x\\,dx$$").await?;
    assert_pdf_contains_text!(pdf, "[Math: E = mc^2]");
    assert_pdf_contains_text!(pdf, "[Math: \\int_0^1 x\\,dx]");
    Ok(())
}

#[tokio::test]
async fn test_multi_line_display_math_is_one_block() -> TestResult {
    let laid_out = layout_markdown("Before\n$$\na + b\n= c\n$$\nAfter").await?;
    let texts = laid_out.page_texts().join(" ");
    assert!(texts.contains("[Math: a + b = c]"));
    Ok(())
}

#[tokio::test]
async fn test_wiki_links_render_as_alias_text() -> TestResult {
    let laid_out = layout_markdown("See [[Other Note|the other note]] for details.").await?;
    let texts = laid_out.page_texts().join(" ");
    assert!(texts.contains("See the other note for details."));
    assert!(!texts.contains("[["));
    Ok(())
}

#[tokio::test]
async fn test_lists_keep_markers_and_start_numbers() -> TestResult {
    let laid_out = layout_markdown("3. third\n4. fourth\n\n- bullet").await?;
    let texts = laid_out.page_texts().join(" ");
    assert!(texts.contains("3. third"));
    assert!(texts.contains("4. fourth"));
    assert!(texts.contains("\u{2022} bullet"));
    Ok(())
}

#[tokio::test]
async fn test_blockquote_draws_a_rule_beside_its_text() -> TestResult {
    let laid_out = layout_markdown("> Quoted words.").await?;
    let page = &laid_out.pages[0];
    let quote = page
        .iter()
        .find(|el| el.text().is_some_and(|t| t.contains("Quoted words.")))
        .unwrap();
    let rule = page
        .iter()
        .find(|el| matches!(el.element, LayoutElement::Rule(_)))
        .unwrap();
    assert!(rule.x < quote.x);
    assert!(rule.y <= quote.y && rule.y + rule.height >= quote.y + quote.height);
    Ok(())
}
