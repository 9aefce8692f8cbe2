use crate::context::RenderContext;
use crate::elements::{LayoutElement, PositionedElement, TextElement};
use crate::fonts::text_width;
use crate::nodes::{Column, block_spacing};

const TAB: &str = "    ";

/// Sets each source line as one unwrapped monospace line. Long lines run past
/// the right margin.
pub fn render_code(ctx: &mut RenderContext, code: &str, column: Column) {
    let scale = ctx.type_scale();
    let face = ctx.code_face(false, false);
    let (font_size, line_height) = (scale.code_font_size, scale.code_line_height);

    for line in code.lines() {
        let text = line.trim_end().replace('\t', TAB);
        ctx.ensure_room(line_height);
        if !text.is_empty() {
            let y = ctx.cursor.y + (line_height - font_size) / 2.0;
            ctx.push(PositionedElement {
                x: column.x,
                y,
                width: text_width(&text, face, font_size),
                height: font_size,
                element: LayoutElement::Text(TextElement {
                    content: text,
                    face,
                    font_size,
                }),
            });
        }
        ctx.cursor.advance(line_height);
    }
    block_spacing(ctx);
}
